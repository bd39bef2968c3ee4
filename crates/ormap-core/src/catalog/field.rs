//! Field descriptors for mapped entities.

use super::types::{LoadingPolicy, TypeHandle};

/// A mapped attribute of an entity, paired with one physical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    original_name: String,
    declared_type: TypeHandle,
    column_type: Option<String>,
    custom_name: Option<String>,
    generated_name: Option<String>,
    id: bool,
    auto_increment: bool,
    foreign_key: bool,
    load: LoadingPolicy,
}

impl FieldDescriptor {
    /// Create a plain field with no physical bindings.
    pub fn new(original_name: impl Into<String>, declared_type: TypeHandle) -> Self {
        Self {
            original_name: original_name.into(),
            declared_type,
            column_type: None,
            custom_name: None,
            generated_name: None,
            id: false,
            auto_increment: false,
            foreign_key: false,
            load: LoadingPolicy::default(),
        }
    }

    /// Create an id field.
    pub fn id(original_name: impl Into<String>, declared_type: TypeHandle) -> Self {
        Self::new(original_name, declared_type).with_id()
    }

    /// Mark as the id field.
    pub fn with_id(mut self) -> Self {
        self.id = true;
        self
    }

    /// Mark as auto-incremented by the store.
    pub fn with_auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Mark as a foreign key to another entity.
    pub fn with_foreign_key(mut self) -> Self {
        self.foreign_key = true;
        self
    }

    /// Bind the physical data type.
    pub fn with_column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = Some(column_type.into());
        self
    }

    /// Override the column name. Empty overrides are ignored.
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.custom_name = (!name.is_empty()).then_some(name);
        self
    }

    /// Set the relationship loading policy.
    pub fn with_load(mut self, load: LoadingPolicy) -> Self {
        self.load = load;
        self
    }

    /// Bind the physical column name.
    pub fn with_generated_name(mut self, name: impl Into<String>) -> Self {
        self.generated_name = Some(name.into());
        self
    }

    /// Declared field name.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Declared field type.
    pub fn declared_type(&self) -> &TypeHandle {
        &self.declared_type
    }

    /// Physical data type, if bound.
    pub fn column_type(&self) -> Option<&str> {
        self.column_type.as_deref()
    }

    /// Column name override, if any.
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    /// Physical column name, if bound to a non-empty name.
    pub fn generated_name(&self) -> Option<&str> {
        self.generated_name.as_deref().filter(|n| !n.is_empty())
    }

    /// Check if this is the id field.
    pub fn is_id(&self) -> bool {
        self.id
    }

    /// Check if the store generates the value.
    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// Check if the field references another entity.
    pub fn is_foreign_key(&self) -> bool {
        self.foreign_key
    }

    /// Relationship loading policy.
    pub fn load(&self) -> LoadingPolicy {
        self.load
    }

    /// Check if both fields resolve to the same physical column.
    ///
    /// Unbound fields never share a column.
    pub fn same_column_as(&self, other: &FieldDescriptor) -> bool {
        match (self.generated_name(), other.generated_name()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
