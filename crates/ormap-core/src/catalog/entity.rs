//! Entity descriptors.

use super::field::FieldDescriptor;
use super::inspector::Inspector;
use super::types::{ClassInfo, DefaultConstructor, TypeHandle};
use crate::error::{MappingError, MappingResult};

/// An inspected entity whose physical table name is not bound yet.
#[derive(Debug, Clone)]
pub struct InspectedEntity {
    handle: TypeHandle,
    original_name: String,
    original_full_name: String,
    custom_name: Option<String>,
    fields: Vec<FieldDescriptor>,
    default_constructor: DefaultConstructor,
}

/// A mapped class paired with its physical table.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    handle: TypeHandle,
    original_name: String,
    original_full_name: String,
    custom_name: Option<String>,
    generated_name: String,
    fields: Vec<FieldDescriptor>,
    default_constructor: DefaultConstructor,
}

impl EntityDescriptor {
    /// Inspect `class` into an unbound entity.
    ///
    /// Fails with [`MappingError::NotAnEntity`] when the class carries no
    /// entity marker. Inspector failures are returned as they are.
    pub fn inspect<I>(class: &ClassInfo, inspector: &I) -> MappingResult<InspectedEntity>
    where
        I: Inspector + ?Sized,
    {
        let marker = class.marker.as_ref().ok_or_else(|| MappingError::NotAnEntity {
            class: class.full_name.clone(),
        })?;

        let fields = inspector.fields(class)?;
        let default_constructor = inspector.default_constructor(class)?;

        Ok(InspectedEntity {
            handle: class.handle.clone(),
            original_name: class.simple_name.clone(),
            original_full_name: class.full_name.clone(),
            custom_name: marker.custom_name().map(String::from),
            fields,
            default_constructor,
        })
    }

    /// Type identity of the mapped class.
    pub fn type_handle(&self) -> &TypeHandle {
        &self.handle
    }

    /// Short class name.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Fully qualified class name.
    pub fn original_full_name(&self) -> &str {
        &self.original_full_name
    }

    /// Table name override from the entity marker.
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    /// Physical table name.
    pub fn generated_name(&self) -> &str {
        &self.generated_name
    }

    /// Fields in inspection order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Get a field by its declared name.
    pub fn field(&self, original_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.original_name() == original_name)
    }

    /// Constructor used by the instantiation layer.
    pub fn default_constructor(&self) -> &DefaultConstructor {
        &self.default_constructor
    }

    /// First auto-increment field, if any.
    pub fn auto_increment_field(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.is_auto_increment())
    }

    /// The id field, if exactly one is declared.
    pub fn id_field(&self) -> Option<&FieldDescriptor> {
        let mut ids = self.fields.iter().filter(|f| f.is_id());
        match (ids.next(), ids.next()) {
            (Some(id), None) => Some(id),
            _ => None,
        }
    }

    /// Number of foreign key fields.
    pub fn foreign_key_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_foreign_key()).count()
    }

    /// Check if both entities resolve to the same physical table.
    pub fn same_table_as(&self, other: &EntityDescriptor) -> bool {
        self.generated_name == other.generated_name
    }
}

impl InspectedEntity {
    /// Bind the physical table name, producing the final descriptor.
    pub fn bind(self, generated_name: impl Into<String>) -> EntityDescriptor {
        EntityDescriptor {
            handle: self.handle,
            original_name: self.original_name,
            original_full_name: self.original_full_name,
            custom_name: self.custom_name,
            generated_name: generated_name.into(),
            fields: self.fields,
            default_constructor: self.default_constructor,
        }
    }

    /// Rewrite every field, e.g. to bind column names.
    pub fn map_fields<F>(mut self, f: F) -> Self
    where
        F: FnMut(FieldDescriptor) -> FieldDescriptor,
    {
        self.fields = self.fields.into_iter().map(f).collect();
        self
    }

    /// Short class name.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Fully qualified class name.
    pub fn original_full_name(&self) -> &str {
        &self.original_full_name
    }

    /// Table name override from the entity marker.
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    /// Fields in inspection order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}
