//! Inspection of mapped classes.
//!
//! The catalog never reflects over types itself. An [`Inspector`] hands it
//! the fields and the default constructor of each class.

use super::field::FieldDescriptor;
use super::types::{ClassInfo, DefaultConstructor, TypeHandle};
use crate::error::{MappingError, MappingResult};
use std::any::Any;
use std::collections::HashMap;

/// Source of field lists and constructors for mapped classes.
pub trait Inspector {
    /// Fields of `class`, in declaration order.
    fn fields(&self, class: &ClassInfo) -> MappingResult<Vec<FieldDescriptor>>;

    /// Zero-argument constructor of `class`.
    fn default_constructor(&self, class: &ClassInfo) -> MappingResult<DefaultConstructor>;
}

/// Fields and constructor declared for one class.
#[derive(Debug, Clone)]
struct ClassDeclaration {
    fields: Vec<FieldDescriptor>,
    constructor: Option<DefaultConstructor>,
}

/// Inspector backed by explicit declarations.
#[derive(Debug, Clone, Default)]
pub struct DeclaredInspector {
    classes: HashMap<TypeHandle, ClassDeclaration>,
}

impl DeclaredInspector {
    /// Create an inspector with no declarations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the fields of Rust type `T`, constructed with `T::default()`.
    pub fn declare<T: Default + Any + Send>(
        &mut self,
        fields: impl IntoIterator<Item = FieldDescriptor>,
    ) -> &mut Self {
        self.declare_class(
            TypeHandle::of::<T>(),
            fields,
            Some(DefaultConstructor::of::<T>()),
        )
    }

    /// Declare the fields and constructor of any class.
    pub fn declare_class(
        &mut self,
        handle: TypeHandle,
        fields: impl IntoIterator<Item = FieldDescriptor>,
        constructor: Option<DefaultConstructor>,
    ) -> &mut Self {
        self.classes.insert(
            handle,
            ClassDeclaration {
                fields: fields.into_iter().collect(),
                constructor,
            },
        );
        self
    }

    /// Check if `handle` has been declared.
    pub fn is_declared(&self, handle: &TypeHandle) -> bool {
        self.classes.contains_key(handle)
    }

    fn declaration(&self, class: &ClassInfo) -> MappingResult<&ClassDeclaration> {
        self.classes.get(&class.handle).ok_or_else(|| {
            MappingError::Inspection(format!("no declaration for class {}", class.full_name))
        })
    }
}

impl Inspector for DeclaredInspector {
    fn fields(&self, class: &ClassInfo) -> MappingResult<Vec<FieldDescriptor>> {
        Ok(self.declaration(class)?.fields.clone())
    }

    fn default_constructor(&self, class: &ClassInfo) -> MappingResult<DefaultConstructor> {
        self.declaration(class)?
            .constructor
            .clone()
            .ok_or_else(|| MappingError::MissingDefaultConstructor {
                class: class.full_name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Customer;

    #[test]
    fn test_declared_native_class() {
        let mut inspector = DeclaredInspector::new();
        inspector.declare::<Customer>([
            FieldDescriptor::id("id", TypeHandle::of::<i64>()),
            FieldDescriptor::new("name", TypeHandle::of::<String>()),
        ]);

        let class = ClassInfo::of::<Customer>().entity();
        let fields = inspector.fields(&class).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].original_name(), "id");
        assert_eq!(fields[1].original_name(), "name");

        let ctor = inspector.default_constructor(&class).unwrap();
        assert!(ctor.instantiate().downcast_ref::<Customer>().is_some());
    }

    #[test]
    fn test_undeclared_class() {
        let inspector = DeclaredInspector::new();
        let class = ClassInfo::declared("shop::Ghost").entity();

        assert!(matches!(
            inspector.fields(&class),
            Err(MappingError::Inspection(_))
        ));
    }

    #[test]
    fn test_missing_constructor() {
        let mut inspector = DeclaredInspector::new();
        inspector.declare_class(TypeHandle::declared("shop::Ledger"), Vec::new(), None);

        let class = ClassInfo::declared("shop::Ledger").entity();
        assert!(inspector.is_declared(&class.handle));
        assert!(matches!(
            inspector.default_constructor(&class),
            Err(MappingError::MissingDefaultConstructor { class }) if class == "shop::Ledger"
        ));
    }
}
