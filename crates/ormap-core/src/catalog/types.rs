//! Handles describing reflected classes.

use serde::{Deserialize, Serialize};
use std::any::{self, Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Identity of a mapped type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeHandle {
    /// A Rust type known at compile time.
    Native {
        /// Runtime identity of the type.
        id: TypeId,
        /// Fully qualified type name.
        name: &'static str,
    },
    /// A class known only by its fully qualified name.
    Declared(String),
}

impl TypeHandle {
    /// Handle for the Rust type `T`.
    pub fn of<T: Any + ?Sized>() -> Self {
        TypeHandle::Native {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Handle for a class identified by name.
    pub fn declared(full_name: impl Into<String>) -> Self {
        TypeHandle::Declared(full_name.into())
    }

    /// Fully qualified name of the type.
    pub fn name(&self) -> &str {
        match self {
            TypeHandle::Native { name, .. } => name,
            TypeHandle::Declared(name) => name,
        }
    }

    /// Last path segment of the name, without generic arguments.
    pub fn simple_name(&self) -> &str {
        let name = self.name();
        let base = name.split('<').next().unwrap_or(name);
        base.rsplit(['.', ':']).next().unwrap_or(base)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entity marker carried by a mapped class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityMarker {
    /// Table name override. Empty means unset.
    pub table: Option<String>,
}

impl EntityMarker {
    /// Marker without a table override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker overriding the table name.
    pub fn with_table(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
        }
    }

    /// Override name, if set and non-empty.
    pub fn custom_name(&self) -> Option<&str> {
        self.table.as_deref().filter(|t| !t.is_empty())
    }
}

/// A reflected class as handed over by the inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Type identity.
    pub handle: TypeHandle,
    /// Short class name.
    pub simple_name: String,
    /// Fully qualified class name.
    pub full_name: String,
    /// Entity marker, if the class carries one.
    pub marker: Option<EntityMarker>,
}

impl ClassInfo {
    /// Describe a class from its handle, without an entity marker.
    pub fn new(handle: TypeHandle) -> Self {
        Self {
            simple_name: handle.simple_name().to_string(),
            full_name: handle.name().to_string(),
            handle,
            marker: None,
        }
    }

    /// Describe the Rust type `T`.
    pub fn of<T: Any>() -> Self {
        Self::new(TypeHandle::of::<T>())
    }

    /// Describe a class known by its fully qualified name.
    pub fn declared(full_name: impl Into<String>) -> Self {
        Self::new(TypeHandle::declared(full_name))
    }

    /// Attach an entity marker.
    pub fn with_marker(mut self, marker: EntityMarker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Attach an entity marker without overrides.
    pub fn entity(self) -> Self {
        self.with_marker(EntityMarker::new())
    }

    /// Check if the class carries an entity marker.
    pub fn is_entity(&self) -> bool {
        self.marker.is_some()
    }
}

/// Zero-argument constructor used by the instantiation layer.
#[derive(Clone)]
pub struct DefaultConstructor(Arc<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>);

impl DefaultConstructor {
    /// Wrap a constructor function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Box<dyn Any + Send> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Constructor calling `T::default()`.
    pub fn of<T: Default + Any + Send>() -> Self {
        Self::new(|| Box::new(T::default()) as Box<dyn Any + Send>)
    }

    /// Create a fresh instance.
    pub fn instantiate(&self) -> Box<dyn Any + Send> {
        (self.0)()
    }
}

impl fmt::Debug for DefaultConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultConstructor")
    }
}

/// Loading policy of a relationship field.
///
/// Carried through for the loading layer; the catalog never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingPolicy {
    /// Load together with the owning entity.
    #[default]
    Eager,
    /// Load on first access.
    Lazy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Invoice {
        number: u32,
    }

    #[test]
    fn test_type_handle_identity() {
        assert_eq!(TypeHandle::of::<Invoice>(), TypeHandle::of::<Invoice>());
        assert_ne!(TypeHandle::of::<Invoice>(), TypeHandle::of::<String>());
        assert_ne!(
            TypeHandle::of::<Invoice>(),
            TypeHandle::declared(any::type_name::<Invoice>())
        );
        assert_eq!(TypeHandle::declared("shop.Order"), TypeHandle::declared("shop.Order"));
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(TypeHandle::of::<Invoice>().simple_name(), "Invoice");
        assert_eq!(TypeHandle::declared("com.app.model.User").simple_name(), "User");
        assert_eq!(TypeHandle::declared("shop::Order").simple_name(), "Order");
        assert_eq!(TypeHandle::of::<Vec<u8>>().simple_name(), "Vec");
        assert_eq!(TypeHandle::declared("Order").simple_name(), "Order");
    }

    #[test]
    fn test_class_info() {
        let class = ClassInfo::declared("shop::OrderItem");
        assert_eq!(class.simple_name, "OrderItem");
        assert_eq!(class.full_name, "shop::OrderItem");
        assert!(!class.is_entity());
        assert!(class.entity().is_entity());
    }

    #[test]
    fn test_marker_custom_name() {
        assert_eq!(EntityMarker::new().custom_name(), None);
        assert_eq!(EntityMarker::with_table("").custom_name(), None);
        assert_eq!(EntityMarker::with_table("orders").custom_name(), Some("orders"));
    }

    #[test]
    fn test_default_constructor() {
        let ctor = DefaultConstructor::of::<Invoice>();
        let instance = ctor.instantiate();
        let invoice = instance.downcast_ref::<Invoice>().unwrap();
        assert_eq!(invoice.number, 0);
        assert_eq!(format!("{ctor:?}"), "DefaultConstructor");
    }

    #[test]
    fn test_loading_policy_serde() {
        assert_eq!(LoadingPolicy::default(), LoadingPolicy::Eager);
        let policy: LoadingPolicy = serde_json::from_str(r#""lazy""#).unwrap();
        assert_eq!(policy, LoadingPolicy::Lazy);
    }
}
