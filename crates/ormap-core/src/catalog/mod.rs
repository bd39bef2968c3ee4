//! Entity catalog for ORMAP.
//!
//! The catalog holds entity and field descriptors and the registry that
//! validates them before they reach the SQL layer.

mod entity;
mod field;
mod inspector;
mod registry;
mod schema;
mod types;

pub use entity::{EntityDescriptor, InspectedEntity};
pub use field::FieldDescriptor;
pub use inspector::{DeclaredInspector, Inspector};
pub use registry::{new_shared_registry, SchemaRegistry, SharedSchemaRegistry};
pub use schema::{ResolvedColumn, ResolvedSchema, ResolvedTable};
pub use types::{ClassInfo, DefaultConstructor, EntityMarker, LoadingPolicy, TypeHandle};
