//! ORMAP Core - entity metadata, physical naming, and schema validation.
//!
//! This crate turns declared classes and fields into a validated schema
//! whose table and column names are resolved, ready for SQL generation.

pub mod catalog;
pub mod config;
pub mod declaration;
pub mod error;
pub mod naming;
pub mod session;

pub use catalog::{
    new_shared_registry, ClassInfo, DeclaredInspector, DefaultConstructor, EntityDescriptor,
    EntityMarker, FieldDescriptor, InspectedEntity, Inspector, LoadingPolicy, ResolvedColumn,
    ResolvedSchema, ResolvedTable, SchemaRegistry, SharedSchemaRegistry, TypeHandle,
};
pub use config::MappingConfig;
pub use declaration::{EntityDeclaration, FieldDeclaration, SchemaDeclaration};
pub use error::{MappingError, MappingResult};
pub use naming::NamingPolicy;
pub use session::{bind_names, MappingSession};
