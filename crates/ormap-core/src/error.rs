//! Mapping error types.

use thiserror::Error;

/// Errors raised while inspecting, naming, admitting, or validating entities.
///
/// Every variant is a static mapping-declaration defect. None of them is
/// transient, so callers surface them to the operator instead of retrying.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The class carries no entity marker.
    #[error("{class} is not an entity: missing entity marker")]
    NotAnEntity {
        /// Fully qualified class name.
        class: String,
    },

    /// The entity reached the registry without a physical table name.
    #[error("entity {entity} has no physical table name bound")]
    UnmappedEntity {
        /// Fully qualified class name.
        entity: String,
    },

    /// A field has no physical column name bound.
    #[error("field {field} has no physical column name bound")]
    UnmappedField {
        /// Original field name.
        field: String,
    },

    /// A field has no physical data type bound.
    #[error("field {field} of type {declared_type} has no physical data type bound")]
    UnmappedDataType {
        /// Original field name.
        field: String,
        /// Name of the declared type.
        declared_type: String,
    },

    /// Two entities resolved to the same physical table name.
    #[error("entities {existing} and {incoming} resolve to the same table name")]
    DuplicateTableNames {
        /// Simple name of the entity already registered.
        existing: String,
        /// Simple name of the entity being admitted.
        incoming: String,
    },

    /// Two fields of one entity resolved to the same physical column name.
    #[error("fields {first} and {second} resolve to the same column name")]
    DuplicateColumnNames {
        /// Original name of the first field.
        first: String,
        /// Original name of the second field.
        second: String,
    },

    /// The entity declares no id field.
    #[error("entity {entity} declares no id field")]
    NotDeclaredId {
        /// Fully qualified class name.
        entity: String,
    },

    /// The entity declares more than one id field.
    #[error("entity {entity} declares more than one id field")]
    TooManyId {
        /// Fully qualified class name.
        entity: String,
    },

    /// The class has no zero-argument constructor.
    #[error("{class} has no default constructor")]
    MissingDefaultConstructor {
        /// Fully qualified class name.
        class: String,
    },

    /// The inspector could not describe the class.
    #[error("inspection failed: {0}")]
    Inspection(String),

    /// A schema declaration could not be parsed.
    #[error("invalid declaration: {0}")]
    InvalidDeclaration(String),

    /// Reading a declaration failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;
