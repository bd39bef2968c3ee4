//! Schema registry: the admitted entities and their table names.

use super::entity::EntityDescriptor;
use super::schema::ResolvedSchema;
use super::types::TypeHandle;
use crate::error::{MappingError, MappingResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of mapped entities, indexed by physical table name.
///
/// Append-only. After every successful [`add_entity`](Self::add_entity)
/// each entity has a non-empty table name, no two entities share one, and
/// the table index covers exactly the admitted entities.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    /// Entities in admission order.
    entities: Vec<EntityDescriptor>,
    /// Table name to position in `entities`.
    table_index: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit an entity.
    ///
    /// Fails with [`MappingError::UnmappedEntity`] if no table name is bound
    /// and with [`MappingError::DuplicateTableNames`] if an admitted entity
    /// already uses the table name. A failed admission leaves the registry
    /// unchanged.
    pub fn add_entity(&mut self, entity: EntityDescriptor) -> MappingResult<()> {
        if entity.generated_name().is_empty() {
            warn!(entity = %entity.original_full_name(), "rejected entity without table name");
            return Err(MappingError::UnmappedEntity {
                entity: entity.original_full_name().to_string(),
            });
        }

        self.check_conflicting_entities(&entity)?;

        debug!(
            entity = %entity.original_full_name(),
            table = %entity.generated_name(),
            fields = entity.fields().len(),
            "admitted entity"
        );

        self.table_index
            .insert(entity.generated_name().to_string(), self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    // Compared against every admitted entity, not only the index.
    fn check_conflicting_entities(&self, entity: &EntityDescriptor) -> MappingResult<()> {
        match self.entities.iter().find(|e| e.same_table_as(entity)) {
            Some(existing) => {
                warn!(
                    table = %entity.generated_name(),
                    existing = %existing.original_full_name(),
                    incoming = %entity.original_full_name(),
                    "rejected duplicate table name"
                );
                Err(MappingError::DuplicateTableNames {
                    existing: existing.original_name().to_string(),
                    incoming: entity.original_name().to_string(),
                })
            }
            None => Ok(()),
        }
    }

    /// Validate the column bindings of `entity`.
    ///
    /// Every field needs a column name and a data type, and no two fields
    /// may share a column name.
    pub fn check_conflicting_fields(&self, entity: &EntityDescriptor) -> MappingResult<()> {
        let fields = entity.fields();

        for (i, f) in fields.iter().enumerate() {
            if f.generated_name().is_none() {
                return Err(MappingError::UnmappedField {
                    field: f.original_name().to_string(),
                });
            }

            if f.column_type().is_none() {
                return Err(MappingError::UnmappedDataType {
                    field: f.original_name().to_string(),
                    declared_type: f.declared_type().name().to_string(),
                });
            }

            // Field lists are small; pairwise is fine.
            for (j, g) in fields.iter().enumerate() {
                if i != j && f.same_column_as(g) {
                    return Err(MappingError::DuplicateColumnNames {
                        first: f.original_name().to_string(),
                        second: g.original_name().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Ensure `entity` declares exactly one id field.
    pub fn check_id_binding(&self, entity: &EntityDescriptor) -> MappingResult<()> {
        let ids = entity.fields().iter().filter(|f| f.is_id()).count();

        match ids {
            0 => Err(MappingError::NotDeclaredId {
                entity: entity.original_full_name().to_string(),
            }),
            1 => Ok(()),
            _ => Err(MappingError::TooManyId {
                entity: entity.original_full_name().to_string(),
            }),
        }
    }

    /// Run the field and id checks on every admitted entity, in admission order.
    pub fn validate_all(&self) -> MappingResult<()> {
        for entity in &self.entities {
            self.check_conflicting_fields(entity)?;
            self.check_id_binding(entity)?;
        }
        Ok(())
    }

    /// Get an entity by its case-sensitive table name.
    pub fn entity_by_table_name(&self, table: &str) -> Option<&EntityDescriptor> {
        self.table_index.get(table).map(|&i| &self.entities[i])
    }

    /// Get the entity mapped from the given type.
    pub fn bound_entity(&self, handle: &TypeHandle) -> Option<&EntityDescriptor> {
        self.entities.iter().find(|e| e.type_handle() == handle)
    }

    /// Get an entity by its short class name.
    ///
    /// Two classes in different modules may share a short name
    /// (`billing::User` and `admin::User`). The first admitted match is
    /// returned in that case; use [`bound_entity`](Self::bound_entity) when
    /// the type is at hand.
    pub fn entity_by_class_name(&self, simple_name: &str) -> Option<&EntityDescriptor> {
        self.entities
            .iter()
            .find(|e| e.original_name() == simple_name)
    }

    /// All entities in admission order.
    pub fn entities(&self) -> &[EntityDescriptor] {
        &self.entities
    }

    /// All table names in admission order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.generated_name())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Physical schema view for the SQL layer.
    pub fn resolved(&self) -> ResolvedSchema {
        ResolvedSchema::from_entities(&self.entities)
    }
}

/// Registry shared between threads.
///
/// Hold the write lock across [`SchemaRegistry::add_entity`] so that the
/// duplicate check and the insert happen under one lock scope.
pub type SharedSchemaRegistry = Arc<RwLock<SchemaRegistry>>;

/// Create a new shared registry.
pub fn new_shared_registry() -> SharedSchemaRegistry {
    Arc::new(RwLock::new(SchemaRegistry::new()))
}
