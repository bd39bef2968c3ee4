//! Mapping bootstrap.
//!
//! A [`MappingSession`] runs the steps that turn declared classes into a
//! validated [`SchemaRegistry`]: inspect each class, bind physical names,
//! admit the entity, then validate every admitted entity at the end.

use crate::catalog::{ClassInfo, EntityDescriptor, InspectedEntity, Inspector, SchemaRegistry};
use crate::config::MappingConfig;
use crate::error::MappingResult;
use crate::naming;
use tracing::{debug, info, instrument};

/// Bind table and column names to an inspected entity.
///
/// Custom names from the entity marker or a field override are used as
/// they are. Everything else is formatted with the configured policies.
pub fn bind_names(entity: InspectedEntity, config: &MappingConfig) -> EntityDescriptor {
    let table = match entity.custom_name() {
        Some(custom) => custom.to_string(),
        None => naming::format(entity.original_name(), config.table_naming),
    };
    let column_naming = config.column_naming;

    debug!(entity = %entity.original_full_name(), table = %table, "bound table name");

    entity
        .map_fields(|field| {
            let column = match field.custom_name() {
                Some(custom) => custom.to_string(),
                None => naming::format(field.original_name(), column_naming),
            };
            field.with_generated_name(column)
        })
        .bind(table)
}

/// Sequencer for one mapping bootstrap.
pub struct MappingSession<'a, I: Inspector + ?Sized> {
    config: MappingConfig,
    inspector: &'a I,
    registry: SchemaRegistry,
}

impl<'a, I: Inspector + ?Sized> MappingSession<'a, I> {
    /// Create a session with an empty registry.
    pub fn new(config: MappingConfig, inspector: &'a I) -> Self {
        Self {
            config,
            inspector,
            registry: SchemaRegistry::new(),
        }
    }

    /// Inspect, name, and admit one class.
    #[instrument(skip_all, fields(class = %class.full_name))]
    pub fn register(&mut self, class: &ClassInfo) -> MappingResult<()> {
        let inspected = EntityDescriptor::inspect(class, self.inspector)?;
        let entity = bind_names(inspected, &self.config);
        self.registry.add_entity(entity)
    }

    /// Register classes in order, stopping at the first failure.
    pub fn register_all<'c>(
        &mut self,
        classes: impl IntoIterator<Item = &'c ClassInfo>,
    ) -> MappingResult<()> {
        for class in classes {
            self.register(class)?;
        }
        Ok(())
    }

    /// Naming configuration of this session.
    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Entities admitted so far.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Validate every admitted entity and hand over the registry.
    pub fn finish(self) -> MappingResult<SchemaRegistry> {
        self.registry.validate_all()?;
        info!(entities = self.registry.len(), "mapping validated");
        Ok(self.registry)
    }
}
