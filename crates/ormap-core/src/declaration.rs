//! JSON schema declarations.
//!
//! A declaration file lists mapped classes by name, with the same facts an
//! annotation-driven inspector would extract:
//!
//! ```json
//! {
//!   "naming": { "table_naming": { "uppercase": false } },
//!   "entities": [
//!     {
//!       "class": "shop::Order",
//!       "fields": [
//!         { "name": "id", "type": "i64", "column_type": "BIGINT",
//!           "id": true, "auto_increment": true }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::catalog::{
    ClassInfo, DeclaredInspector, DefaultConstructor, EntityMarker, FieldDescriptor,
    LoadingPolicy, SchemaRegistry, TypeHandle,
};
use crate::config::MappingConfig;
use crate::error::{MappingError, MappingResult};
use crate::session::MappingSession;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::any::Any;
use std::path::Path;
use tracing::warn;

fn default_true() -> bool {
    true
}

/// A parsed declaration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDeclaration {
    /// Naming policies for tables and columns.
    #[serde(default)]
    pub naming: MappingConfig,
    /// Declared classes, in registration order.
    #[serde(default)]
    pub entities: Vec<EntityDeclaration>,
}

/// One declared class.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityDeclaration {
    /// Fully qualified class name.
    pub class: String,
    /// Whether the class carries the entity marker.
    #[serde(default = "default_true")]
    pub entity: bool,
    /// Table name override.
    #[serde(default)]
    pub table: Option<String>,
    /// Whether the class has a default constructor.
    #[serde(default = "default_true")]
    pub constructor: bool,
    /// Declared fields, in order.
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
}

/// One declared field.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDeclaration {
    /// Field name.
    pub name: String,
    /// Declared type name.
    #[serde(rename = "type")]
    pub declared_type: String,
    /// Physical data type.
    #[serde(default)]
    pub column_type: Option<String>,
    /// Column name override.
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub id: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub foreign_key: bool,
    #[serde(default)]
    pub load: LoadingPolicy,
}

impl SchemaDeclaration {
    /// Parse a declaration from JSON text.
    pub fn from_json_str(json: &str) -> MappingResult<Self> {
        serde_json::from_str(json).map_err(|e| MappingError::InvalidDeclaration(e.to_string()))
    }

    /// Read and parse a declaration file.
    pub fn from_path(path: impl AsRef<Path>) -> MappingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Class handles in declaration order.
    pub fn classes(&self) -> Vec<ClassInfo> {
        self.entities.iter().map(EntityDeclaration::class_info).collect()
    }

    /// Inspector answering for every declared class.
    ///
    /// A class listed more than once keeps its first declaration.
    pub fn inspector(&self) -> DeclaredInspector {
        let mut inspector = DeclaredInspector::new();
        for entity in &self.entities {
            let handle = TypeHandle::declared(&entity.class);
            if inspector.is_declared(&handle) {
                warn!(class = %entity.class, "ignoring repeated class declaration");
                continue;
            }
            let fields: Vec<FieldDescriptor> =
                entity.fields.iter().map(FieldDeclaration::descriptor).collect();
            let constructor = entity.constructor.then(|| entity.record_constructor());
            inspector.declare_class(handle, fields, constructor);
        }
        inspector
    }

    /// Run the full bootstrap with the declared naming configuration.
    pub fn build(&self) -> MappingResult<SchemaRegistry> {
        self.build_with(self.naming)
    }

    /// Run the full bootstrap with an explicit naming configuration.
    pub fn build_with(&self, config: MappingConfig) -> MappingResult<SchemaRegistry> {
        let inspector = self.inspector();
        let mut session = MappingSession::new(config, &inspector);
        session.register_all(&self.classes())?;
        session.finish()
    }
}

impl EntityDeclaration {
    fn class_info(&self) -> ClassInfo {
        let class = ClassInfo::declared(&self.class);
        if !self.entity {
            return class;
        }
        match &self.table {
            Some(table) => class.with_marker(EntityMarker::with_table(table)),
            None => class.entity(),
        }
    }

    // Declared classes instantiate as a JSON record with every field null.
    fn record_constructor(&self) -> DefaultConstructor {
        let record: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), Value::Null))
            .collect();
        DefaultConstructor::new(move || Box::new(record.clone()) as Box<dyn Any + Send>)
    }
}

impl FieldDeclaration {
    fn descriptor(&self) -> FieldDescriptor {
        let mut field = FieldDescriptor::new(&self.name, TypeHandle::declared(&self.declared_type))
            .with_load(self.load);
        if self.id {
            field = field.with_id();
        }
        if self.auto_increment {
            field = field.with_auto_increment();
        }
        if self.foreign_key {
            field = field.with_foreign_key();
        }
        if let Some(column_type) = &self.column_type {
            field = field.with_column_type(column_type);
        }
        if let Some(column) = &self.column {
            field = field.with_custom_name(column);
        }
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Inspector;

    const SHOP: &str = r#"{
        "entities": [
            {
                "class": "shop::Order",
                "fields": [
                    { "name": "id", "type": "i64", "column_type": "BIGINT", "id": true, "auto_increment": true },
                    { "name": "customerId", "type": "i64", "column_type": "BIGINT", "foreign_key": true, "load": "lazy" }
                ]
            },
            {
                "class": "shop::OrderItem",
                "table": "line_items",
                "fields": [
                    { "name": "id", "type": "i64", "column_type": "BIGINT", "id": true },
                    { "name": "sku", "type": "String", "column_type": "VARCHAR", "column": "sku_code" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_defaults() {
        let declaration = SchemaDeclaration::from_json_str(SHOP).unwrap();

        assert_eq!(declaration.naming, MappingConfig::default());
        assert_eq!(declaration.entities.len(), 2);
        assert!(declaration.entities[0].entity);
        assert!(declaration.entities[0].constructor);
        assert_eq!(declaration.entities[0].fields[1].load, LoadingPolicy::Lazy);
    }

    #[test]
    fn test_parse_invalid() {
        let err = SchemaDeclaration::from_json_str(r#"{"entities": [{"fields": []}]}"#).unwrap_err();
        assert!(matches!(err, MappingError::InvalidDeclaration(_)));

        let err = SchemaDeclaration::from_json_str(r#"{"tables": []}"#).unwrap_err();
        assert!(matches!(err, MappingError::InvalidDeclaration(_)));
    }

    #[test]
    fn test_build() {
        let registry = SchemaDeclaration::from_json_str(SHOP).unwrap().build().unwrap();

        let order = registry.entity_by_table_name("order").unwrap();
        assert_eq!(order.original_name(), "Order");
        assert_eq!(order.foreign_key_count(), 1);
        assert_eq!(
            order.field("customerId").unwrap().generated_name(),
            Some("customer_id")
        );
        assert_eq!(order.field("customerId").unwrap().load(), LoadingPolicy::Lazy);

        let items = registry.entity_by_table_name("line_items").unwrap();
        assert_eq!(items.field("sku").unwrap().generated_name(), Some("sku_code"));
    }

    #[test]
    fn test_record_constructor() {
        let registry = SchemaDeclaration::from_json_str(SHOP).unwrap().build().unwrap();
        let order = registry.entity_by_class_name("Order").unwrap();

        let instance = order.default_constructor().instantiate();
        let record = instance.downcast_ref::<Map<String, Value>>().unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record["customerId"], Value::Null);
    }

    #[test]
    fn test_repeated_class_keeps_first_declaration() {
        let json = r#"{
            "entities": [
                {
                    "class": "shop::Order",
                    "fields": [{ "name": "id", "type": "i64", "column_type": "BIGINT", "id": true }]
                },
                {
                    "class": "shop::Order",
                    "fields": [{ "name": "code", "type": "String", "column_type": "VARCHAR" }]
                }
            ]
        }"#;
        let declaration = SchemaDeclaration::from_json_str(json).unwrap();

        let inspector = declaration.inspector();
        let class = ClassInfo::declared("shop::Order");
        assert!(inspector.is_declared(&class.handle));
        let fields = inspector.fields(&class).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].original_name(), "id");

        let err = declaration.build().unwrap_err();
        assert!(matches!(err, MappingError::DuplicateTableNames { .. }));
    }

    #[test]
    fn test_build_missing_marker_and_constructor() {
        let json = r#"{"entities": [{"class": "shop::Draft", "entity": false}]}"#;
        let err = SchemaDeclaration::from_json_str(json).unwrap().build().unwrap_err();
        assert!(matches!(err, MappingError::NotAnEntity { .. }));

        let json = r#"{"entities": [{"class": "shop::Draft", "constructor": false}]}"#;
        let err = SchemaDeclaration::from_json_str(json).unwrap().build().unwrap_err();
        assert!(matches!(err, MappingError::MissingDefaultConstructor { .. }));
    }
}
