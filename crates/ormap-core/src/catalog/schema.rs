//! Resolved physical schema handed to the SQL layer.

use super::entity::EntityDescriptor;
use super::field::FieldDescriptor;
use serde::Serialize;

/// Physical view of every admitted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSchema {
    /// Tables in admission order.
    pub tables: Vec<ResolvedTable>,
}

/// One physical table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTable {
    /// Physical table name.
    pub name: String,
    /// Fully qualified name of the mapped class.
    pub class: String,
    /// Columns in field order.
    pub columns: Vec<ResolvedColumn>,
    /// Name of the id column.
    pub id_column: Option<String>,
    /// Name of the auto-increment column.
    pub auto_increment_column: Option<String>,
    /// Number of foreign key columns.
    pub foreign_key_count: usize,
}

/// One physical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColumn {
    /// Physical column name.
    pub name: String,
    /// Declared field name.
    pub field: String,
    /// Physical data type.
    pub column_type: Option<String>,
    pub id: bool,
    pub auto_increment: bool,
    pub foreign_key: bool,
}

impl ResolvedSchema {
    /// Build the view from admitted entities.
    pub fn from_entities(entities: &[EntityDescriptor]) -> Self {
        Self {
            tables: entities.iter().map(ResolvedTable::from).collect(),
        }
    }

    /// Get a table by physical name.
    pub fn table(&self, name: &str) -> Option<&ResolvedTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}

impl ResolvedTable {
    /// Get a column by physical name.
    pub fn column(&self, name: &str) -> Option<&ResolvedColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

fn column_name(field: &FieldDescriptor) -> String {
    field.generated_name().unwrap_or_default().to_string()
}

impl From<&EntityDescriptor> for ResolvedTable {
    fn from(entity: &EntityDescriptor) -> Self {
        Self {
            name: entity.generated_name().to_string(),
            class: entity.original_full_name().to_string(),
            columns: entity.fields().iter().map(ResolvedColumn::from).collect(),
            id_column: entity.id_field().map(column_name),
            auto_increment_column: entity.auto_increment_field().map(column_name),
            foreign_key_count: entity.foreign_key_count(),
        }
    }
}

impl From<&FieldDescriptor> for ResolvedColumn {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            name: column_name(field),
            field: field.original_name().to_string(),
            column_type: field.column_type().map(String::from),
            id: field.is_id(),
            auto_increment: field.is_auto_increment(),
            foreign_key: field.is_foreign_key(),
        }
    }
}
