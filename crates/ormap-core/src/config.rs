//! Mapping configuration.

use crate::naming::NamingPolicy;
use serde::{Deserialize, Serialize};

/// Naming configuration for a mapping session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Policy applied to entity names to derive table names.
    pub table_naming: NamingPolicy,

    /// Policy applied to field names to derive column names.
    pub column_naming: NamingPolicy,
}

impl MappingConfig {
    /// Create a configuration using `policy` for both tables and columns.
    pub fn new(policy: NamingPolicy) -> Self {
        Self {
            table_naming: policy,
            column_naming: policy,
        }
    }

    /// Set the table naming policy.
    pub fn with_table_naming(mut self, policy: NamingPolicy) -> Self {
        self.table_naming = policy;
        self
    }

    /// Set the column naming policy.
    pub fn with_column_naming(mut self, policy: NamingPolicy) -> Self {
        self.column_naming = policy;
        self
    }

    /// Set both policies.
    pub fn with_naming(self, policy: NamingPolicy) -> Self {
        self.with_table_naming(policy).with_column_naming(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = MappingConfig::default()
            .with_table_naming(NamingPolicy::underscore().with_uppercase(true))
            .with_column_naming(NamingPolicy::camel());

        assert!(config.table_naming.is_uppercase());
        assert!(!config.column_naming.use_underscore());

        let config = config.with_naming(NamingPolicy::underscore());
        assert_eq!(config, MappingConfig::default());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: MappingConfig =
            serde_json::from_str(r#"{"table_naming": {"uppercase": true}}"#).unwrap();

        assert!(config.table_naming.is_uppercase());
        assert!(config.table_naming.use_underscore());
        assert_eq!(config.column_naming, NamingPolicy::default());
    }
}
