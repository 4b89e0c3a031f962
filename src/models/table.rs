//! Table model for the SDK

use super::enums::UpdateFrequency;
use super::field::FieldDefinition;
use super::placeholder::{is_missing, is_unfilled};
use serde::{Deserialize, Serialize};

/// One warehouse table's declared shape, recovered from a table-definition
/// document.
///
/// Constructed once per parse and not mutated by the pipeline afterwards.
/// Parsing the same text twice yields equal records.
///
/// # Example
///
/// ```rust
/// use dw_definition_sdk::models::{FieldDefinition, TableDefinition};
///
/// let table = TableDefinition::new("dw.sales_daily")
///     .with_fields(vec![FieldDefinition::new("order_id", "STRING")])
///     .with_partition_keys(vec!["dt".to_string()]);
/// assert_eq!(table.table_part(), "sales_daily");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    /// Qualified name, `database.table`
    pub name: String,
    /// Human-readable label
    #[serde(default)]
    pub display_name: String,
    /// Business description
    #[serde(default)]
    pub description: String,
    /// Responsible person; `None` when absent or still the placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub update_frequency: UpdateFrequency,
    /// Ordered column declarations
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Names of partition columns, excluded from the main column list in SQL
    #[serde(default)]
    pub partition_keys: Vec<String>,
    /// Informational index notes
    #[serde(default)]
    pub indexes: Vec<String>,
    /// Upstream tables or systems
    #[serde(default)]
    pub data_sources: Vec<String>,
    /// Downstream consumers, informational
    #[serde(default)]
    pub consumers: Vec<String>,
    /// Free-text quality rules, informational
    #[serde(default)]
    pub quality_rules: Vec<String>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_partition_keys(mut self, keys: Vec<String>) -> Self {
        self.partition_keys = keys;
        self
    }

    pub fn with_data_sources(mut self, sources: Vec<String>) -> Self {
        self.data_sources = sources;
        self
    }

    /// Database portion of the qualified name (before the first dot)
    pub fn database_part(&self) -> &str {
        self.name.split_once('.').map(|(db, _)| db).unwrap_or("")
    }

    /// Table-local portion of the qualified name (after the first dot)
    pub fn table_part(&self) -> &str {
        self.name
            .split_once('.')
            .map(|(_, table)| table)
            .unwrap_or(&self.name)
    }

    /// Whether an owner is declared. The placeholder counts as absent.
    pub fn has_owner(&self) -> bool {
        self.declared_owner().is_some()
    }

    /// The owner, unless it is empty or still the placeholder
    pub fn declared_owner(&self) -> Option<&str> {
        self.owner.as_deref().filter(|owner| !is_unfilled(owner))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_partitioned_by(&self, key: &str) -> bool {
        self.partition_keys.iter().any(|k| k == key)
    }

    /// Fields that are not partition keys, in declaration order
    pub fn regular_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields
            .iter()
            .filter(move |f| !self.is_partitioned_by(&f.name))
    }

    /// Declared fields that are partition keys, in declaration order
    pub fn partition_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields
            .iter()
            .filter(move |f| self.is_partitioned_by(&f.name))
    }

    /// Data sources with placeholder and "unspecified" entries removed
    pub fn effective_data_sources(&self) -> Vec<&str> {
        self.data_sources
            .iter()
            .map(String::as_str)
            .filter(|s| !is_missing(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::placeholder::{PLACEHOLDER, UNSPECIFIED};

    #[test]
    fn placeholder_owner_is_not_an_owner() {
        let table = TableDefinition::new("dw.t").with_owner(PLACEHOLDER);
        assert!(!table.has_owner());
        assert!(TableDefinition::new("dw.t").with_owner("张三").has_owner());
        assert!(!TableDefinition::new("dw.t").has_owner());
    }

    #[test]
    fn unspecified_owner_is_kept() {
        let table = TableDefinition::new("dw.t").with_owner(UNSPECIFIED);
        assert!(table.has_owner());
        assert_eq!(table.declared_owner(), Some(UNSPECIFIED));
    }

    #[test]
    fn regular_fields_skip_partition_keys() {
        let table = TableDefinition::new("dw.t")
            .with_fields(vec![
                FieldDefinition::new("id", "INT"),
                FieldDefinition::new("dt", "STRING"),
            ])
            .with_partition_keys(vec!["dt".to_string()]);
        let names: Vec<&str> = table.regular_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id"]);
        let keys: Vec<&str> = table.partition_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(keys, vec!["dt"]);
    }

    #[test]
    fn effective_sources_drop_sentinels() {
        let table = TableDefinition::new("dw.t").with_data_sources(vec![
            PLACEHOLDER.to_string(),
            UNSPECIFIED.to_string(),
            "ods.orders".to_string(),
        ]);
        assert_eq!(table.effective_data_sources(), vec!["ods.orders"]);
    }

    #[test]
    fn name_parts() {
        let table = TableDefinition::new("dw.sales_daily");
        assert_eq!(table.database_part(), "dw");
        assert_eq!(table.table_part(), "sales_daily");
        assert_eq!(TableDefinition::new("orphan").table_part(), "orphan");
    }
}
