//! Table validation functionality
//!
//! Runs the business rules over a [`TableDefinition`]. Each check is
//! independent and appends zero or more findings; none short-circuits the
//! others, and the pooled findings are partitioned into errors and warnings
//! at the end.

use super::finding::{FindingKind, ValidationFinding, ValidationResult};
use super::input::{
    MAX_TABLE_PART_LENGTH, MIN_DESCRIPTION_LENGTH, MIN_FIELD_DESCRIPTION_LENGTH, text_length,
    validate_field_name, validate_table_name,
};
use super::schema::validate_table_schema;
use crate::models::TableDefinition;
use std::collections::HashMap;
use tracing::debug;

type TableCheck = fn(&TableDefinition, &mut Vec<ValidationFinding>);

/// Checks in reporting order
const CHECKS: &[TableCheck] = &[
    check_schema,
    check_name,
    check_fields,
    check_owner,
    check_description,
    check_data_sources,
];

/// Table validator
#[derive(Debug, Default, Clone, Copy)]
pub struct TableValidator;

impl TableValidator {
    /// Create a new table validator
    ///
    /// # Example
    ///
    /// ```rust
    /// use dw_definition_sdk::models::{FieldDefinition, TableDefinition};
    /// use dw_definition_sdk::validation::tables::TableValidator;
    ///
    /// let table = TableDefinition::new("dw.sales_daily")
    ///     .with_description("每日销售汇总明细数据")
    ///     .with_owner("张三")
    ///     .with_fields(vec![FieldDefinition::new("order_id", "STRING").with_description("订单号")])
    ///     .with_data_sources(vec!["ods.orders".to_string()]);
    ///
    /// let result = TableValidator::new().validate(&table);
    /// assert!(result.valid);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Run every table check and pool the findings
    pub fn validate(&self, table: &TableDefinition) -> ValidationResult {
        let mut findings = Vec::new();
        for check in CHECKS {
            check(table, &mut findings);
        }

        let result = ValidationResult::from_findings(findings);
        debug!(
            table = %table.name,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Validated table definition"
        );
        result
    }
}

fn check_schema(table: &TableDefinition, findings: &mut Vec<ValidationFinding>) {
    findings.extend(validate_table_schema(table));
}

fn check_name(table: &TableDefinition, findings: &mut Vec<ValidationFinding>) {
    if validate_table_name(&table.name).is_err() {
        findings.push(
            ValidationFinding::error(
                FindingKind::InvalidTableName,
                format!(
                    "Table name '{}' must be database.table in lowercase letters and underscores",
                    table.name
                ),
            )
            .at("name"),
        );
    }

    let table_part = table.table_part();
    if table_part.chars().count() > MAX_TABLE_PART_LENGTH {
        findings.push(
            ValidationFinding::warning(
                FindingKind::TableNameTooLong,
                format!(
                    "Table name '{}' is longer than {} characters",
                    table_part, MAX_TABLE_PART_LENGTH
                ),
            )
            .at("name"),
        );
    }
}

fn check_fields(table: &TableDefinition, findings: &mut Vec<ValidationFinding>) {
    let duplicates = duplicate_names(table.fields.iter().map(|f| f.name.as_str()));
    if !duplicates.is_empty() {
        findings.push(
            ValidationFinding::error(
                FindingKind::DuplicateFieldNames,
                format!("Duplicate field names: {}", duplicates.join(", ")),
            )
            .at("fields"),
        );
    }

    for (idx, field) in table.fields.iter().enumerate() {
        if validate_field_name(&field.name).is_err() {
            findings.push(
                ValidationFinding::error(
                    FindingKind::InvalidFieldName,
                    format!(
                        "Field name '{}' must start with a lowercase letter or underscore",
                        field.name
                    ),
                )
                .at(format!("fields[{}].name", idx)),
            );
        }
        if text_length(&field.description) < MIN_FIELD_DESCRIPTION_LENGTH {
            findings.push(
                ValidationFinding::warning(
                    FindingKind::ShortFieldDescription,
                    format!("Field '{}' has no meaningful description", field.name),
                )
                .at(format!("fields[{}].description", idx)),
            );
        }
    }
}

fn check_owner(table: &TableDefinition, findings: &mut Vec<ValidationFinding>) {
    if !table.has_owner() {
        findings.push(
            ValidationFinding::error(FindingKind::MissingOwner, "Table has no owner").at("owner"),
        );
    }
}

fn check_description(table: &TableDefinition, findings: &mut Vec<ValidationFinding>) {
    if text_length(&table.description) < MIN_DESCRIPTION_LENGTH {
        findings.push(
            ValidationFinding::warning(
                FindingKind::ShortDescription,
                format!(
                    "Table description should be at least {} characters",
                    MIN_DESCRIPTION_LENGTH
                ),
            )
            .at("description"),
        );
    }
}

fn check_data_sources(table: &TableDefinition, findings: &mut Vec<ValidationFinding>) {
    if table.effective_data_sources().is_empty() {
        findings.push(
            ValidationFinding::error(FindingKind::MissingDataSource, "Table has no data source")
                .at("dataSources"),
        );
    }
}

/// Names occurring more than once, each listed once in order of first
/// appearance
fn duplicate_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for name in names {
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }
    order.into_iter().filter(|name| counts[name] > 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldDefinition;
    use crate::models::placeholder::PLACEHOLDER;

    fn sales_daily() -> TableDefinition {
        TableDefinition::new("dw.sales_daily")
            .with_description("每日销售汇总数据，按订单粒度")
            .with_owner("张三")
            .with_fields(vec![
                FieldDefinition::new("order_id", "STRING")
                    .with_description("订单号")
                    .required(),
                FieldDefinition::new("amount", "DECIMAL").with_description("金额"),
            ])
            .with_partition_keys(vec!["dt".to_string()])
            .with_data_sources(vec!["ods.orders".to_string()])
    }

    #[test]
    fn well_formed_table_is_valid() {
        let result = TableValidator::new().validate(&sales_daily());
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn duplicates_are_listed_once() {
        assert_eq!(duplicate_names(["x", "y", "x", "x"].into_iter()), vec!["x"]);
        assert_eq!(
            duplicate_names(["b", "a", "a", "b", "c"].into_iter()),
            vec!["b", "a"]
        );
    }

    #[test]
    fn placeholder_owner_is_an_error() {
        let table = sales_daily().with_owner(PLACEHOLDER);
        let result = TableValidator::new().validate(&table);
        assert!(!result.valid);
        assert!(result.has_kind(FindingKind::MissingOwner));
    }

    #[test]
    fn short_description_fires_at_both_layers() {
        let table = sales_daily().with_description("短描述");
        let result = TableValidator::new().validate(&table);
        assert!(
            result
                .errors
                .iter()
                .any(|f| f.kind == FindingKind::SchemaError
                    && f.path.as_deref() == Some("description"))
        );
        assert!(
            result
                .warnings
                .iter()
                .any(|f| f.kind == FindingKind::ShortDescription)
        );
    }

    #[test]
    fn long_table_part_is_a_warning() {
        let mut table = sales_daily();
        table.name = format!("dw.{}", "a".repeat(MAX_TABLE_PART_LENGTH + 1));
        let result = TableValidator::new().validate(&table);
        assert!(result.valid);
        assert!(result.has_kind(FindingKind::TableNameTooLong));
    }

    #[test]
    fn unspecified_sources_do_not_count() {
        let table =
            sales_daily().with_data_sources(vec![PLACEHOLDER.to_string(), "未指定".to_string()]);
        let result = TableValidator::new().validate(&table);
        assert!(result.has_kind(FindingKind::MissingDataSource));
    }
}
