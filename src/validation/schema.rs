//! Shape checks for definition records
//!
//! Every violation is an error-severity [`FindingKind::SchemaError`] finding
//! whose `path` names the offending attribute in its serialized (camelCase)
//! form.

use super::finding::{FindingKind, ValidationFinding};
use super::input::{
    MIN_DESCRIPTION_LENGTH, text_length, validate_field_name, validate_table_name,
};
use crate::models::{MetricDefinition, TableDefinition};

/// Shape checks for a table record: name pattern, description length, at
/// least one field, per-field name pattern and a non-empty type.
pub fn validate_table_schema(table: &TableDefinition) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();

    if let Err(e) = validate_table_name(&table.name) {
        findings.push(schema_error(e.to_string(), "name"));
    }

    if text_length(&table.description) < MIN_DESCRIPTION_LENGTH {
        findings.push(schema_error(
            format!(
                "description must be at least {} characters",
                MIN_DESCRIPTION_LENGTH
            ),
            "description",
        ));
    }

    if table.fields.is_empty() {
        findings.push(schema_error("at least one field is required", "fields"));
    }

    for (idx, field) in table.fields.iter().enumerate() {
        if let Err(e) = validate_field_name(&field.name) {
            findings.push(schema_error(e.to_string(), format!("fields[{}].name", idx)));
        }
        if field.data_type.trim().is_empty() {
            findings.push(schema_error(
                format!("field '{}' has no type", field.name),
                format!("fields[{}].type", idx),
            ));
        }
    }

    findings
}

/// Shape checks for a metric record: a name, a business definition and a
/// formula must be present.
pub fn validate_metric_schema(metric: &MetricDefinition) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();

    if metric.name.trim().is_empty() {
        findings.push(schema_error("name cannot be empty", "name"));
    }
    if metric.business_definition.trim().is_empty() {
        findings.push(schema_error(
            "business definition cannot be empty",
            "businessDefinition",
        ));
    }
    if metric.formula.trim().is_empty() {
        findings.push(schema_error("formula cannot be empty", "formula"));
    }

    findings
}

fn schema_error(message: impl Into<String>, path: impl Into<String>) -> ValidationFinding {
    ValidationFinding::error(FindingKind::SchemaError, message).at(path)
}
