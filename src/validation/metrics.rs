//! Metric validation functionality

use super::finding::{FindingKind, ValidationFinding, ValidationResult};
use super::input::{MIN_DESCRIPTION_LENGTH, text_length};
use super::schema::validate_metric_schema;
use crate::models::MetricDefinition;
use crate::models::placeholder::is_missing;
use chrono::NaiveDate;
use tracing::debug;

/// Date format expected in change-history entries
pub const CHANGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Metric validator
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricValidator;

impl MetricValidator {
    /// Create a new metric validator
    pub fn new() -> Self {
        Self
    }

    /// Run every metric check and pool the findings.
    ///
    /// Missing name, business definition or formula are schema errors; a
    /// missing category, owner or data source is an error; a short business
    /// definition, no dimensions and malformed change dates are warnings.
    pub fn validate(&self, metric: &MetricDefinition) -> ValidationResult {
        let mut findings = validate_metric_schema(metric);

        if is_missing(&metric.category) {
            findings.push(
                ValidationFinding::error(FindingKind::MissingCategory, "Metric has no category")
                    .at("category"),
            );
        }

        let definition_length = text_length(&metric.business_definition);
        if definition_length > 0 && definition_length < MIN_DESCRIPTION_LENGTH {
            findings.push(
                ValidationFinding::warning(
                    FindingKind::ShortBusinessDefinition,
                    format!(
                        "Business definition should be at least {} characters",
                        MIN_DESCRIPTION_LENGTH
                    ),
                )
                .at("businessDefinition"),
            );
        }

        if !metric.has_owner() {
            findings.push(
                ValidationFinding::error(FindingKind::MissingOwner, "Metric has no owner")
                    .at("owner"),
            );
        }

        if is_missing(&metric.data_source) {
            findings.push(
                ValidationFinding::error(FindingKind::MissingDataSource, "Metric has no data source")
                    .at("dataSource"),
            );
        }

        if metric.dimensions.is_empty() {
            findings.push(
                ValidationFinding::warning(
                    FindingKind::MissingDimensions,
                    "Metric declares no analysis dimensions",
                )
                .at("dimensions"),
            );
        }

        for (idx, record) in metric.change_history.iter().enumerate() {
            if NaiveDate::parse_from_str(&record.date, CHANGE_DATE_FORMAT).is_err() {
                findings.push(
                    ValidationFinding::warning(
                        FindingKind::InvalidChangeDate,
                        format!("Change date '{}' is not YYYY-MM-DD", record.date),
                    )
                    .at(format!("changeHistory[{}].date", idx)),
                );
            }
        }

        let result = ValidationResult::from_findings(findings);
        debug!(
            metric = %metric.name,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Validated metric definition"
        );
        result
    }
}
