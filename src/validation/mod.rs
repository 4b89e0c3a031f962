//! Validation functionality
//!
//! Provides validation logic for:
//! - Table definitions (schema shape plus business rules)
//! - Metric definitions
//! - Input validation and sanitization for generated SQL
//! - Batch reports in the JSON shape consumed by reporting tools
//! - Syntax smoke checks of generated SQL

pub mod finding;
pub mod input;
pub mod metrics;
pub mod report;
pub mod schema;
pub mod sql;
pub mod tables;

pub use finding::{FindingKind, Severity, ValidationFinding, ValidationResult};
pub use input::{
    ValidationError, escape_sql_literal, sanitize_comment, sanitize_sql_identifier,
    validate_field_name, validate_table_name,
};
pub use metrics::MetricValidator;
pub use report::{
    DefinitionKind, DefinitionStats, ReportBuilder, ReportData, ReportError, ReportStatus,
    ValidationReport, validate_metric_documents, validate_table_documents,
};
pub use schema::{validate_metric_schema, validate_table_schema};
pub use sql::validate_sql_syntax;
pub use tables::TableValidator;
