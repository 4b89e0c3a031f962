//! Batch validation report
//!
//! Aggregates per-definition results into the JSON payload consumed by
//! reporting tools:
//!
//! ```json
//! {"status": "failed",
//!  "data": {"tables": {"total": 2, "passed": 1, "failed": 1, "warnings": 3},
//!           "metrics": {"total": 0, "passed": 0, "failed": 0, "warnings": 0}},
//!  "errors": [...],
//!  "timestamp": "2024-01-15T08:00:00Z"}
//! ```
//!
//! A document that cannot be extracted is counted as failed and reported
//! alongside validation findings; the rest of the batch still runs.

use super::finding::{FindingKind, ValidationResult};
use super::metrics::MetricValidator;
use super::tables::TableValidator;
use crate::import::{ImportError, MetricDefinitionImporter, TableDefinitionImporter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Overall outcome of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Success,
    Failed,
}

/// Which kind of definition a report entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Table,
    Metric,
}

/// Counters for one kind of definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Total number of warning findings across all definitions
    pub warnings: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub tables: DefinitionStats,
    pub metrics: DefinitionStats,
}

/// One error-severity entry in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    pub definition: DefinitionKind,
    /// Name of the definition, or the document name when extraction failed
    pub name: String,
    pub kind: FindingKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ReportStatus,
    pub data: ReportData,
    pub errors: Vec<ReportError>,
    pub timestamp: DateTime<Utc>,
}

impl ValidationReport {
    pub fn is_success(&self) -> bool {
        self.status == ReportStatus::Success
    }
}

/// Accumulates results and extraction failures into a [`ValidationReport`]
#[derive(Debug, Default)]
pub struct ReportBuilder {
    data: ReportData,
    errors: Vec<ReportError>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the validation result of one definition
    pub fn add_result(&mut self, definition: DefinitionKind, name: &str, result: &ValidationResult) {
        let stats = self.stats_mut(definition);
        stats.total += 1;
        stats.warnings += result.warnings.len();
        if result.valid {
            stats.passed += 1;
        } else {
            stats.failed += 1;
        }

        self.errors
            .extend(result.errors.iter().map(|finding| ReportError {
                definition,
                name: name.to_string(),
                kind: finding.kind,
                message: finding.message.clone(),
                path: finding.path.clone(),
            }));
    }

    /// Record a document that could not be extracted
    pub fn add_extraction_failure(
        &mut self,
        definition: DefinitionKind,
        document: &str,
        error: &ImportError,
    ) {
        warn!(document, error = %error, "Skipping document that could not be extracted");
        let stats = self.stats_mut(definition);
        stats.total += 1;
        stats.failed += 1;
        self.errors.push(ReportError {
            definition,
            name: document.to_string(),
            kind: FindingKind::ExtractionFailed,
            message: error.to_string(),
            path: None,
        });
    }

    /// Extract and validate one table document
    pub fn check_table_document(&mut self, document: &str, content: &str) {
        match TableDefinitionImporter::new().parse(content) {
            Ok(table) => {
                let result = TableValidator::new().validate(&table);
                self.add_result(DefinitionKind::Table, &table.name, &result);
            }
            Err(e) => self.add_extraction_failure(DefinitionKind::Table, document, &e),
        }
    }

    /// Extract and validate one metric document
    pub fn check_metric_document(&mut self, document: &str, content: &str) {
        match MetricDefinitionImporter::new().parse(content) {
            Ok(metric) => {
                let result = MetricValidator::new().validate(&metric);
                self.add_result(DefinitionKind::Metric, &metric.name, &result);
            }
            Err(e) => self.add_extraction_failure(DefinitionKind::Metric, document, &e),
        }
    }

    /// Finish the report, stamped with the current time
    pub fn build(self) -> ValidationReport {
        self.build_at(Utc::now())
    }

    pub fn build_at(self, timestamp: DateTime<Utc>) -> ValidationReport {
        let status = if self.errors.is_empty() {
            ReportStatus::Success
        } else {
            ReportStatus::Failed
        };
        ValidationReport {
            status,
            data: self.data,
            errors: self.errors,
            timestamp,
        }
    }

    fn stats_mut(&mut self, definition: DefinitionKind) -> &mut DefinitionStats {
        match definition {
            DefinitionKind::Table => &mut self.data.tables,
            DefinitionKind::Metric => &mut self.data.metrics,
        }
    }
}

/// Validate a batch of `(document name, text)` table documents
pub fn validate_table_documents<'a>(
    documents: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> ValidationReport {
    let mut builder = ReportBuilder::new();
    for (document, content) in documents {
        builder.check_table_document(document, content);
    }
    builder.build()
}

/// Validate a batch of `(document name, text)` metric documents
pub fn validate_metric_documents<'a>(
    documents: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> ValidationReport {
    let mut builder = ReportBuilder::new();
    for (document, content) in documents {
        builder.check_metric_document(document, content);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const GOOD: &str = "# Table definition: dw.sales_daily

- **Description:** 每日销售汇总数据，按订单粒度
- **Owner:** 张三

## Field Definitions

| Field | Type | Description | Required |
|---|---|---|---|
| order_id | STRING | 订单号 | 是 |

## Data Sources

- ods.orders
";

    #[test]
    fn extraction_failure_does_not_abort_batch() {
        let report = validate_table_documents([("bad.md", "no title here"), ("good.md", GOOD)]);
        assert_eq!(report.status, ReportStatus::Failed);
        assert_eq!(report.data.tables.total, 2);
        assert_eq!(report.data.tables.passed, 1);
        assert_eq!(report.data.tables.failed, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, FindingKind::ExtractionFailed);
        assert_eq!(report.errors[0].name, "bad.md");
    }

    #[test]
    fn serialized_shape() {
        let mut builder = ReportBuilder::new();
        builder.check_table_document("good.md", GOOD);
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        let json = serde_json::to_value(builder.build_at(timestamp)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["tables"]["passed"], 1);
        assert_eq!(json["data"]["metrics"]["total"], 0);
        assert_eq!(json["timestamp"], "2024-01-15T08:00:00Z");
    }
}
