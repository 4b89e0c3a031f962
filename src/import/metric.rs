//! Metric definition importer
//!
//! Recovers a [`MetricDefinition`] from a metric-definition document.

use super::markdown::{MarkdownDocument, clean_inline, clean_list_item};
use super::table::{OWNER_LABELS, list_section};
use super::{Extraction, ExtractionReport, ImportError};
use crate::models::{ChangeRecord, MetricDefinition};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_METRIC_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:metric\s+definition|指标定义)\s*[:：]\s*`?([^`]+?)`?\s*$")
        .expect("Invalid regex")
});

const CATEGORY_LABELS: &[&str] = &["Category", "指标分类", "分类"];
const BUSINESS_DEFINITION_LABELS: &[&str] = &["Business Definition", "业务定义"];
const DATA_SOURCE_LABELS: &[&str] = &["Data Source", "数据来源"];

const BUSINESS_DEFINITION_SECTION: &[&str] = &["Business Definition", "业务定义"];
const BUSINESS_FORMULA_SECTION: &[&str] = &["Business Formula", "业务公式"];
const CALCULATION_FORMULA_SECTION: &[&str] = &["Calculation Formula", "计算公式"];
const SQL_LOGIC_SECTION: &[&str] = &["SQL Logic", "SQL逻辑"];
const SQL_IMPLEMENTATION_SECTION: &[&str] = &["SQL Implementation", "SQL实现"];
const DIMENSIONS_SECTION: &[&str] = &["Dimensions", "分析维度"];
const RELATED_METRICS_SECTION: &[&str] = &["Related Metrics", "相关指标"];
const CHANGE_HISTORY_SECTION: &[&str] = &["Change History", "变更历史"];

/// Importer for metric-definition documents
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricDefinitionImporter;

impl MetricDefinitionImporter {
    /// Create a new metric definition importer
    pub fn new() -> Self {
        Self
    }

    /// Parse a metric-definition document.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::NameNotFound`] when the first heading does not
    /// carry a `Metric definition: <name>` title.
    pub fn parse(&self, content: &str) -> Result<MetricDefinition, ImportError> {
        self.parse_with_report(content).map(|e| e.definition)
    }

    /// Parse a document and report which sections were found
    pub fn parse_with_report(
        &self,
        content: &str,
    ) -> Result<Extraction<MetricDefinition>, ImportError> {
        let doc = MarkdownDocument::parse(content);
        let name = extract_metric_name(&doc)?;
        let mut report = ExtractionReport::default();

        let business_definition = doc.label(BUSINESS_DEFINITION_LABELS).or_else(|| {
            doc.section(BUSINESS_DEFINITION_SECTION)
                .and_then(|s| s.paragraph())
        });

        // The business formula is canonical; the generic calculation block
        // is only a fallback.
        let formula_section =
            doc.section_with_fallback(&[BUSINESS_FORMULA_SECTION, CALCULATION_FORMULA_SECTION]);
        let formula = formula_section.and_then(|s| s.code_block());
        report.record(
            BUSINESS_FORMULA_SECTION[0],
            formula_section.is_some(),
            usize::from(formula.is_some()),
        );

        let sql_section =
            doc.section_with_fallback(&[SQL_LOGIC_SECTION, SQL_IMPLEMENTATION_SECTION]);
        let sql_logic = sql_section.and_then(|s| s.code_block());
        report.record(
            SQL_LOGIC_SECTION[0],
            sql_section.is_some(),
            usize::from(sql_logic.is_some()),
        );

        let dimensions = list_section(&doc, DIMENSIONS_SECTION, &mut report, false);
        let related_metrics = list_section(&doc, RELATED_METRICS_SECTION, &mut report, true);
        let change_history: Vec<ChangeRecord> =
            list_section(&doc, CHANGE_HISTORY_SECTION, &mut report, false)
                .iter()
                .map(|item| parse_change_record(item))
                .collect();

        let metric = MetricDefinition {
            name,
            category: doc.label(CATEGORY_LABELS).unwrap_or_default(),
            business_definition: business_definition.unwrap_or_default(),
            owner: doc.label(OWNER_LABELS),
            formula: formula.unwrap_or_default(),
            sql_logic,
            data_source: doc.label(DATA_SOURCE_LABELS).unwrap_or_default(),
            dimensions,
            related_metrics,
            change_history,
        };

        debug!(
            metric = %metric.name,
            missing = ?report.missing_sections(),
            "Parsed metric definition"
        );

        Ok(Extraction {
            definition: metric,
            report,
        })
    }
}

fn extract_metric_name(doc: &MarkdownDocument<'_>) -> Result<String, ImportError> {
    doc.title()
        .and_then(|title| RE_METRIC_TITLE.captures(title))
        .and_then(|caps| caps.get(1))
        .map(|m| clean_inline(m.as_str()))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ImportError::NameNotFound(
                "document has no '# Metric definition: <name>' heading".to_string(),
            )
        })
}

/// `2024-01-15: initial version` -> date + description, split on the first
/// colon (ASCII or full-width). Lines without a colon keep an empty date.
fn parse_change_record(item: &str) -> ChangeRecord {
    let split = item
        .char_indices()
        .find(|(_, c)| *c == ':' || *c == '：')
        .map(|(idx, c)| (&item[..idx], &item[idx + c.len_utf8()..]));
    match split {
        Some((date, description)) => ChangeRecord {
            date: clean_list_item(date, false),
            description: description.trim().to_string(),
        },
        None => ChangeRecord {
            date: String::new(),
            description: item.trim().to_string(),
        },
    }
}
