//! Table definition importer
//!
//! Recovers a [`TableDefinition`] from a table-definition document.

use super::markdown::{MarkdownDocument, Section, clean_inline, clean_list_item};
use super::{Extraction, ExtractionReport, ImportError};
use crate::models::placeholder::is_missing;
use crate::models::{FieldDefinition, TableDefinition, UpdateFrequency};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_TABLE_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:table\s+definition|表定义)\s*[:：]\s*`?([^\s`]+)`?").expect("Invalid regex")
});

pub(crate) const DISPLAY_NAME_LABELS: &[&str] = &["Display Name", "中文名", "表中文名"];
pub(crate) const DESCRIPTION_LABELS: &[&str] = &["Description", "描述", "表描述"];
pub(crate) const OWNER_LABELS: &[&str] = &["Owner", "负责人"];
pub(crate) const UPDATE_FREQUENCY_LABELS: &[&str] = &["Update Frequency", "更新频率"];

pub(crate) const FIELDS_SECTION: &[&str] = &["Field Definitions", "字段定义"];
pub(crate) const PARTITION_SECTION: &[&str] = &["Partition Keys", "分区字段"];
pub(crate) const INDEX_SECTION: &[&str] = &["Indexes", "索引"];
pub(crate) const DATA_SOURCE_SECTION: &[&str] = &["Data Sources", "数据来源"];
pub(crate) const CONSUMER_SECTION: &[&str] = &["Consumers", "下游使用"];
pub(crate) const QUALITY_SECTION: &[&str] = &["Quality Rules", "质量规则"];

/// Marker in the "required" column meaning NOT NULL
const REQUIRED_MARKERS: &[&str] = &["是", "y", "yes", "true"];

/// Importer for table-definition documents
#[derive(Debug, Default, Clone, Copy)]
pub struct TableDefinitionImporter;

impl TableDefinitionImporter {
    /// Create a new table definition importer
    pub fn new() -> Self {
        Self
    }

    /// Parse a table-definition document.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::NameNotFound`] when the first heading does not
    /// carry a `Table definition: <db.table>` title. Every other omission
    /// yields an empty value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dw_definition_sdk::import::TableDefinitionImporter;
    ///
    /// let doc = "# Table definition: dw.sales_daily\n\n- **Owner:** 张三\n";
    /// let table = TableDefinitionImporter::new().parse(doc).unwrap();
    /// assert_eq!(table.name, "dw.sales_daily");
    /// assert_eq!(table.owner.as_deref(), Some("张三"));
    /// ```
    pub fn parse(&self, content: &str) -> Result<TableDefinition, ImportError> {
        self.parse_with_report(content).map(|e| e.definition)
    }

    /// Parse a document and report which sections were found
    pub fn parse_with_report(
        &self,
        content: &str,
    ) -> Result<Extraction<TableDefinition>, ImportError> {
        let doc = MarkdownDocument::parse(content);
        let name = extract_table_name(&doc)?;
        let mut report = ExtractionReport::default();

        let fields_section = doc.section(FIELDS_SECTION);
        let fields = fields_section.map(parse_fields).unwrap_or_default();
        report.record(FIELDS_SECTION[0], fields_section.is_some(), fields.len());

        let partition_keys = list_section(&doc, PARTITION_SECTION, &mut report, false);
        let indexes = list_section(&doc, INDEX_SECTION, &mut report, false);
        let data_sources: Vec<String> = list_section(&doc, DATA_SOURCE_SECTION, &mut report, false)
            .into_iter()
            .filter(|source| !is_missing(source))
            .collect();
        let consumers = list_section(&doc, CONSUMER_SECTION, &mut report, false);
        let quality_rules = list_section(&doc, QUALITY_SECTION, &mut report, false);

        let table = TableDefinition {
            name,
            display_name: doc.label(DISPLAY_NAME_LABELS).unwrap_or_default(),
            description: doc.label(DESCRIPTION_LABELS).unwrap_or_default(),
            owner: doc.label(OWNER_LABELS),
            update_frequency: doc
                .label(UPDATE_FREQUENCY_LABELS)
                .map(|value| UpdateFrequency::parse_lenient(&value))
                .unwrap_or_default(),
            fields,
            partition_keys: partition_keys
                .iter()
                .map(|key| partition_key_name(key))
                .collect(),
            indexes,
            data_sources,
            consumers,
            quality_rules,
        };

        debug!(
            table = %table.name,
            fields = table.fields.len(),
            missing = ?report.missing_sections(),
            "Parsed table definition"
        );

        Ok(Extraction {
            definition: table,
            report,
        })
    }
}

fn extract_table_name(doc: &MarkdownDocument<'_>) -> Result<String, ImportError> {
    doc.title()
        .and_then(|title| RE_TABLE_TITLE.captures(title))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            ImportError::NameNotFound(
                "document has no '# Table definition: <database.table>' heading".to_string(),
            )
        })
}

/// Decode the field-definition table. Columns: name, type, description,
/// required marker, example. Rows with fewer than three cells or an empty
/// name are skipped.
fn parse_fields(section: &Section<'_>) -> Vec<FieldDefinition> {
    section
        .table_rows()
        .iter()
        .filter(|cells| cells.len() >= 3)
        .filter_map(|cells| {
            let name = clean_inline(&cells[0]);
            if name.is_empty() {
                return None;
            }
            let required = cells
                .get(3)
                .map(|cell| clean_inline(cell).to_lowercase())
                .is_some_and(|marker| REQUIRED_MARKERS.contains(&marker.as_str()));
            let example = cells
                .get(4)
                .map(|cell| clean_inline(cell))
                .filter(|value| !value.is_empty());
            Some(FieldDefinition {
                name,
                data_type: clean_inline(&cells[1]),
                description: clean_inline(&cells[2]),
                nullable: !required,
                example,
            })
        })
        .collect()
}

pub(crate) fn list_section(
    doc: &MarkdownDocument<'_>,
    names: &[&str],
    report: &mut ExtractionReport,
    prefer_bracket_label: bool,
) -> Vec<String> {
    let section = doc.section(names);
    let items: Vec<String> = section
        .map(|s| {
            s.list_items()
                .into_iter()
                .map(|item| clean_list_item(item, prefer_bracket_label))
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default();
    report.record(names[0], section.is_some(), items.len());
    items
}

/// Partition list items may carry a type or description after the column
/// name (`dt (STRING): business date`); keep only the name.
fn partition_key_name(item: &str) -> String {
    item.split(|c: char| c.is_whitespace() || matches!(c, '(' | ':' | '：' | '（' | '-'))
        .find(|part| !part.is_empty())
        .unwrap_or(item)
        .to_string()
}
