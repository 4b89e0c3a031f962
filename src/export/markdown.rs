//! Markdown exporter for table and metric definitions
//!
//! Renders records back into the definition-document format read by
//! [`crate::import`]. Empty slots are written as the fill-in placeholder so
//! the output doubles as a template, and importing a rendered document
//! yields the original record.

use crate::export::ExportError;
use crate::models::placeholder::PLACEHOLDER;
use crate::models::{MetricDefinition, TableDefinition};

/// Markdown exporter for definition documents
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownExporter;

impl MarkdownExporter {
    /// Create a new Markdown exporter instance
    pub fn new() -> Self {
        Self
    }

    /// Export a table definition document
    ///
    /// # Errors
    ///
    /// [`ExportError::ExportError`] when the table has no name, since the
    /// document could not be read back.
    pub fn export_table(&self, table: &TableDefinition) -> Result<String, ExportError> {
        if table.name.trim().is_empty() {
            return Err(ExportError::ExportError(
                "table definition has no name".to_string(),
            ));
        }

        let mut md = format!("# Table definition: {}\n\n", table.name);
        md.push_str(&label("Display Name", &table.display_name));
        md.push_str(&label("Description", &table.description));
        md.push_str(&label("Owner", table.owner.as_deref().unwrap_or_default()));
        md.push_str(&label("Update Frequency", table.update_frequency.as_str()));
        md.push('\n');

        md.push_str("## Field Definitions\n\n");
        md.push_str("| Field | Type | Description | Required | Example |\n");
        md.push_str("|-------|------|-------------|----------|---------|\n");
        for field in &table.fields {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                cell(&field.name),
                cell(&field.data_type),
                cell(&field.description),
                if field.nullable { "否" } else { "是" },
                cell(field.example.as_deref().unwrap_or_default())
            ));
        }
        md.push('\n');

        md.push_str(&list("Partition Keys", &table.partition_keys));
        md.push_str(&list("Indexes", &table.indexes));
        md.push_str(&list("Data Sources", &table.data_sources));
        md.push_str(&list("Consumers", &table.consumers));
        md.push_str(&list("Quality Rules", &table.quality_rules));

        Ok(finish(md))
    }

    /// Export a metric definition document
    ///
    /// # Errors
    ///
    /// [`ExportError::ExportError`] when the metric has no name.
    pub fn export_metric(&self, metric: &MetricDefinition) -> Result<String, ExportError> {
        if metric.name.trim().is_empty() {
            return Err(ExportError::ExportError(
                "metric definition has no name".to_string(),
            ));
        }

        let mut md = format!("# Metric definition: {}\n\n", metric.name);
        md.push_str(&label("Category", &metric.category));
        md.push_str(&label("Business Definition", &metric.business_definition));
        md.push_str(&label("Owner", metric.owner.as_deref().unwrap_or_default()));
        md.push_str(&label("Data Source", &metric.data_source));
        md.push('\n');

        md.push_str(&format!("## Business Formula\n\n```\n{}\n```\n\n", metric.formula));
        if let Some(sql) = &metric.sql_logic {
            md.push_str(&format!("## SQL Logic\n\n```sql\n{}\n```\n\n", sql));
        }

        md.push_str(&list("Dimensions", &metric.dimensions));
        md.push_str(&list("Related Metrics", &metric.related_metrics));
        let history: Vec<String> = metric
            .change_history
            .iter()
            .map(|record| format!("{}: {}", record.date, record.description))
            .collect();
        md.push_str(&list("Change History", &history));

        Ok(finish(md))
    }
}

fn label(name: &str, value: &str) -> String {
    let value = if value.trim().is_empty() { PLACEHOLDER } else { value };
    format!("- **{}:** {}\n", name, value)
}

/// Escape `|` so a value stays in one table cell
fn cell(value: &str) -> String {
    value.replace('|', "\\|")
}

fn list(heading: &str, items: &[String]) -> String {
    let mut md = format!("## {}\n\n", heading);
    if items.is_empty() {
        md.push_str(&format!("- {}\n", PLACEHOLDER));
    }
    for item in items {
        md.push_str(&format!("- {}\n", item));
    }
    md.push('\n');
    md
}

fn finish(md: String) -> String {
    format!("{}\n", md.trim_end())
}
