//! SQL generation
//!
//! Each target engine implements [`DialectRenderer`]; [`SQLGenerator`] picks
//! the renderer for the requested dialect and adds the dialect-neutral
//! data-quality script.

pub mod check;
pub mod clickhouse;
pub mod generator;
pub mod hive;
pub mod maxcompute;
pub mod mysql;

use crate::models::{SqlDialect, TableDefinition};
use crate::validation::input::sanitize_comment;
use chrono::NaiveDate;

pub use check::CheckThresholds;
pub use clickhouse::ClickHouseRenderer;
pub use generator::{GenerateOptions, SQLGenerator};
pub use hive::HiveRenderer;
pub use maxcompute::MaxComputeRenderer;
pub use mysql::MySqlRenderer;

/// Source used in ETL templates when the table declares no data source
pub const PLACEHOLDER_SOURCE: &str = "source_db.source_table";

/// Marker appended to every placeholder column expression in ETL templates
pub const FILL_IN_MARKER: &str = "-- fill in logic";

/// Scheduler variable for the business date partition
pub const BIZDATE_VARIABLE: &str = "${bizdate}";

/// Inputs shared by every render call
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub table: &'a TableDefinition,
    /// Emit the descriptive header comment block
    pub include_comments: bool,
    /// Date written into table properties
    pub created_date: NaiveDate,
}

/// SQL rendering for one target engine
pub trait DialectRenderer: Send + Sync {
    fn dialect(&self) -> SqlDialect;

    /// Map a logical type token (`INT`, `decimal`, ...) to this engine's
    /// column type. Lookup is case-insensitive; unknown tokens map to the
    /// engine's generic string type.
    fn map_type(&self, logical_type: &str) -> &'static str;

    /// CREATE TABLE statement, newline-terminated
    fn render_ddl(&self, ctx: &RenderContext<'_>) -> String;

    /// INSERT template with placeholder column logic, newline-terminated
    fn render_etl(&self, ctx: &RenderContext<'_>) -> String;

    /// Whether the renderer produces usable SQL rather than a skeleton
    fn is_complete(&self) -> bool {
        true
    }
}

/// Renderer for `dialect`
pub fn renderer_for(dialect: SqlDialect) -> &'static dyn DialectRenderer {
    match dialect {
        SqlDialect::Hive => &HiveRenderer,
        SqlDialect::MySql => &MySqlRenderer,
        SqlDialect::ClickHouse => &ClickHouseRenderer,
        SqlDialect::MaxCompute => &MaxComputeRenderer,
    }
}

/// Case-insensitive lookup in a `(logical, physical)` type table
pub(crate) fn lookup_type(
    table: &[(&str, &'static str)],
    logical_type: &str,
    default: &'static str,
) -> &'static str {
    let token = logical_type.trim().to_uppercase();
    table
        .iter()
        .find(|(logical, _)| *logical == token)
        .map_or(default, |(_, physical)| *physical)
}

/// Header comment block, empty when comments are disabled
pub(crate) fn header_comment(ctx: &RenderContext<'_>, kind: &str) -> String {
    if !ctx.include_comments {
        return String::new();
    }

    let table = ctx.table;
    let mut header = format!("-- {}: {}\n", kind, table.name);
    if !table.display_name.is_empty() {
        header.push_str(&format!(
            "-- Display name: {}\n",
            sanitize_comment(&table.display_name)
        ));
    }
    if !table.description.is_empty() {
        header.push_str(&format!(
            "-- Description: {}\n",
            sanitize_comment(&table.description)
        ));
    }
    if let Some(owner) = table.declared_owner() {
        header.push_str(&format!("-- Owner: {}\n", sanitize_comment(owner)));
    }
    header.push_str(&format!(
        "-- Update frequency: {}\n",
        table.update_frequency
    ));
    header.push_str(&format!(
        "-- Generated: {}\n\n",
        ctx.created_date.format("%Y-%m-%d")
    ));
    header
}

/// First declared data source, or the generic placeholder source
pub(crate) fn source_table(table: &TableDefinition) -> &str {
    table
        .effective_data_sources()
        .first()
        .copied()
        .unwrap_or(PLACEHOLDER_SOURCE)
}

/// Scheduler expression for a partition key (`dt` is the business date)
pub(crate) fn partition_value(key: &str) -> String {
    if key == "dt" {
        format!("'{}'", BIZDATE_VARIABLE)
    } else {
        format!("'${{{}}}'", key)
    }
}

/// Mapped type of a partition key, using the declared field when present
pub(crate) fn partition_type(
    renderer: &dyn DialectRenderer,
    table: &TableDefinition,
    key: &str,
) -> &'static str {
    let logical = table.field(key).map_or_else(|| "STRING".to_string(), |f| f.base_type());
    renderer.map_type(&logical)
}

/// `SELECT` list of placeholder column expressions. Every line but the
/// last carries a trailing comma; `markers` lines get the fill-in comment.
pub(crate) fn select_list(lines: &[(String, bool)]) -> String {
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .map(|(idx, (expr, marker))| {
            let comma = if idx < last { "," } else { "" };
            if *marker {
                format!("    {}{}  {}", expr, comma, FILL_IN_MARKER)
            } else {
                format!("    {}{}", expr, comma)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let table = [("INT", "INT"), ("STRING", "VARCHAR(255)")];
        assert_eq!(lookup_type(&table, "string", "X"), "VARCHAR(255)");
        assert_eq!(lookup_type(&table, "FOO", "X"), "X");
    }

    #[test]
    fn select_list_commas() {
        let lines = vec![
            ("NULL AS a".to_string(), true),
            ("'${bizdate}' AS dt".to_string(), false),
        ];
        assert_eq!(
            select_list(&lines),
            "    NULL AS a,  -- fill in logic\n    '${bizdate}' AS dt"
        );
    }

    #[test]
    fn partition_values() {
        assert_eq!(partition_value("dt"), "'${bizdate}'");
        assert_eq!(partition_value("region"), "'${region}'");
    }

    #[test]
    fn placeholder_source_when_none_declared() {
        let table = TableDefinition::new("dw.t").with_data_sources(vec!["[请填写]".to_string()]);
        assert_eq!(source_table(&table), PLACEHOLDER_SOURCE);
    }
}
