//! ClickHouse renderer
//!
//! Only a bare skeleton. Every column is `String` and the table uses a plain
//! `MergeTree` with no ordering key. Output starts with a marker comment
//! saying so.

use super::{DialectRenderer, RenderContext, header_comment, select_list, source_table};
use crate::models::SqlDialect;
use tracing::warn;

const STUB_NOTICE: &str = "-- ClickHouse generation is a skeleton; review column types and engine settings before use\n";

#[derive(Debug, Default, Clone, Copy)]
pub struct ClickHouseRenderer;

impl DialectRenderer for ClickHouseRenderer {
    fn dialect(&self) -> SqlDialect {
        SqlDialect::ClickHouse
    }

    // TODO: map logical types to ClickHouse types (Int32, Decimal(18,2), DateTime, ...)
    fn map_type(&self, _logical_type: &str) -> &'static str {
        "String"
    }

    fn render_ddl(&self, ctx: &RenderContext<'_>) -> String {
        let table = ctx.table;
        warn!(table = %table.name, "ClickHouse DDL is generated as a skeleton only");

        let columns: Vec<String> = table
            .fields
            .iter()
            .map(|field| format!("    {} {}", field.name, self.map_type(&field.base_type())))
            .collect();

        let mut sql = header_comment(ctx, "Table");
        sql.push_str(STUB_NOTICE);
        sql.push_str(&format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n) ENGINE = MergeTree()\nORDER BY tuple();\n",
            table.name,
            columns.join(",\n")
        ));
        sql
    }

    fn render_etl(&self, ctx: &RenderContext<'_>) -> String {
        let table = ctx.table;
        warn!(table = %table.name, "ClickHouse ETL is generated as a skeleton only");

        let lines: Vec<(String, bool)> = table
            .fields
            .iter()
            .map(|field| (format!("NULL AS {}", field.name), true))
            .collect();

        let mut sql = header_comment(ctx, "ETL");
        sql.push_str(STUB_NOTICE);
        sql.push_str(&format!("INSERT INTO {}\nSELECT\n", table.name));
        sql.push_str(&select_list(&lines));
        sql.push_str(&format!("\nFROM {};\n", source_table(table)));
        sql
    }

    fn is_complete(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldDefinition, TableDefinition};
    use chrono::NaiveDate;

    #[test]
    fn skeleton_is_flagged() {
        let table =
            TableDefinition::new("dw.t").with_fields(vec![FieldDefinition::new("n", "INT")]);
        let ctx = RenderContext {
            table: &table,
            include_comments: false,
            created_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        };
        assert!(!ClickHouseRenderer.is_complete());
        let ddl = ClickHouseRenderer.render_ddl(&ctx);
        assert!(ddl.starts_with(STUB_NOTICE));
        assert!(ddl.contains("    n String\n"));
        assert!(ddl.contains("ENGINE = MergeTree()"));
    }
}
