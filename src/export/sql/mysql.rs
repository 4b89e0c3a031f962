//! MySQL renderer
//!
//! MySQL has no `database.table` addressing for warehouse layers here, so
//! the qualified name is flattened (`dw.sales_daily` becomes
//! `dw_sales_daily`). Partition keys are left out of both the column block
//! and the insert list. MySQL can only partition on a column of the table
//! itself, so no partition clause is emitted either; the business date is
//! applied as a filter on the source only.

use super::{
    DialectRenderer, RenderContext, header_comment, lookup_type, partition_value, select_list,
    source_table,
};
use crate::models::SqlDialect;
use crate::validation::input::{escape_sql_literal, sanitize_sql_identifier};

const MYSQL_TYPES: &[(&str, &str)] = &[
    ("STRING", "VARCHAR(255)"),
    ("INT", "INT"),
    ("BIGINT", "BIGINT"),
    ("DECIMAL", "DECIMAL(18,2)"),
    ("DATE", "DATE"),
    ("TIMESTAMP", "DATETIME"),
    ("BOOLEAN", "TINYINT(1)"),
    ("DOUBLE", "DOUBLE"),
    ("FLOAT", "FLOAT"),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlRenderer;

impl MySqlRenderer {
    fn quote(name: &str) -> String {
        sanitize_sql_identifier(name, SqlDialect::MySql)
    }

    /// `dw.sales_daily` -> `` `dw_sales_daily` ``
    pub fn flat_name(qualified: &str) -> String {
        Self::quote(&qualified.replace('.', "_"))
    }
}

impl DialectRenderer for MySqlRenderer {
    fn dialect(&self) -> SqlDialect {
        SqlDialect::MySql
    }

    fn map_type(&self, logical_type: &str) -> &'static str {
        lookup_type(MYSQL_TYPES, logical_type, "VARCHAR(255)")
    }

    fn render_ddl(&self, ctx: &RenderContext<'_>) -> String {
        let table = ctx.table;
        let columns: Vec<String> = table
            .regular_fields()
            .map(|field| {
                let not_null = if field.nullable { "" } else { " NOT NULL" };
                format!(
                    "    {} {}{} COMMENT '{}'",
                    Self::quote(&field.name),
                    self.map_type(&field.base_type()),
                    not_null,
                    escape_sql_literal(&field.description)
                )
            })
            .collect();

        let mut sql = header_comment(ctx, "Table");
        sql.push_str(&format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COMMENT='{}';\n",
            Self::flat_name(&table.name),
            columns.join(",\n"),
            escape_sql_literal(&table.description)
        ));
        sql
    }

    fn render_etl(&self, ctx: &RenderContext<'_>) -> String {
        let table = ctx.table;
        let column_list: Vec<String> = table
            .regular_fields()
            .map(|field| Self::quote(&field.name))
            .collect();
        let lines: Vec<(String, bool)> = column_list
            .iter()
            .map(|column| (format!("NULL AS {}", column), true))
            .collect();

        let mut sql = header_comment(ctx, "ETL");
        sql.push_str(&format!(
            "INSERT INTO {} ({})\n",
            Self::flat_name(&table.name),
            column_list.join(", ")
        ));
        sql.push_str("SELECT\n");
        sql.push_str(&select_list(&lines));
        sql.push('\n');
        sql.push_str(&format!("FROM {}", Self::flat_name(source_table(table))));
        if table.is_partitioned_by("dt") {
            sql.push_str(&format!("\nWHERE dt = {}", partition_value("dt")));
        }
        sql.push_str(";\n");
        sql
    }
}
