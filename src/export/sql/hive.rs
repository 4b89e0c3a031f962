//! Hive renderer

use super::{
    DialectRenderer, RenderContext, header_comment, lookup_type, partition_type, partition_value,
    select_list, source_table,
};
use crate::models::{SqlDialect, TableDefinition};
use crate::validation::input::escape_sql_literal;

const HIVE_TYPES: &[(&str, &str)] = &[
    ("STRING", "STRING"),
    ("INT", "INT"),
    ("BIGINT", "BIGINT"),
    ("DECIMAL", "DECIMAL(18,2)"),
    ("DATE", "STRING"),
    ("TIMESTAMP", "TIMESTAMP"),
    ("BOOLEAN", "BOOLEAN"),
    ("DOUBLE", "DOUBLE"),
    ("FLOAT", "FLOAT"),
];

/// Hive DDL and `INSERT OVERWRITE` templates, stored as Parquet
#[derive(Debug, Default, Clone, Copy)]
pub struct HiveRenderer;

impl DialectRenderer for HiveRenderer {
    fn dialect(&self) -> SqlDialect {
        SqlDialect::Hive
    }

    fn map_type(&self, logical_type: &str) -> &'static str {
        lookup_type(HIVE_TYPES, logical_type, "STRING")
    }

    fn render_ddl(&self, ctx: &RenderContext<'_>) -> String {
        let table = ctx.table;
        let mut sql = header_comment(ctx, "Table");
        sql.push_str(&create_table_head(self, table));
        sql.push_str("STORED AS PARQUET\n");
        sql.push_str(&format!(
            "TBLPROPERTIES (\n    'owner' = '{}',\n    'created_date' = '{}'\n);\n",
            escape_sql_literal(table.declared_owner().unwrap_or_default()),
            ctx.created_date.format("%Y-%m-%d")
        ));
        sql
    }

    fn render_etl(&self, ctx: &RenderContext<'_>) -> String {
        insert_overwrite(ctx)
    }
}

/// `CREATE TABLE` through the partition clause, shared with MaxCompute.
/// Partition keys are left out of the column block and declared under
/// `PARTITIONED BY` instead.
pub(super) fn create_table_head(renderer: &dyn DialectRenderer, table: &TableDefinition) -> String {
    let columns: Vec<String> = table
        .regular_fields()
        .map(|field| {
            format!(
                "    {} {} COMMENT '{}'",
                field.name,
                renderer.map_type(&field.base_type()),
                escape_sql_literal(&field.description)
            )
        })
        .collect();

    let mut sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)\n",
        table.name,
        columns.join(",\n")
    );
    sql.push_str(&format!(
        "COMMENT '{}'\n",
        escape_sql_literal(&table.description)
    ));

    if !table.partition_keys.is_empty() {
        let partitions: Vec<String> = table
            .partition_keys
            .iter()
            .map(|key| {
                let comment = table.field(key).map_or("", |f| f.description.as_str());
                format!(
                    "{} {} COMMENT '{}'",
                    key,
                    partition_type(renderer, table, key),
                    escape_sql_literal(comment)
                )
            })
            .collect();
        sql.push_str(&format!("PARTITIONED BY ({})\n", partitions.join(", ")));
    }

    sql
}

/// `INSERT OVERWRITE TABLE ... PARTITION (...) SELECT ...`, shared with
/// MaxCompute
pub(super) fn insert_overwrite(ctx: &RenderContext<'_>) -> String {
    let table = ctx.table;
    let mut sql = header_comment(ctx, "ETL");

    sql.push_str(&format!("INSERT OVERWRITE TABLE {}", table.name));
    if !table.partition_keys.is_empty() {
        let partitions: Vec<String> = table
            .partition_keys
            .iter()
            .map(|key| format!("{} = {}", key, partition_value(key)))
            .collect();
        sql.push_str(&format!(" PARTITION ({})", partitions.join(", ")));
    }
    sql.push('\n');

    let lines: Vec<(String, bool)> = table
        .regular_fields()
        .map(|field| (format!("NULL AS {}", field.name), true))
        .collect();
    sql.push_str("SELECT\n");
    sql.push_str(&select_list(&lines));
    sql.push('\n');

    sql.push_str(&format!("FROM {}", source_table(table)));
    if table.is_partitioned_by("dt") {
        sql.push_str(&format!("\nWHERE dt = {}", partition_value("dt")));
    }
    sql.push_str(";\n");
    sql
}
