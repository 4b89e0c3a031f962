//! Data-quality check script
//!
//! Four parts, in order: row count banding, null counts for required
//! fields, a duplicate-check marker, and (for tables partitioned by `dt`)
//! a day-over-day row count comparison.

use super::{BIZDATE_VARIABLE, partition_value};
use crate::models::TableDefinition;
use serde::{Deserialize, Serialize};

/// Scheduler variable for the previous business date
pub const YESTERDAY_VARIABLE: &str = "${yesterday}";

/// Severity bands used by the generated checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckThresholds {
    /// Row counts below this (but above zero) are a WARNING
    pub min_row_count: u64,
    /// Day-over-day change above this percentage is a WARNING
    pub fluctuation_warning_pct: f64,
    /// Day-over-day change above this percentage is CRITICAL
    pub fluctuation_critical_pct: f64,
}

impl Default for CheckThresholds {
    fn default() -> Self {
        Self {
            min_row_count: 100,
            fluctuation_warning_pct: 20.0,
            fluctuation_critical_pct: 50.0,
        }
    }
}

pub(crate) fn render_check_sql(table: &TableDefinition, thresholds: &CheckThresholds) -> String {
    let by_date = table.is_partitioned_by("dt");
    let date_filter = if by_date {
        format!("\nWHERE dt = {}", partition_value("dt"))
    } else {
        String::new()
    };

    let mut sql = format!("-- Data quality checks for {}\n\n", table.name);

    sql.push_str("-- 1. Row count check\n");
    sql.push_str(&format!(
        "SELECT\n    COUNT(*) AS row_count,\n    CASE\n        WHEN COUNT(*) = 0 THEN 'CRITICAL'\n        WHEN COUNT(*) < {} THEN 'WARNING'\n        ELSE 'OK'\n    END AS status\nFROM {}{};\n\n",
        thresholds.min_row_count, table.name, date_filter
    ));

    sql.push_str("-- 2. Non-null check\n");
    let null_counts: Vec<String> = table
        .fields
        .iter()
        .filter(|field| !field.nullable)
        .map(|field| {
            format!(
                "    SUM(CASE WHEN {0} IS NULL THEN 1 ELSE 0 END) AS {0}_null_count",
                field.name
            )
        })
        .collect();
    if null_counts.is_empty() {
        sql.push_str("-- No required fields declared\n\n");
    } else {
        sql.push_str(&format!(
            "SELECT\n{}\nFROM {}{};\n\n",
            null_counts.join(",\n"),
            table.name,
            date_filter
        ));
    }

    sql.push_str("-- 3. Duplicate check\n");
    sql.push_str("-- No primary key is declared; add a uniqueness check on the business key here\n");

    if by_date {
        sql.push_str("\n-- 4. Day-over-day fluctuation check\n");
        sql.push_str(&format!(
            "WITH today AS (\n    SELECT COUNT(*) AS cnt FROM {0} WHERE dt = '{1}'\n),\n\
             yesterday AS (\n    SELECT COUNT(*) AS cnt FROM {0} WHERE dt = '{2}'\n)\n\
             SELECT\n    today.cnt AS today_count,\n    yesterday.cnt AS yesterday_count,\n    CASE\n\
             \x20       WHEN ABS(today.cnt - yesterday.cnt) * 1.0 / NULLIF(yesterday.cnt, 0) > {3} THEN 'CRITICAL'\n\
             \x20       WHEN ABS(today.cnt - yesterday.cnt) * 1.0 / NULLIF(yesterday.cnt, 0) > {4} THEN 'WARNING'\n\
             \x20       ELSE 'OK'\n    END AS status\n\
             FROM today CROSS JOIN yesterday;\n",
            table.name,
            BIZDATE_VARIABLE,
            YESTERDAY_VARIABLE,
            thresholds.fluctuation_critical_pct / 100.0,
            thresholds.fluctuation_warning_pct / 100.0
        ));
    }

    sql
}
