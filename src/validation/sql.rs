//! SQL syntax smoke checks for generated statements
//!
//! Generated scripts contain `${bizdate}`-style scheduler variables that no
//! SQL parser accepts, so they are replaced with a sample date before
//! parsing. Hive/MaxCompute-only clauses that `sqlparser` does not
//! model (`STORED AS`, `TBLPROPERTIES`, `LIFECYCLE`) are not checked here;
//! callers smoke-check ETL and check scripts, or DDL for MySQL.

use crate::models::SqlDialect;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlparser::dialect::{ClickHouseDialect, Dialect, HiveDialect, MySqlDialect};
use sqlparser::parser::Parser;

static RE_SCHEDULER_VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{[A-Za-z_][A-Za-z0-9_]*\}").expect("Invalid regex"));

/// Parse `sql` with the `sqlparser` dialect closest to `dialect`.
///
/// Returns the parser message on failure.
///
/// # Example
///
/// ```rust
/// use dw_definition_sdk::models::SqlDialect;
/// use dw_definition_sdk::validation::sql::validate_sql_syntax;
///
/// assert!(validate_sql_syntax("SELECT COUNT(*) FROM dw.t WHERE dt = '${bizdate}'", SqlDialect::Hive).is_ok());
/// assert!(validate_sql_syntax("SELEC 1", SqlDialect::Hive).is_err());
/// ```
pub fn validate_sql_syntax(sql: &str, dialect: SqlDialect) -> Result<(), String> {
    let substituted = RE_SCHEDULER_VARIABLE.replace_all(sql, "20240101");
    let parser_dialect = dialect_impl(dialect);
    Parser::parse_sql(parser_dialect.as_ref(), &substituted)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn dialect_impl(dialect: SqlDialect) -> Box<dyn Dialect + Send + Sync> {
    match dialect {
        SqlDialect::Hive | SqlDialect::MaxCompute => Box::new(HiveDialect {}),
        SqlDialect::MySql => Box::new(MySqlDialect {}),
        SqlDialect::ClickHouse => Box::new(ClickHouseDialect {}),
    }
}
