//! Input validation and sanitization utilities.
//!
//! Naming rules for warehouse objects plus the escaping helpers used when
//! definition text is embedded into generated SQL.
//!
//! # Security
//!
//! Descriptions and owners come from free-form documents and end up inside
//! SQL string literals and comments. [`escape_sql_literal`] and
//! [`sanitize_comment`] keep that text from terminating the literal or
//! comment early.

use crate::models::SqlDialect;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static RE_TABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_]+\.[a-z_]+$").expect("Invalid regex"));
static RE_FIELD_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("Invalid regex"));

/// Maximum length of the table-local part of a qualified name
pub const MAX_TABLE_PART_LENGTH: usize = 50;

/// Minimum length of a table or metric description
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Minimum length of a field description before a warning is raised
pub const MIN_FIELD_DESCRIPTION_LENGTH: usize = 2;

/// Errors that can occur during input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),
}

/// Result type for input validation operations.
pub type InputResult<T> = Result<T, ValidationError>;

/// Validate a qualified table name.
///
/// # Rules
///
/// - Must not be empty
/// - Must be `database.table`, lowercase letters and underscores only
///
/// # Examples
///
/// ```
/// use dw_definition_sdk::validation::input::validate_table_name;
///
/// assert!(validate_table_name("dw.sales_daily").is_ok());
/// assert!(validate_table_name("sales_daily").is_err());
/// assert!(validate_table_name("DW.Sales").is_err());
/// assert!(validate_table_name("dw.sales_2024").is_err());
/// ```
pub fn validate_table_name(name: &str) -> InputResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Empty("table name"));
    }

    if !RE_TABLE_NAME.is_match(name) {
        return Err(ValidationError::InvalidFormat(
            "table name",
            format!(
                "'{}' must be database.table using lowercase letters and underscores",
                name
            ),
        ));
    }

    Ok(())
}

/// Validate a field (column) name.
///
/// # Rules
///
/// - Must not be empty
/// - Must start with a lowercase letter or underscore
/// - May contain lowercase letters, digits and underscores
///
/// # Examples
///
/// ```
/// use dw_definition_sdk::validation::input::validate_field_name;
///
/// assert!(validate_field_name("order_id").is_ok());
/// assert!(validate_field_name("amount_2").is_ok());
/// assert!(validate_field_name("2amount").is_err());
/// assert!(validate_field_name("OrderId").is_err());
/// ```
pub fn validate_field_name(name: &str) -> InputResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Empty("field name"));
    }

    if !RE_FIELD_NAME.is_match(name) {
        return Err(ValidationError::InvalidFormat(
            "field name",
            format!(
                "'{}' must start with a lowercase letter or underscore and contain only lowercase letters, digits and underscores",
                name
            ),
        ));
    }

    Ok(())
}

/// Length of a text value in characters, ignoring surrounding whitespace.
///
/// Descriptions are usually Chinese, so byte length would overcount.
pub fn text_length(text: &str) -> usize {
    text.trim().chars().count()
}

/// Quote an identifier for the given dialect.
///
/// MySQL uses backticks; Hive, MaxCompute and ClickHouse identifiers from
/// valid definitions never need quoting and are returned unchanged.
///
/// ```
/// use dw_definition_sdk::models::SqlDialect;
/// use dw_definition_sdk::validation::input::sanitize_sql_identifier;
///
/// assert_eq!(sanitize_sql_identifier("order_id", SqlDialect::MySql), "`order_id`");
/// assert_eq!(sanitize_sql_identifier("a`b", SqlDialect::MySql), "`a``b`");
/// assert_eq!(sanitize_sql_identifier("order_id", SqlDialect::Hive), "order_id");
/// ```
pub fn sanitize_sql_identifier(name: &str, dialect: SqlDialect) -> String {
    match dialect {
        SqlDialect::MySql => format!("`{}`", name.replace('`', "``")),
        _ => name.to_string(),
    }
}

/// Escape text for use inside a single-quoted SQL string literal.
///
/// ```
/// use dw_definition_sdk::validation::input::escape_sql_literal;
///
/// assert_eq!(escape_sql_literal("it's"), "it''s");
/// ```
pub fn escape_sql_literal(text: &str) -> String {
    sanitize_comment(text).replace('\'', "''")
}

/// Collapse text onto one line so it can follow `--` in a SQL comment.
///
/// Control characters are dropped and line breaks become spaces.
pub fn sanitize_comment(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_length_counts_characters() {
        assert_eq!(text_length("销售日报明细"), 6);
        assert_eq!(text_length("  abc  "), 3);
    }

    #[test]
    fn comment_text_stays_on_one_line() {
        assert_eq!(sanitize_comment("line one\nline two\r\n"), "line one line two");
        assert_eq!(escape_sql_literal("a'b\nc"), "a''b c");
    }

    #[test]
    fn empty_names_are_reported_as_empty() {
        assert_eq!(
            validate_table_name(""),
            Err(ValidationError::Empty("table name"))
        );
        assert_eq!(
            validate_field_name(""),
            Err(ValidationError::Empty("field name"))
        );
    }
}
