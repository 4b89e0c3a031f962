//! SQL generator
//!
//! Thin dispatcher over the [`DialectRenderer`] implementations.

use super::check::{CheckThresholds, render_check_sql};
use super::{DialectRenderer, RenderContext, renderer_for};
use crate::config::DefinitionConfig;
use crate::export::ExportError;
use crate::models::{SqlDialect, TableDefinition};
use chrono::{Local, NaiveDate};
use tracing::info;

/// Per-call generation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Target dialect name; the generator's default when `None`
    pub dialect: Option<String>,
    /// Emit the header comment block
    pub include_comments: bool,
    /// Date written into table properties; today when `None`
    pub created_date: Option<NaiveDate>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            dialect: None,
            include_comments: true,
            created_date: None,
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }

    pub fn with_comments(mut self, include_comments: bool) -> Self {
        self.include_comments = include_comments;
        self
    }

    pub fn with_created_date(mut self, date: NaiveDate) -> Self {
        self.created_date = Some(date);
        self
    }
}

/// Generates DDL, ETL templates and check scripts from table definitions.
///
/// Holds no per-call state; one instance can serve concurrent callers.
///
/// # Example
///
/// ```rust
/// use dw_definition_sdk::export::{GenerateOptions, SQLGenerator};
/// use dw_definition_sdk::models::{FieldDefinition, SqlDialect, TableDefinition};
///
/// let table = TableDefinition::new("dw.sales_daily")
///     .with_fields(vec![FieldDefinition::new("order_id", "STRING")])
///     .with_partition_keys(vec!["dt".to_string()]);
///
/// let generator = SQLGenerator::new(SqlDialect::Hive);
/// let ddl = generator.generate_ddl(&table, &GenerateOptions::default()).unwrap();
/// assert!(ddl.contains("CREATE TABLE IF NOT EXISTS dw.sales_daily"));
///
/// let err = generator
///     .generate_ddl(&table, &GenerateOptions::new().with_dialect("oracle"))
///     .unwrap_err();
/// assert_eq!(err.to_string(), "Unsupported dialect: oracle");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SQLGenerator {
    default_dialect: SqlDialect,
    thresholds: CheckThresholds,
}

impl SQLGenerator {
    pub fn new(default_dialect: SqlDialect) -> Self {
        Self {
            default_dialect,
            thresholds: CheckThresholds::default(),
        }
    }

    /// Generator using the configured default dialect and check thresholds
    pub fn from_config(config: &DefinitionConfig) -> Self {
        Self {
            default_dialect: config.generator.dialect,
            thresholds: config.checks,
        }
    }

    pub fn with_thresholds(mut self, thresholds: CheckThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn default_dialect(&self) -> SqlDialect {
        self.default_dialect
    }

    /// Resolve the dialect named in `options`, falling back to the default
    pub fn resolve_dialect(&self, options: &GenerateOptions) -> Result<SqlDialect, ExportError> {
        match options.dialect.as_deref() {
            Some(name) => name
                .parse()
                .map_err(|_| ExportError::UnsupportedDialect(name.to_string())),
            None => Ok(self.default_dialect),
        }
    }

    /// Renderer for the dialect named in `options`
    pub fn renderer(
        &self,
        options: &GenerateOptions,
    ) -> Result<&'static dyn DialectRenderer, ExportError> {
        self.resolve_dialect(options).map(renderer_for)
    }

    /// CREATE TABLE statement for `table`.
    ///
    /// # Errors
    ///
    /// [`ExportError::UnsupportedDialect`] when the requested dialect is not
    /// one of hive, mysql, clickhouse or maxcompute.
    pub fn generate_ddl(
        &self,
        table: &TableDefinition,
        options: &GenerateOptions,
    ) -> Result<String, ExportError> {
        let renderer = self.renderer(options)?;
        info!(table = %table.name, dialect = %renderer.dialect(), "Generating DDL");
        Ok(renderer.render_ddl(&context(table, options)))
    }

    /// INSERT template reading from the table's first data source.
    ///
    /// # Errors
    ///
    /// [`ExportError::UnsupportedDialect`] as for [`Self::generate_ddl`].
    pub fn generate_etl(
        &self,
        table: &TableDefinition,
        options: &GenerateOptions,
    ) -> Result<String, ExportError> {
        let renderer = self.renderer(options)?;
        info!(table = %table.name, dialect = %renderer.dialect(), "Generating ETL template");
        Ok(renderer.render_etl(&context(table, options)))
    }

    /// Data-quality check script; dialect-neutral
    pub fn generate_check_sql(&self, table: &TableDefinition) -> String {
        info!(table = %table.name, "Generating check SQL");
        render_check_sql(table, &self.thresholds)
    }
}

fn context<'a>(table: &'a TableDefinition, options: &GenerateOptions) -> RenderContext<'a> {
    RenderContext {
        table,
        include_comments: options.include_comments,
        created_date: options
            .created_date
            .unwrap_or_else(|| Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_override_default_dialect() {
        let generator = SQLGenerator::new(SqlDialect::MySql);
        assert_eq!(
            generator.resolve_dialect(&GenerateOptions::default()),
            Ok(SqlDialect::MySql)
        );
        assert_eq!(
            generator.resolve_dialect(&GenerateOptions::new().with_dialect("ODPS")),
            Ok(SqlDialect::MaxCompute)
        );
    }

    #[test]
    fn unsupported_dialect_is_named() {
        let err = SQLGenerator::default()
            .generate_etl(
                &TableDefinition::new("dw.t"),
                &GenerateOptions::new().with_dialect("oracle"),
            )
            .unwrap_err();
        assert_eq!(err, ExportError::UnsupportedDialect("oracle".to_string()));
    }

    #[test]
    fn comments_are_optional() {
        let table = TableDefinition::new("dw.t").with_description("描述");
        let generator = SQLGenerator::default();
        let with = generator
            .generate_ddl(&table, &GenerateOptions::default())
            .unwrap();
        let without = generator
            .generate_ddl(&table, &GenerateOptions::new().with_comments(false))
            .unwrap();
        assert!(with.starts_with("-- Table: dw.t\n"));
        assert!(without.starts_with("CREATE TABLE"));
        assert!(without.contains("COMMENT '描述'"));
    }
}
