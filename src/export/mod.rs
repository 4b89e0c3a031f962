//! Export functionality
//!
//! Provides generators and exporters for:
//! - SQL (DDL, ETL templates and data-quality checks per dialect)
//! - Definition documents (Markdown)

pub mod markdown;
pub mod sql;

/// Error during export
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ExportError {
    /// Requested dialect is not one of the supported engines
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),
    #[error("Export error: {0}")]
    ExportError(String),
}

// Re-export for convenience
pub use markdown::MarkdownExporter;
pub use sql::{
    CheckThresholds, ClickHouseRenderer, DialectRenderer, GenerateOptions, HiveRenderer,
    MaxComputeRenderer, MySqlRenderer, RenderContext, SQLGenerator, renderer_for,
};
