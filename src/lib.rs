//! Data warehouse definition SDK
//!
//! Provides unified interfaces for:
//! - Extracting table and metric definitions from definition documents
//! - Validating definitions against naming, ownership and lineage rules
//! - Generating DDL, ETL templates and data-quality checks per SQL dialect
//! - Rendering definitions back into documents
//!
//! Every operation is a synchronous, stateless transformation of its
//! inputs; callers own all file I/O.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod export;
pub mod import;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, DefinitionConfig};
pub use export::{
    CheckThresholds, DialectRenderer, ExportError, GenerateOptions, MarkdownExporter,
    SQLGenerator,
};
pub use import::{
    Extraction, ExtractionReport, ImportError, MetricDefinitionImporter, TableDefinitionImporter,
};
pub use validation::{
    FindingKind, MetricValidator, Severity, TableValidator, ValidationFinding, ValidationReport,
    ValidationResult,
};

// Re-export models
pub use models::enums::*;
pub use models::{ChangeRecord, FieldDefinition, MetricDefinition, TableDefinition};
