//! Parse command implementation

use super::DocumentKind;
use crate::cli::error::CliError;
use crate::cli::{load_input, write_output};
use crate::import::{MetricDefinitionImporter, TableDefinitionImporter};
use serde::Serialize;
use std::path::PathBuf;

/// Output serialization for parsed definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Arguments for the parse command
#[derive(Debug, Clone)]
pub struct ParseArgs {
    pub kind: DocumentKind,
    /// File path or `-` for stdin
    pub input: String,
    pub format: OutputFormat,
    /// Include the per-section extraction report
    pub with_report: bool,
    pub output: Option<PathBuf>,
    pub force: bool,
}

/// Handle the parse command
pub fn handle_parse(args: &ParseArgs) -> Result<(), CliError> {
    let content = load_input(&args.input)?;

    let rendered = match (args.kind, args.with_report) {
        (DocumentKind::Table, false) => {
            serialize(&TableDefinitionImporter::new().parse(&content)?, args.format)?
        }
        (DocumentKind::Table, true) => serialize(
            &TableDefinitionImporter::new().parse_with_report(&content)?,
            args.format,
        )?,
        (DocumentKind::Metric, false) => {
            serialize(&MetricDefinitionImporter::new().parse(&content)?, args.format)?
        }
        (DocumentKind::Metric, true) => serialize(
            &MetricDefinitionImporter::new().parse_with_report(&content)?,
            args.format,
        )?,
    };

    write_output(&rendered, args.output.as_deref(), args.force)
}

fn serialize<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|json| format!("{}\n", json))
            .map_err(|e| CliError::SerializationError(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| CliError::SerializationError(e.to_string()))
        }
    }
}
