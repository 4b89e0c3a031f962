//! Validate command implementation

use super::DocumentKind;
use crate::cli::error::CliError;
use crate::import::ImportError;
use crate::validation::{DefinitionStats, ReportBuilder, ValidationReport};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Clone)]
pub struct ValidateArgs {
    pub kind: DocumentKind,
    pub inputs: Vec<PathBuf>,
    /// Print the JSON report instead of a console summary
    pub json: bool,
}

/// Handle the validate command.
///
/// Every document is checked even when earlier ones fail or cannot be
/// read; the command fails at the end if any error was reported.
pub fn handle_validate(args: &ValidateArgs) -> Result<(), CliError> {
    if args.inputs.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one input file is required".to_string(),
        ));
    }

    let report = build_report(args.kind, &args.inputs);

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::SerializationError(e.to_string()))?;
        println!("{}", json);
    } else {
        print_summary(&report);
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed(format!(
            "{} error(s) reported",
            report.errors.len()
        )))
    }
}

/// Read, extract and validate every input. An unreadable file is recorded
/// as a failed document.
pub fn build_report(kind: DocumentKind, inputs: &[PathBuf]) -> ValidationReport {
    let mut builder = ReportBuilder::new();
    for path in inputs {
        let document = path.display().to_string();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                let error = ImportError::IoError(e.to_string());
                builder.add_extraction_failure(kind.into(), &document, &error);
                continue;
            }
        };
        match kind {
            DocumentKind::Table => builder.check_table_document(&document, &content),
            DocumentKind::Metric => builder.check_metric_document(&document, &content),
        }
    }
    builder.build()
}

fn print_summary(report: &ValidationReport) {
    for error in &report.errors {
        match &error.path {
            Some(path) => println!(
                "  ✗ {} [{}] {} ({})",
                error.name, error.kind, error.message, path
            ),
            None => println!("  ✗ {} [{}] {}", error.name, error.kind, error.message),
        }
    }
    print_stats("Tables", &report.data.tables);
    print_stats("Metrics", &report.data.metrics);
}

fn print_stats(label: &str, stats: &DefinitionStats) {
    if stats.total > 0 {
        println!(
            "{}: {} checked, {} passed, {} failed, {} warning(s)",
            label, stats.total, stats.passed, stats.failed, stats.warnings
        );
    }
}
