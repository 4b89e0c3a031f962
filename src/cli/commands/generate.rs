//! Generate command implementation

use super::DocumentKind;
use crate::cli::error::CliError;
use crate::cli::{load_input, write_output};
use crate::config::DefinitionConfig;
use crate::export::{GenerateOptions, MarkdownExporter, SQLGenerator};
use crate::import::{MetricDefinitionImporter, TableDefinitionImporter};
use crate::models::SqlDialect;
use crate::validation::validate_sql_syntax;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Artifact to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateTarget {
    Ddl,
    Etl,
    Check,
    /// Normalized definition document
    Document,
}

/// Arguments for the generate command
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub target: GenerateTarget,
    pub kind: DocumentKind,
    /// File path or `-` for stdin
    pub input: String,
    pub dialect: Option<String>,
    pub no_comments: bool,
    /// Directory searched for `.dw-model.toml`
    pub workspace: PathBuf,
    /// Explicit configuration file, overriding the workspace lookup
    pub config: Option<PathBuf>,
    /// Parse the generated SQL before writing it
    pub check_syntax: bool,
    pub output: Option<PathBuf>,
    pub force: bool,
}

/// Handle the generate command
pub fn handle_generate(args: &GenerateArgs) -> Result<(), CliError> {
    let content = load_input(&args.input)?;

    let rendered = match (args.target, args.kind) {
        (GenerateTarget::Document, DocumentKind::Table) => {
            let table = TableDefinitionImporter::new().parse(&content)?;
            MarkdownExporter::new().export_table(&table)?
        }
        (GenerateTarget::Document, DocumentKind::Metric) => {
            let metric = MetricDefinitionImporter::new().parse(&content)?;
            MarkdownExporter::new().export_metric(&metric)?
        }
        (_, DocumentKind::Metric) => {
            return Err(CliError::InvalidArgument(
                "SQL can only be generated from table definitions".to_string(),
            ));
        }
        (target, DocumentKind::Table) => generate_sql(args, target, &content)?,
    };

    write_output(&rendered, args.output.as_deref(), args.force)
}

fn generate_sql(
    args: &GenerateArgs,
    target: GenerateTarget,
    content: &str,
) -> Result<String, CliError> {
    let config = match &args.config {
        Some(path) => DefinitionConfig::load_file(path)?,
        None => DefinitionConfig::load(&args.workspace)?,
    };
    let generator = SQLGenerator::from_config(&config);

    let mut options =
        GenerateOptions::new().with_comments(config.generator.include_comments && !args.no_comments);
    if let Some(dialect) = &args.dialect {
        options = options.with_dialect(dialect.clone());
    }
    let dialect = generator.resolve_dialect(&options)?;

    let table = TableDefinitionImporter::new().parse(content)?;
    let sql = match target {
        GenerateTarget::Ddl => generator.generate_ddl(&table, &options)?,
        GenerateTarget::Etl => generator.generate_etl(&table, &options)?,
        GenerateTarget::Check => generator.generate_check_sql(&table),
        GenerateTarget::Document => {
            return Err(CliError::InvalidArgument(
                "documents are not generated as SQL".to_string(),
            ));
        }
    };

    if args.check_syntax {
        check_syntax(&sql, target, dialect)?;
    }
    Ok(sql)
}

/// Hive and MaxCompute DDL use storage clauses the parser does not model,
/// so only the other artifacts are checked.
fn check_syntax(sql: &str, target: GenerateTarget, dialect: SqlDialect) -> Result<(), CliError> {
    let ddl_unsupported = matches!(dialect, SqlDialect::Hive | SqlDialect::MaxCompute);
    if target == GenerateTarget::Ddl && ddl_unsupported {
        warn!(dialect = %dialect, "Skipping syntax check for DDL");
        return Ok(());
    }
    validate_sql_syntax(sql, dialect)
        .map_err(|e| CliError::ValidationFailed(format!("generated SQL does not parse: {}", e)))?;
    debug!(dialect = %dialect, "Generated SQL parsed");
    Ok(())
}
