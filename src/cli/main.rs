//! CLI binary entry point for dw-definition-cli

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use dw_definition_sdk::cli::commands::DocumentKind;
#[cfg(feature = "cli")]
use dw_definition_sdk::cli::commands::generate::{GenerateArgs, GenerateTarget, handle_generate};
#[cfg(feature = "cli")]
use dw_definition_sdk::cli::commands::init::handle_init;
#[cfg(feature = "cli")]
use dw_definition_sdk::cli::commands::parse::{OutputFormat, ParseArgs, handle_parse};
#[cfg(feature = "cli")]
use dw_definition_sdk::cli::commands::validate::{ValidateArgs, handle_validate};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "dw-definition-cli")]
#[command(about = "Parse, validate and generate SQL from warehouse definition documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Extract a definition document into JSON or YAML
    Parse {
        /// Kind of definition document
        #[arg(value_enum)]
        kind: KindArg,
        /// Input file path or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Output serialization
        #[arg(short, long, value_enum, default_value = "json")]
        format: FormatArg,
        /// Include which sections were found, empty or missing
        #[arg(long)]
        with_report: bool,
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Validate definition documents and print a report
    Validate {
        /// Kind of definition document
        #[arg(value_enum)]
        kind: KindArg,
        /// Input file paths
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Print the full JSON report
        #[arg(long)]
        json: bool,
    },
    /// Generate DDL, ETL, check SQL or a normalized document
    Generate {
        /// Artifact to generate
        #[arg(value_enum)]
        target: TargetArg,
        /// Input file path or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Kind of definition document (only tables produce SQL)
        #[arg(short, long, value_enum, default_value = "table")]
        kind: KindArg,
        /// SQL dialect: hive, mysql, clickhouse or maxcompute
        #[arg(short, long)]
        dialect: Option<String>,
        /// Omit header comments
        #[arg(long)]
        no_comments: bool,
        /// Workspace containing .dw-model.toml
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,
        /// Explicit configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Parse the generated SQL before writing it
        #[arg(long)]
        check_syntax: bool,
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Write a sample .dw-model.toml
    Init {
        /// Workspace path
        #[arg(default_value = ".")]
        workspace: PathBuf,
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
}

#[cfg(feature = "cli")]
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Table,
    Metric,
}

#[cfg(feature = "cli")]
impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Table => DocumentKind::Table,
            KindArg::Metric => DocumentKind::Metric,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Json,
    Yaml,
}

#[cfg(feature = "cli")]
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum TargetArg {
    /// CREATE TABLE statement
    Ddl,
    /// INSERT template
    Etl,
    /// Data-quality check script
    Check,
    /// Normalized definition document
    Document,
}

#[cfg(feature = "cli")]
fn convert_target(target: TargetArg) -> GenerateTarget {
    match target {
        TargetArg::Ddl => GenerateTarget::Ddl,
        TargetArg::Etl => GenerateTarget::Etl,
        TargetArg::Check => GenerateTarget::Check,
        TargetArg::Document => GenerateTarget::Document,
    }
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            kind,
            input,
            format,
            with_report,
            output,
            force,
        } => {
            let args = ParseArgs {
                kind: kind.into(),
                input,
                format: match format {
                    FormatArg::Json => OutputFormat::Json,
                    FormatArg::Yaml => OutputFormat::Yaml,
                },
                with_report,
                output,
                force,
            };
            handle_parse(&args)
        }
        Commands::Validate { kind, inputs, json } => {
            let args = ValidateArgs {
                kind: kind.into(),
                inputs,
                json,
            };
            handle_validate(&args)
        }
        Commands::Generate {
            target,
            input,
            kind,
            dialect,
            no_comments,
            workspace,
            config,
            check_syntax,
            output,
            force,
        } => {
            let args = GenerateArgs {
                target: convert_target(target),
                kind: kind.into(),
                input,
                dialect,
                no_comments,
                workspace,
                config,
                check_syntax,
                output,
                force,
            };
            handle_generate(&args)
        }
        Commands::Init { workspace, force } => handle_init(&workspace, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
