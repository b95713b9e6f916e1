//! CLI binary entry point for ellie-importer

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use ellie_importer::cli::commands::diagram::{DiagramArgs, DiagramFormat, handle_diagram};
#[cfg(feature = "cli")]
use ellie_importer::cli::commands::folders::handle_folders;
#[cfg(feature = "cli")]
use ellie_importer::cli::commands::publish::{FolderTarget, PublishArgs, handle_publish};
#[cfg(feature = "cli")]
use ellie_importer::cli::commands::tables::handle_tables;
#[cfg(feature = "cli")]
use ellie_importer::cli::commands::validate::handle_validate;
#[cfg(feature = "cli")]
use ellie_importer::cli::error::CliError;
#[cfg(feature = "cli")]
use ellie_importer::config::ImporterConfig;
#[cfg(feature = "cli")]
use ellie_importer::model::TableSelection;
#[cfg(feature = "cli")]
use ellie_importer::models::DuplicatePolicy;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "ellie-importer")]
#[command(about = "Turn ODCS data models into diagrams and Ellie models")]
#[command(version)]
struct Cli {
    /// Directory containing .ellie-importer.toml (default: current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Render an entity-relationship diagram
    Diagram {
        /// Input file or '-' for stdin
        input: String,
        #[arg(short, long, value_enum, default_value = "mermaid")]
        format: DiagramFormatArg,
        /// Show every constraint flag and descriptions (dot format)
        #[arg(long)]
        full_metadata: bool,
        /// Duplicate handling: ignore-duplicates, add-postfix, combine-attributes
        #[arg(long)]
        duplicates: Option<DuplicatePolicy>,
        /// Comma-separated entity names (dot format)
        #[arg(long, value_delimiter = ',')]
        tables: Option<Vec<String>>,
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List entity names after duplicate handling
    Tables {
        /// Input file or '-' for stdin
        input: String,
        #[arg(long)]
        duplicates: Option<DuplicatePolicy>,
    },
    /// Report relationships that will not reach the payload
    Validate {
        /// Input file or '-' for stdin
        input: String,
        #[arg(long)]
        duplicates: Option<DuplicatePolicy>,
        #[arg(long, value_delimiter = ',')]
        tables: Option<Vec<String>>,
    },
    /// Test the connection and list folders
    Folders {
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Create a model from a document
    Publish {
        /// Input file or '-' for stdin
        input: String,
        /// Target folder name
        #[arg(long, conflicts_with = "folder_id")]
        folder: Option<String>,
        /// Target folder identifier
        #[arg(long)]
        folder_id: Option<String>,
        #[arg(long)]
        model_name: Option<String>,
        /// Progress status label
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        duplicates: Option<DuplicatePolicy>,
        #[arg(long, value_delimiter = ',')]
        tables: Option<Vec<String>>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
        /// Print the payload instead of submitting it
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(feature = "cli")]
#[derive(clap::ValueEnum, Clone, Debug)]
enum DiagramFormatArg {
    /// Mermaid erDiagram
    Mermaid,
    /// Graphviz DOT
    Dot,
}

#[cfg(feature = "cli")]
fn convert_diagram_format(format: DiagramFormatArg) -> DiagramFormat {
    match format {
        DiagramFormatArg::Mermaid => DiagramFormat::Mermaid,
        DiagramFormatArg::Dot => DiagramFormat::Dot,
    }
}

/// Flag value, falling back to the configured list
#[cfg(feature = "cli")]
fn selection(tables: Option<Vec<String>>, config: &ImporterConfig) -> TableSelection {
    match tables {
        Some(names) => TableSelection::only(
            names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        ),
        None => config.import.selection(),
    }
}

#[cfg(feature = "cli")]
fn init_logging(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_lowercase()))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> Result<(), CliError> {
    let config_dir = cli.config.unwrap_or_else(|| PathBuf::from("."));
    let config = ImporterConfig::load(&config_dir)?;
    let default_policy = config.import.duplicate_handling;

    match cli.command {
        Commands::Diagram {
            input,
            format,
            full_metadata,
            duplicates,
            tables,
            output,
        } => {
            let args = DiagramArgs {
                input,
                format: convert_diagram_format(format),
                full_metadata: full_metadata || config.import.full_metadata,
                policy: duplicates.unwrap_or(default_policy),
                selection: selection(tables, &config),
                output,
            };
            handle_diagram(&args)
        }
        Commands::Tables { input, duplicates } => {
            handle_tables(&input, duplicates.unwrap_or(default_policy))
        }
        Commands::Validate {
            input,
            duplicates,
            tables,
        } => handle_validate(
            &input,
            duplicates.unwrap_or(default_policy),
            &selection(tables, &config),
        ),
        Commands::Folders { slug, api_key } => handle_folders(
            slug.or(config.connection.slug.clone()).as_deref(),
            api_key.or(config.connection.api_key.clone()).as_deref(),
        ),
        Commands::Publish {
            input,
            folder,
            folder_id,
            model_name,
            status,
            duplicates,
            tables,
            slug,
            api_key,
            dry_run,
        } => {
            let folder = folder.or(config.import.folder.clone());
            let args = PublishArgs {
                input,
                policy: duplicates.unwrap_or(default_policy),
                selection: selection(tables, &config),
                model_name: model_name.unwrap_or_else(|| config.import.model_name.clone()),
                progress_status: status.unwrap_or_else(|| config.import.progress_status.clone()),
                folder: FolderTarget::from_args(folder_id.as_deref(), folder.as_deref()),
                slug: slug.or(config.connection.slug.clone()),
                api_key: api_key.or(config.connection.api_key.clone()),
                dry_run,
            };
            handle_publish(&args)
        }
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
