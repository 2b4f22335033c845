//! Solofolio CLI - content validation from the command line
//!
//! Commands: collections, validate, check
//! Outputs JSON to stdout
//! Returns exit code 2 on validation failure

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use solofolio_content::{
    logger,
    pipeline::{ContentPipeline, PipelineError},
    schema::SchemaRegistry,
    site::SiteConfig,
    validation::RawFields,
};

#[derive(Parser)]
#[command(name = "solofolio-cli")]
#[command(about = "Solofolio content collection validator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory with extra JSON schema definitions
    #[arg(short, long)]
    schemas_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List known collections and their shapes
    Collections,

    /// Validate one raw entry
    Validate {
        /// Collection name
        #[arg(short, long)]
        collection: String,

        /// JSON payload (raw front-matter fields)
        #[arg(short, long)]
        payload: String,
    },

    /// Validate a whole content tree
    Check {
        /// Content directory (one subdirectory per collection)
        #[arg(short = 'd', long, default_value = "content")]
        content_dir: PathBuf,

        /// Site config to parse and validate first
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let registry = match &cli.schemas_dir {
        Some(dir) => match SchemaRegistry::load_from_dir(dir) {
            Ok(r) => r,
            Err(e) => {
                eprintln!(r#"{{"error": "Failed to load schemas: {}"}}"#, e);
                return ExitCode::FAILURE;
            }
        },
        None => SchemaRegistry::with_builtins(),
    };

    let pipeline = ContentPipeline::new(registry);

    match cli.command {
        Commands::Collections => {
            let collections: Vec<_> = pipeline
                .collections()
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "collection": s.collection,
                        "schemaVersion": s.schema_version,
                        "fields": s.fields,
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&collections).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Validate { collection, payload } => {
            let raw: RawFields = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "Invalid payload: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            match pipeline.validate_entry(&collection, &raw) {
                Ok(entry) => {
                    let output = serde_json::json!({
                        "valid": true,
                        "entry": entry,
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                    ExitCode::SUCCESS
                }
                Err(PipelineError::Validation(failure)) => {
                    let output = serde_json::json!({
                        "valid": false,
                        "failure": failure,
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                    ExitCode::from(2) // Validation failure
                }
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "{}"}}"#, e);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Check { content_dir, config } => {
            if let Some(path) = config {
                match SiteConfig::load(&path) {
                    Ok(site) => tracing::info!(site = %site.site, "site config ok"),
                    Err(e) => {
                        println!(r#"{{"valid": false, "error": "{}"}}"#, e);
                        return ExitCode::FAILURE;
                    }
                }
            }

            match pipeline.load_dir(&content_dir) {
                Ok(report) => {
                    let output = serde_json::json!({
                        "valid": report.is_clean(),
                        "entries": report.entries,
                        "failures": report.failures,
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                    if report.is_clean() {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::from(2) // At least one document rejected
                    }
                }
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "{}"}}"#, e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
