//! Mediaflow CLI: run the upload pipeline against the configured storage and database.
//!
//! Configuration comes from the environment (or `.env`): UPLOAD_PROVIDER, UPLOAD_PATH or the
//! AWS_* variables, DATABASE_URL.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mediaflow_cli::{incoming_file, init_tracing, print_json, ErrorBody};
use mediaflow_core::{AppError, Config, ErrorMetadata, MetadataStore};
use mediaflow_db::{connect, run_migrations, UploadRepository};
use mediaflow_processing::UploadOrchestrator;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "mediaflow", about = "Mediaflow upload pipeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one or more files as a single batch
    Upload {
        /// Paths of the files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Owning user UUID; anonymous when omitted
        #[arg(long)]
        user: Option<Uuid>,
    },
    /// Get an upload record by ID
    Get {
        /// Record UUID
        id: Uuid,
    },
    /// Apply database migrations
    Migrate,
}

async fn run(cli: Cli) -> anyhow::Result<Result<(), AppError>> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let pool = connect(&config).await?;

    match cli.command {
        Commands::Upload { files, user } => {
            let incoming = files
                .iter()
                .map(|path| incoming_file(path))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let storage = mediaflow_storage::create_storage(&config)
                .await
                .context("Failed to initialize storage")?;
            let store: Arc<dyn MetadataStore> = Arc::new(UploadRepository::new(pool));
            let orchestrator = UploadOrchestrator::with_default_codec(&config, storage, store);

            match orchestrator.upload_files(incoming, user).await {
                Ok(records) => print_json(&records)?,
                Err(e) => return Ok(Err(e)),
            }
        }
        Commands::Get { id } => {
            let repository = UploadRepository::new(pool);
            match repository.get_record(id).await {
                Ok(Some(record)) => print_json(&record)?,
                Ok(None) => return Ok(Err(AppError::NotFound(format!("Upload {} not found", id)))),
                Err(e) => return Ok(Err(e)),
            }
        }
        Commands::Migrate => {
            run_migrations(&pool).await?;
            print_json(&serde_json::json!({ "success": true }))?;
        }
    }

    Ok(Ok(()))
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            tracing::error!(error = %e.detailed_message(), code = e.error_code(), "Command failed");
            let body = serde_json::to_string_pretty(&ErrorBody::from(&e))
                .unwrap_or_else(|_| e.to_string());
            eprintln!("{}", body);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
