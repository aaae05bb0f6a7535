// src/cli.rs
use crate::core::{AnalyzeForm, ConfigManager, ExtractClient, FilePart, FsOps, SubmitOutcome, Submitter, UploadForm};
use crate::render::{html, View};
use crate::types::{ServerReply, UploadResult};
use crate::utils::{resolve_under, validate_file_extension};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File types the extraction service knows how to read
const SUPPORTED_UPLOADS: &[&str] = &["pdf", "png", "jpg", "jpeg"];

#[derive(Parser)]
#[command(name = "cvextract")]
#[command(about = "Submit documents to the extraction service and render the results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// How to print the rendered result
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Write the output to a file instead of stdout; relative paths land in the output directory
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, default_value = "config.yaml", global = true)]
    pub config: PathBuf,

    /// Override the extraction service base URL
    #[arg(long, global = true)]
    pub service_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract text and tables from a document
    Upload {
        file: Option<PathBuf>,
        /// Also export decoded tables as CSV; defaults to the output directory
        #[arg(long, num_args = 0..=1, value_name = "DIR")]
        tables_dir: Option<Option<PathBuf>>,
    },
    /// Match a resume against a job description
    Analyze {
        #[arg(long, conflicts_with = "job_file")]
        job_description: Option<String>,
        /// Read the job description from a file
        #[arg(long)]
        job_file: Option<PathBuf>,
        #[arg(long)]
        resume: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

pub async fn handle_command(cli: Cli) -> Result<SubmitOutcome> {
    let config = ConfigManager::load_from(&cli.config)?.with_service_url(cli.service_url.clone());
    let client = ExtractClient::new(&config.service)?;
    let submitter = Submitter::new(client);

    let output_dir = config.output.output_dir.as_path();
    let output = cli.output.as_deref().map(|path| resolve_under(output_dir, path));

    match cli.command {
        Command::Upload { file, tables_dir } => {
            let form = UploadForm {
                file: match file.as_deref() {
                    Some(path) => Some(load_upload(path).await?),
                    None => {
                        warn!("No file selected");
                        None
                    }
                },
            };

            let outcome = submitter.submit_upload(form).await;

            if let (SubmitOutcome::Rendered(value), Some(dir)) = (&outcome, tables_dir) {
                let dir = match dir {
                    Some(dir) => resolve_under(output_dir, &dir),
                    None => output_dir.to_path_buf(),
                };
                export_tables(value, &dir).await?;
            }

            let view = submitter.upload_slot().view().await;
            emit(cli.format, output.as_deref(), "Extraction Result", &*view, &outcome).await?;
            Ok(outcome)
        }

        Command::Analyze {
            job_description,
            job_file,
            resume,
        } => {
            let job_description = match (job_description, job_file) {
                (Some(text), _) => text,
                (None, Some(path)) => FsOps::read_file_safe(&path).await?,
                (None, None) => String::new(),
            };

            let resume = match resume.as_deref() {
                Some(path) => Some(FilePart::from_path(path).await?),
                None => None,
            };

            let outcome = submitter
                .submit_analysis(AnalyzeForm {
                    job_description,
                    resume,
                })
                .await;

            let view = submitter.analysis_slot().view().await;
            emit(cli.format, output.as_deref(), "Resume Analysis", &*view, &outcome).await?;
            Ok(outcome)
        }
    }
}

async fn load_upload(path: &Path) -> Result<FilePart> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if let Err(e) = validate_file_extension(name, SUPPORTED_UPLOADS) {
        warn!("{}; the service will probably reject it", e);
    }
    FilePart::from_path(path).await
}

async fn export_tables(value: &serde_json::Value, dir: &Path) -> Result<()> {
    if let ServerReply::Ok(result) = ServerReply::<UploadResult>::from_value(value.clone())? {
        let tables = result.decode_tables()?;
        let written = FsOps::export_tables_csv(dir, &tables).await?;
        info!("Exported {} table(s) to {}", written.len(), dir.display());
    }
    Ok(())
}

async fn emit<V: View + ?Sized>(
    format: OutputFormat,
    output: Option<&Path>,
    title: &str,
    view: &V,
    outcome: &SubmitOutcome,
) -> Result<()> {
    let content = match format {
        OutputFormat::Text => view.to_text(),
        OutputFormat::Html => html::page(title, view),
        OutputFormat::Json => {
            let value = match outcome {
                SubmitOutcome::Rendered(value) => value.clone(),
                SubmitOutcome::Failed(error) => serde_json::json!({ "error": error }),
                SubmitOutcome::Stale => serde_json::Value::Null,
            };
            let mut json = serde_json::to_string_pretty(&value).context("Failed to encode reply")?;
            json.push('\n');
            json
        }
    };

    match output {
        Some(path) => FsOps::write_file_safe(path, &content).await,
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
