//! Docuscan command-line interface.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docuscan::{BatchConfig, EasyOcrBackend, JsonProgressStore, run_batch};

#[derive(Parser)]
#[command(name = "docuscan", version, about = "Batch OCR document pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the batch pipeline over a directory of images
    Batch {
        /// Input directory scanned recursively for images
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        /// Directory receiving one JSON result per image
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Worker pool size (default: number of CPUs, capped at 4)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Contrast level below which a region is re-recognized
        #[arg(long)]
        contrast_threshold: Option<f64>,

        /// Target contrast for the second recognition pass
        #[arg(long)]
        adjust_contrast: Option<f64>,

        /// Progress checkpoint file
        #[arg(long)]
        progress_file: Option<PathBuf>,

        /// Recognition languages (repeatable)
        #[arg(short, long)]
        language: Vec<String>,

        /// Config file (toml or json); defaults to discovery of docuscan.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render PDFs to per-page JPEGs so they can enter the batch pipeline
    #[cfg(feature = "pdf")]
    Preprocess {
        /// Directory containing PDF files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Directory receiving the rendered pages
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Render resolution
        #[arg(long, default_value_t = 300)]
        dpi: i32,
    },

    /// Start the HTTP API server
    #[cfg(feature = "api")]
    Serve {
        /// Address to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Config file (toml or json); defaults to discovery of docuscan.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<BatchConfig> {
    match path {
        Some(path) => BatchConfig::from_file(path).with_context(|| format!("loading config {}", path.display())),
        None => Ok(BatchConfig::discover()?.unwrap_or_default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Batch {
            input_dir,
            output_dir,
            workers,
            contrast_threshold,
            adjust_contrast,
            progress_file,
            language,
            config,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(dir) = input_dir {
                config.input_dir = dir;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if let Some(workers) = workers {
                config.worker_count = Some(workers);
            }
            if let Some(value) = contrast_threshold {
                config.contrast_threshold = value;
            }
            if let Some(value) = adjust_contrast {
                config.adjust_contrast = value;
            }
            if let Some(path) = progress_file {
                config.progress_file = path;
            }
            if !language.is_empty() {
                config.languages = language;
            }

            let mut backend = EasyOcrBackend::new();
            if let Some(secs) = config.timeout_secs {
                backend = backend.with_timeout(std::time::Duration::from_secs(secs));
            }
            let store = Arc::new(JsonProgressStore::new(&config.progress_file));

            let summary = run_batch(&config, Arc::new(backend), store).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);

            if summary.failed() > 0 {
                anyhow::bail!("{} of {} items failed", summary.failed(), summary.outcomes.len());
            }
            Ok(())
        }

        #[cfg(feature = "pdf")]
        Command::Preprocess {
            input_dir,
            output_dir,
            dpi,
        } => {
            let options = docuscan::RasterizeOptions { dpi };
            let count = docuscan::rasterize_dir(&input_dir, &output_dir, &options)?;
            tracing::info!(pdfs = count, "preprocessing finished");
            Ok(())
        }

        #[cfg(feature = "api")]
        Command::Serve { host, port, config } => {
            let config = load_config(config.as_ref())?;
            docuscan::api::serve_with_config(&host, port, config).await?;
            Ok(())
        }
    }
}
