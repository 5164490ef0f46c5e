//! bwfm-ex - Broadcast Wave metadata extractor
//!
//! Prints the scene, take, timecode and track metadata of one BWF file as
//! a labelled report or as JSON.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bwfm_common::config::{OutputFormat, TomlConfig};
use bwfm_ex::services::is_wav_file_name;
use bwfm_ex::{render_report, LocalFile, MetadataExtractor};
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for bwfm-ex
#[derive(Parser, Debug)]
#[command(name = "bwfm-ex")]
#[command(about = "Extract production metadata from Broadcast Wave files")]
#[command(version)]
struct Args {
    /// WAV file to read
    file: PathBuf,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of the labelled report
    #[arg(long)]
    json: bool,

    /// Skip probing the audio stream for its duration
    #[arg(long)]
    no_duration: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_source) = TomlConfig::load_with_source(args.config.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    config_source.log();

    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !is_wav_file_name(&name) {
        bail!("{} is not a .wav file", args.file.display());
    }

    let mut extraction = config.extraction.clone();
    if args.no_duration {
        extraction.probe_duration = false;
    }
    let extractor = MetadataExtractor::from_config(&extraction);

    let file = LocalFile::open(&args.file)
        .await
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    info!(path = %file.path().display(), "Reading metadata");

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if signal::ctrl_c().await.is_ok() {
                warn!("Interrupted");
                cancel.cancel();
            }
        }
    });

    let metadata = extractor
        .extract_with_cancellation(&file, &cancel)
        .await
        .with_context(|| format!("Failed to extract metadata from {}", args.file.display()))?;

    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output.format
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&metadata)?),
        OutputFormat::Table => print!("{}", render_report(&metadata)),
    }

    Ok(())
}
