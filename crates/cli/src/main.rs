use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubeferry_core::{
    load_config, validate_config, Config, DownloadBuilder, DownloadHooks, DownloadOutcome, YtDlp,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let url = match args.next() {
        Some(url) if url != "--help" && url != "-h" => url,
        _ => {
            eprintln!("tubeferry {VERSION}");
            eprintln!("Usage: tubeferry <url> [output-dir]");
            eprintln!();
            eprintln!("Environment:");
            eprintln!("  TUBEFERRY_CONFIG  path to a config.toml (optional)");
            eprintln!("  TUBEFERRY_*       config overrides, e.g. TUBEFERRY_EXEC_EXECUTABLE");
            bail!("missing <url> argument");
        }
    };
    let output_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    // An explicit config file is optional; defaults cover the common case of
    // yt-dlp on PATH.
    let config = match std::env::var("TUBEFERRY_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => Config::default(),
    };
    validate_config(&config).context("Invalid configuration")?;

    let client = YtDlp::new(config);
    info!(%url, dir = %output_dir.display(), "starting download");

    let outcome = DownloadBuilder::new(&url, &output_dir)
        .hooks(DownloadHooks::console())
        .client(client)
        .run()
        .await
        .context("Download failed")?;
    // The console hooks leave the cursor on a repainted progress line.
    println!();

    match outcome {
        DownloadOutcome::Single(artifact) => {
            info!(file = %artifact.file_path.display(), "download complete");
            println!("{}", artifact.file_path.display());
        }
        DownloadOutcome::Playlist(result) => {
            info!(
                entries = result.entries.len(),
                playlist = result.playlist.title.as_deref().unwrap_or(result.playlist.id.as_str()),
                "playlist download complete"
            );
            for entry in &result.entries {
                println!("{}", entry.file_path.display());
            }
        }
    }

    Ok(())
}
