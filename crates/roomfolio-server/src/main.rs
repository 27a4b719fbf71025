//! Roomfolio server - Main entry point
//!
//! Serves the 3D portfolio frontend and its room model, and uploads the
//! model to blob storage on request.

mod api;
mod config;
mod glb_fetch;
mod server;
mod state;
mod upload;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "roomfolio")]
#[command(about = "Interactive 3D portfolio room server")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "roomfolio.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the frontend and /api/glb (default)
    Serve {
        /// Bind address for web server
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Upload the room model to blob storage and write blob-config.json
    Upload {
        /// GLB file to upload (defaults to the configured asset path)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Where to write the blob config (defaults to the configured path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a default configuration file and exit
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Roomfolio v{}", env!("CARGO_PKG_VERSION"));

    match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::InitConfig => {
            config::save_default_config(&args.config)?;
            println!("Wrote default configuration to {}", args.config.display());
        }
        Command::Upload { file, output } => {
            let config = config::load_config(&args.config)?;
            let file = file.unwrap_or_else(|| config.asset.path.clone());
            let output = output.unwrap_or_else(|| config.blob.config_path.clone());

            let blob = upload::upload_glb(&config.blob, &file, &output).await?;
            println!("Uploaded {} to {}", file.display(), blob.blob_url);
        }
        Command::Serve { bind } => {
            let mut config = config::load_config(&args.config)?;

            // Override bind address if specified
            if let Some(bind) = bind {
                config.server.bind = bind;
            }

            info!(
                asset = %config.asset.path.display(),
                fallbacks = config.asset.cdn_urls.len(),
                "Configuration loaded"
            );

            let state = state::AppState::new(config.clone())?;
            server::run(state, &config.server.bind, config.server.tls.as_ref()).await?;
        }
    }

    Ok(())
}
