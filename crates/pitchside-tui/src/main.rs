mod action;
mod app;
mod app_state;
mod component;
mod components;
mod debounce;
mod export;
mod filter;
mod modal;
mod player;
mod surface;
mod theme;
mod watch;
mod widgets;
mod workspace;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use pitchside_proto::config::Config;
use pitchside_proto::platform;
use pitchside_proto::Gateway;

/// Live and upcoming matches in the terminal.
#[derive(Debug, Parser)]
#[command(name = "pitchside", version)]
struct Cli {
    /// Override `api.base_url` from the config file.
    #[arg(long)]
    base_url: Option<String>,

    /// Read this config file instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Fetch once and write the cards as a static HTML page.
    Export {
        #[arg(long, default_value = "pitchside.html")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;

    let log_path = data_dir.join("pitchside.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("pitchside log: {}", log_path.display());
    tracing::info!("pitchside starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("config: {:#}, using defaults", e);
            Config::default()
        }),
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let gateway = Gateway::from_config(&config.api)?;
    tracing::info!("data source: {}", gateway.base_url());

    match cli.command {
        Some(Cmd::Export { out }) => {
            let (live, upcoming) = export::export_snapshot(&gateway, &out).await?;
            eprintln!(
                "wrote {} live / {} upcoming to {}",
                live,
                upcoming,
                out.display()
            );
        }
        None => {
            let session_path = data_dir.join("ui_state.json");
            let app = app::App::new(config, gateway, session_path);
            if let Err(e) = app.run().await {
                tracing::error!("TUI exited with error: {:#}", e);
                return Err(e);
            }
        }
    }

    tracing::info!("pitchside exiting");
    Ok(())
}
