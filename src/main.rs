//! Dig Tool - on-screen game automation helper
//!
//! Samples a desktop region through a cached GDI capture pipeline, sends
//! synthetic clicks, and exposes a dashboard for configuring, exporting
//! and observing the automation.

mod capture;
mod config;
mod dashboard;
mod export;
mod feedback;
mod input;
mod paths;
mod runner;
mod settings;
mod shared;

use anyhow::Result;
use clap::Parser;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::shared::{RunnerCommand, SharedAppState};

/// Dig Tool - on-screen game automation helper
#[derive(Parser, Debug)]
#[command(name = "dig-tool")]
#[command(about = "Automates an on-screen game via region capture and synthetic clicks")]
struct Args {
    /// Path to the configuration file (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start the automation runner immediately
    #[arg(long)]
    start: bool,
}

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Dig Tool starting...");

    let config_path = match args.config {
        Some(path) => Some(path),
        None => match config::config_path() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("no config directory available: {e}");
                None
            }
        },
    };
    let config = load_or_create_config(config_path.as_deref());

    let shared_state = Arc::new(RwLock::new(SharedAppState::new(config)));
    if args.start {
        shared_state.write().runtime.runner_command = Some(RunnerCommand::Start);
    }

    if let Err(e) = dashboard::app::run_dashboard(shared_state, config_path, load_icon()) {
        tracing::error!("Dashboard error: {e}");
    }

    info!("Dig Tool shutdown complete");

    Ok(())
}

/// Load configuration from file or create default
fn load_or_create_config(path: Option<&std::path::Path>) -> AppConfig {
    if let Some(path) = path {
        if path.exists() {
            match config::load_config(path) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    return config;
                }
                Err(e) => warn!("could not read {}: {e}", path.display()),
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

/// Load the window icon; a missing or unreadable icon is not an error.
fn load_icon() -> Option<egui::IconData> {
    let path = paths::icon_path()?;
    match image::open(&path) {
        Ok(img) => {
            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            Some(egui::IconData {
                rgba: rgba.into_raw(),
                width,
                height,
            })
        }
        Err(e) => {
            warn!("could not load icon {}: {e}", path.display());
            None
        }
    }
}
