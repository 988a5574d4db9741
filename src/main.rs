use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use curator::api::{ApiClient, ApiError};
use curator::app::{App, AppEvent};
use curator::config::Config;
use curator::route::Location;
use curator::theme::ThemeVariant;
use curator::ui;

/// Get the config directory path (~/.config/curator/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("curator");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(name = "curator", about = "Terminal admin console for an article curation backend")]
struct Args {
    /// Backend API base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Location to open, e.g. "articles?page=3"
    #[arg(long, value_name = "LOCATION")]
    open: Option<String>,

    /// Theme variant: "dark" or "light" (overrides the config file)
    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    let config = Config::load(&config_dir.join("config.toml"))
        .context("Failed to load configuration")?;

    let api_base = args
        .api_url
        .as_deref()
        .unwrap_or(&config.api_base_url)
        .to_string();
    let token = config.resolve_token();

    let api = match ApiClient::new(
        &api_base,
        Duration::from_secs(config.request_timeout_secs),
        token,
    ) {
        Ok(api) => api,
        Err(ApiError::InsecureBaseUrl) => {
            eprintln!("Error: API base URL must use HTTPS (plain HTTP is allowed for localhost only).");
            eprintln!("Configured URL: {}", api_base);
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to build API client: {}", e));
        }
    };

    // Resolve the starting location; a bad deep link lands on page 1.
    let location = args
        .open
        .as_deref()
        .map(Location::parse)
        .unwrap_or_default();

    let theme_name = args.theme.as_deref().unwrap_or(&config.theme);
    let theme_variant = match ThemeVariant::from_str_name(theme_name) {
        Some(variant) => variant,
        None => {
            tracing::warn!(theme = %theme_name, "Unknown theme, falling back to dark");
            ThemeVariant::Dark
        }
    };

    tracing::info!(api_base = %api_base, location = %location, "Starting curator");

    // Create app state
    let mut app = App::new(api, location, theme_variant);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
