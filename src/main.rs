//! SafeDrive accounts service
//!
//! Reads configuration from a TOML file (`ACCOUNTS_CONFIG`, or
//! ~/.config/safedrive-accounts/config.toml) and serves the user API until
//! SIGINT/SIGTERM.

use std::path::PathBuf;

use tracing::{error, info};

use safedrive_accounts::server::{init_tracing, ServerHandle, ServerOptions};
use safedrive_accounts::{default_config_path, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("ACCOUNTS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_tracing(&AppConfig::default());
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };
    config.apply_env()?;

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: true,
    })
    .await?;
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
