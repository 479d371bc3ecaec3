//! SafeDrive accounts: CLI server
//!
//! Headless user account service suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/safedrive-accounts/config.toml)
//! safedrive-accounts-cli
//!
//! # Custom config path and port
//! safedrive-accounts-cli --config /etc/safedrive-accounts/config.toml --port 8080
//!
//! # Validate config without starting
//! safedrive-accounts-cli --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use safedrive_accounts::config::AppConfig;
use safedrive_accounts::server::{init_tracing, ServerHandle, ServerOptions};

/// SafeDrive accounts: user account API server.
#[derive(Parser, Debug)]
#[command(
    name = "safedrive-accounts-cli",
    version,
    about = "User account service for the SafeDrive platform",
    long_about = "SafeDrive accounts: REST API serving user list, create, login and \
                  lookup through POST /api/users/operations.\n\n\
                  Default config: ~/.config/safedrive-accounts/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ACCOUNTS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(safedrive_accounts::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Level override applies before tracing starts so it takes effect
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("{}", e);
            error!("Using default configuration.");
        }
    }

    // ── Apply environment and CLI overrides ────────────────────
    config.apply_env()?;
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
