//! Bike rental service: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/bike-rental/config.toml)
//! bike-rental
//!
//! # Custom config path
//! bike-rental --config /etc/bike-rental/config.toml
//!
//! # Override the port
//! bike-rental --api-port 8081
//!
//! # Validate config without starting
//! bike-rental --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use bike_rental::config::AppConfig;
use bike_rental::server::{init_tracing, ServerHandle, ServerOptions};

/// Bicycle rental REST API server.
#[derive(Parser, Debug)]
#[command(
    name = "bike-rental",
    version,
    about = "Bicycle rental management backend",
    long_about = "REST API for bicycles, locations, users, discounts and rentals.\n\n\
                  Default config: ~/.config/bike-rental/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BIKE_RENTAL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

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
    let config_path = cli.config.unwrap_or_else(bike_rental::default_config_path);

    let loaded = AppConfig::load(&config_path);
    if cli.check {
        // no server, no tracing: report and exit
        let mut config = loaded?;
        if let Some(port) = cli.api_port {
            config.server.api_port = port;
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        return Ok(());
    }

    let mut config = match loaded {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            // Init tracing first so subsequent logs are formatted properly
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
