//! Underwater GPS position logger - entry point.
//!
//! Polls the device's position endpoints on a fixed cadence and records
//! them as timestamped CSV rows under a per-run session directory, until
//! the operator interrupts with ctrl-c.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use ugps_logger::{AppConfig, Application};

/// Underwater GPS position logger
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via UGPS_CONFIG env var)
    #[arg(long)]
    config: Option<String>,

    /// Base URL of the device API
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// Directory session recordings are created under
    #[arg(short = 's', long)]
    save_dir: Option<String>,

    /// Don't save the recording
    #[arg(short = 'n', long)]
    no_save: bool,

    /// Poll interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Dump IMU/orientation diagnostics at startup
    #[arg(long)]
    diagnostics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    ugps_telemetry::init_logging()?;

    info!("Starting ugps-logger v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > UGPS_CONFIG env var > default location
    let config_path = args.config.or_else(|| std::env::var("UGPS_CONFIG").ok());
    let mut config = match config_path {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            AppConfig::from_file(&path)?
        }
        None => AppConfig::load()?,
    };

    // CLI flags override file values
    if let Some(url) = args.url {
        config.base_url = url;
    }
    if let Some(save_dir) = args.save_dir {
        config.save_dir = save_dir;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.poll_interval_ms = interval_ms;
    }
    if args.no_save {
        config.persist = false;
    }
    if args.diagnostics {
        config.startup_diagnostics = true;
    }

    info!(
        base_url = %config.base_url,
        save_dir = %config.save_dir,
        persist = config.persist,
        poll_interval_ms = config.poll_interval_ms,
        "Configuration loaded"
    );

    let app = Application::new(config)?;
    app.run().await?;

    Ok(())
}
