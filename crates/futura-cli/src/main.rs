//! Futura - Entry Point

use anyhow::Result;
use clap::Parser;
use futura_cli::config::ConfigSource;
use futura_telemetry::Metrics;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = futura_cli::Args::parse();

    // Config path: CLI arg > FUTURA_CONFIG env var > default
    let (config, source) = futura_cli::AppConfig::load(args.config.clone())?;

    futura_telemetry::init_logging(&config.telemetry.log_level)?;
    info!("Starting Futura v{}", env!("CARGO_PKG_VERSION"));

    match &source {
        ConfigSource::File(path) => info!(config_path = %path, "Configuration loaded"),
        ConfigSource::Defaults(path) => {
            warn!(path = %path, "Config file not found, using defaults")
        }
    }

    let app = futura_cli::Application::new(config)?;
    let output = app.execute(&args.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    if args.dump_metrics {
        print!("{}", Metrics::render()?);
    }

    Ok(())
}
