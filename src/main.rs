//! hygiene-batch - batch API server for domain hygiene testing

use clap::Parser;
use hygiene_batch::config::Config;
use hygiene_batch::server;
use hygiene_batch::utils::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Batch API server
#[derive(Debug, Parser)]
#[command(name = "batch-server", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "BATCH_CONFIG", default_value = "config/batch.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let (config, file_error) = if args.config.exists() {
        match Config::from_file(&args.config).await {
            Ok(config) => (config, None),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        match Config::from_env() {
            Ok(config) => (config, Some(args.config.display().to_string())),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    };

    if let Err(e) = init_logging(config.logging()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match file_error {
        Some(path) => warn!("Configuration file {} not found, using defaults and environment", path),
        None => info!("Configuration loaded from {}", args.config.display()),
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
