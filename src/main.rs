//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mx_finder` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Ctrl-C handling
//! - Exit codes and user-facing output
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mx_finder::config::{EXIT_FAILURE, EXIT_NO_SEEDS};
use mx_finder::initialization::init_logger_with;
use mx_finder::{
    run_search, shutdown_gracefully, spawn_interrupt_listener, CancellationToken, Config,
    SeedError,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables (e.g. RUST_LOG) from .env, current directory
    // first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let cancel = CancellationToken::new();
    let listener = spawn_interrupt_listener(cancel.clone());
    let result = run_search(config, cancel).await;
    shutdown_gracefully(listener).await;

    match result {
        Ok(report) => {
            println!(
                "✅ Found {} mail server{} from {} seed domain{}{} in {:.1}s",
                report.mail_servers.len(),
                if report.mail_servers.len() == 1 { "" } else { "s" },
                report.seeds,
                if report.seeds == 1 { "" } else { "s" },
                if report.interrupted { " (interrupted)" } else { "" },
                report.elapsed_seconds
            );
            println!("Results appended to {}", report.output.display());
            Ok(())
        }
        Err(e) => {
            if let Some(SeedError::Empty) = e.downcast_ref::<SeedError>() {
                eprintln!("No domains found");
                process::exit(EXIT_NO_SEEDS);
            }
            eprintln!("mx_finder error: {:#}", e);
            process::exit(EXIT_FAILURE);
        }
    }
}
