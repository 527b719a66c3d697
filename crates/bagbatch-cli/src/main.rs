//! Bagbatch CLI - Main entry point

use bagbatch_cli::{Cli, Commands};
use bagbatch_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        // Verbose mode: log to console with debug level
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("bagbatch".to_string())
            .build()
    } else {
        // Normal mode: only warnings and errors to console
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("bagbatch".to_string())
            .build()
    };

    // Environment variables take precedence over the flag
    let log_config = log_config
        .with_env_overrides()
        .unwrap_or_else(|_| LogConfig::new());

    // Initialize logging (ignore errors as the CLI should work without logging)
    let _ = init_logging(&log_config);

    // Execute command
    let result = execute_command(cli).await;

    // Handle result
    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> bagbatch_cli::Result<()> {
    match cli.command {
        Commands::Bag {
            directory,
            baginfo,
            csv,
        } => bagbatch_cli::commands::bag::run(directory, baginfo, csv, cli.verbose).await,

        Commands::Unbag {
            folders,
            directory,
            yes,
        } => bagbatch_cli::commands::unbag::run(directory, folders, yes).await,
    }
}
