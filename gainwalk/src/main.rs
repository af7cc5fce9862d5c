//! gainwalk - Entry point for the CLI application
//!
//! Exit status: 2 for invalid configuration, 1 for startup failures, 0 once
//! every directory has been processed (individual analysis failures are
//! logged but do not change the exit status).

use anyhow::{Context, Result};
use clap::Parser;
use gainwalk::cli::Cli;
use gainwalk::{walk_library, ProcessExecutor};
use gainwalk_common::config::resolve_toml_config;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            if is_configuration_error(&e) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // The file may set the default log level, so load it before tracing starts
    let file_config = resolve_toml_config(cli.config.as_deref());
    let file_level = file_config
        .as_ref()
        .map(|c| c.logging.level.as_str())
        .unwrap_or("info");
    setup_logging(&cli.log_directive(file_level))?;

    info!(
        "Starting gainwalk v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let file_config = file_config.context("Invalid configuration file")?;
    let startup = cli
        .resolve(&file_config)
        .context("Invalid configuration")?;

    info!(
        "Analysis command: {} {}",
        startup.command.tool.display(),
        startup.command.command_template().join(" ")
    );

    let executor = Arc::new(ProcessExecutor::new(startup.command.tool.clone()));
    match walk_library(&startup.library_root, &startup.command, executor).await {
        Ok(summary) => info!("Walk complete: {}", summary),
        // Reported only; exit status stays 0
        Err(e) => error!("Error walking library folder: {}", e),
    }

    Ok(())
}

/// Initialize tracing; RUST_LOG overrides `default_directive`
fn setup_logging(default_directive: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

fn is_configuration_error(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<gainwalk_common::Error>(),
        Some(gainwalk_common::Error::Config(_)) | Some(gainwalk_common::Error::Toml(_))
    )
}
