//! Ambient CLI Binary
//!
//! Runs the context propagation scenarios from the command line.

use ambient_context::cli::{map_error, Cli, RunContext};
use ambient_context::config::ConfigLoader;
use ambient_context::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Ambient CLI starting");

    let context = match RunContext::new(cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing run context: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = ConfigLoader::load(cli.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}
