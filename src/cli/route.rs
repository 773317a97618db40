//! CLI route: single route table and run context.

use crate::cli::parse::Commands;
use crate::cli::scenarios::{self, ChainObservation};
use crate::config::{AmbientConfig, ConfigLoader};
use crate::error::AmbientError;
use std::path::Path;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

/// Runtime context for CLI execution: resolved config and the Tokio runtime.
pub struct RunContext {
    config: AmbientConfig,
    runtime: Runtime,
}

impl RunContext {
    /// Load configuration and build the runtime.
    pub fn new(config_path: Option<&Path>) -> Result<Self, AmbientError> {
        let config = ConfigLoader::load(config_path)?;
        Self::from_config(config)
    }

    pub fn from_config(config: AmbientConfig) -> Result<Self, AmbientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.demo.worker_threads)
            .enable_time()
            .build()?;
        debug!(
            worker_threads = config.demo.worker_threads,
            "Runtime initialized"
        );
        Ok(Self { config, runtime })
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, AmbientError> {
        match command {
            Commands::Demo { delay_ms } => {
                let delay = Duration::from_millis(delay_ms.unwrap_or(self.config.demo.delay_ms));
                let report = self.runtime.block_on(scenarios::demo(delay))?;
                Ok(format!(
                    "outside: age {} name {}\ndeferred: age {} name {}",
                    report.outside.0, report.outside.1, report.deferred.0, report.deferred.1
                ))
            }
            Commands::Isolation { chains, spawn } => {
                let chains = chains.unwrap_or(self.config.demo.chains);
                let delay = Duration::from_millis(self.config.demo.delay_ms);
                let observations = self
                    .runtime
                    .block_on(scenarios::isolation(chains, delay, *spawn))?;
                Ok(format_observations(&observations))
            }
            Commands::Config => self.config.to_toml(),
        }
    }
}

fn format_observations(observations: &[ChainObservation]) -> String {
    let mut lines: Vec<String> = observations
        .iter()
        .map(|o| {
            let observed = o
                .observed
                .map(|v| v.to_string())
                .unwrap_or_else(|| "none".to_string());
            format!(
                "chain {} observed {} (resumed #{})",
                o.chain, observed, o.resume_order
            )
        })
        .collect();

    let leaked = observations.iter().filter(|o| !o.is_isolated()).count();
    if leaked == 0 {
        lines.push(format!("all {} chains isolated", observations.len()));
    } else {
        warn!(leaked, "Chains observed a foreign association");
        lines.push(format!("{} chains observed a foreign association", leaked));
    }
    lines.join("\n")
}
