//! Configuration System
//!
//! Settings for the `ambient` binary: logging and the demo scenarios.
//! Hierarchical, with environment variable overrides and validation on load.

use crate::error::AmbientError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::environment::{ENV_PREFIX, ENV_SEPARATOR};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmbientConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Demo scenario settings
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Demo scenario settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Delay before a deferred callback resumes, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Number of sibling chains in the isolation scenario
    #[serde(default = "default_chains")]
    pub chains: usize,

    /// Tokio worker threads
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
}

fn default_delay_ms() -> u64 {
    5
}

fn default_chains() -> usize {
    3
}

fn default_worker_threads() -> usize {
    2
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            chains: default_chains(),
            worker_threads: default_worker_threads(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Logging(String),
    Demo(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
            ValidationError::Demo(msg) => write!(f, "Demo: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.chains == 0 {
            return Err("chains must be at least 1".to_string());
        }
        if self.worker_threads == 0 {
            return Err("worker_threads must be at least 1".to_string());
        }
        Ok(())
    }
}

impl AmbientConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }
        if let Err(e) = self.demo.validate() {
            errors.push(ValidationError::Demo(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Render as TOML, as it would appear in a config file.
    pub fn to_toml(&self) -> Result<String, AmbientError> {
        toml::to_string_pretty(self)
            .map_err(|e| AmbientError::Config(format!("Failed to render config: {}", e)))
    }
}
