//! Config loading facade: one entry point over the layered sources.

use super::merge::merge_policy;
use super::sources::{environment, explicit_file, global_file};
use super::AmbientConfig;
use crate::error::AmbientError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`AmbientConfig`] from defaults, files and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Path to the global config file, if one can be resolved.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Load using the global config file plus an optional explicit file.
    pub fn load(explicit: Option<&Path>) -> Result<AmbientConfig, AmbientError> {
        let global = Self::global_config_path();
        Self::load_layers(global.as_deref(), explicit)
    }

    /// Load from a single file layered over defaults and the environment.
    pub fn load_from_file(path: &Path) -> Result<AmbientConfig, AmbientError> {
        Self::load_layers(None, Some(path))
    }

    /// Load with explicit control over which file layers participate.
    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<AmbientConfig, AmbientError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, global);
        let builder = explicit_file::add_to_builder(builder, explicit);
        let builder = environment::add_to_builder(builder);

        let config: AmbientConfig = builder.build()?.try_deserialize()?;

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            AmbientError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }
}
