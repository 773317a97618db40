//! Global config file source: $XDG_CONFIG_HOME/ambient/config.toml or the
//! platform equivalent.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to the global config file, if a home directory can be resolved.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ambient").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global config file to builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    match path {
        Some(path) if path.exists() => {
            debug!(config_path = %path.display(), "Loading global configuration");
            builder.add_source(File::from(path).required(false))
        }
        Some(path) => {
            debug!(config_path = %path.display(), "No global configuration file");
            builder
        }
        None => builder,
    }
}
