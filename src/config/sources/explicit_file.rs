//! Explicit config file source: the file named by `--config`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use std::path::Path;

/// Add the explicit config file. Unlike the global file it must exist.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    match path {
        Some(path) => builder.add_source(File::from(path).required(true)),
        None => builder,
    }
}
