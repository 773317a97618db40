//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win key by key: defaults, then the global file, then an
//! explicit `--config` file, then `AMBIENT__*` environment variables.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.color", true)?
        .set_default("demo.delay_ms", 5_i64)?
        .set_default("demo.chains", 3_i64)?
        .set_default("demo.worker_threads", 2_i64)
}
