//! CLI parse: clap types for the ambient binary. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ambient - context propagation scenarios
#[derive(Parser, Debug)]
#[command(name = "ambient")]
#[command(about = "Run ambient context propagation scenarios")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Nested runners across a deferred callback
    Demo {
        /// Delay before the deferred callback resumes, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Sibling chains that interleave on the runtime and report what they observed
    Isolation {
        /// Number of sibling chains
        #[arg(long)]
        chains: Option<usize>,

        /// Run each chain as a spawned task instead of joining futures
        #[arg(long)]
        spawn: bool,
    },
    /// Print the resolved configuration
    Config,
}
