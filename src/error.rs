//! Error types for the ambient context engine.

use crate::context::ContextKey;
use thiserror::Error;

/// Why a pair's handle was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidHandleReason {
    /// The key was never issued by `create_context`.
    Unregistered { raw: u64 },

    /// The key was issued for a different value type than the one supplied.
    TypeMismatch {
        key: ContextKey,
        expected: &'static str,
        found: &'static str,
    },
}

impl std::fmt::Display for InvalidHandleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidHandleReason::Unregistered { raw } => {
                write!(f, "key {} was not created by `create_context`", raw)
            }
            InvalidHandleReason::TypeMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "{} holds values of type {}, got {}",
                key, expected, found
            ),
        }
    }
}

/// Runner construction errors. Both are reported before any callback runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("Missing context in override pair #{index}")]
    MissingHandle { index: usize },

    #[error("Invalid context in override pair #{index}: {reason}")]
    InvalidHandle {
        index: usize,
        reason: InvalidHandleReason,
    },
}

/// Errors surfaced by the configuration, logging and CLI layers.
#[derive(Debug, Error)]
pub enum AmbientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    #[error("Task failed: {0}")]
    Task(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio::task::JoinError> for AmbientError {
    fn from(err: tokio::task::JoinError) -> Self {
        AmbientError::Task(err.to_string())
    }
}

impl From<config::ConfigError> for AmbientError {
    fn from(err: config::ConfigError) -> Self {
        AmbientError::Config(err.to_string())
    }
}
