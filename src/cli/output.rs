//! CLI output: error mapping from domain errors to the CLI surface.

use crate::error::AmbientError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &AmbientError) -> String {
    match e {
        AmbientError::Context(inner) => format!("error: {} (check runner construction)", inner),
        other => format!("error: {}", other),
    }
}
