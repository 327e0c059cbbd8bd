//! Configuration error types

use thiserror::Error;

/// Errors raised while resolving a textual animation description.
///
/// The controller itself never fails; only parsing names and counts can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Easing name not present in the easing table
    #[error("Unknown easing: {0}")]
    UnknownEasing(String),

    /// Duration that is neither a number nor a speed preset
    #[error("Unknown speed: {0} (expected milliseconds, \"slow\", \"normal\" or \"fast\")")]
    UnknownSpeed(String),

    /// Iteration that is neither an integer nor "infinite"
    #[error("Invalid iteration: {0} (expected an integer or \"infinite\")")]
    InvalidIteration(String),
}

/// Result type for configuration parsing
pub type Result<T> = std::result::Result<T, ConfigError>;
