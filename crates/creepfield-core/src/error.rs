//! Error taxonomy for the simulation.

use thiserror::Error;

/// Errors raised by spawning, per-entity updates and configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Malformed input to a constructor or update. Recovered locally.
    #[error("invalid argument in {context}: {detail}")]
    InvalidArgument {
        context: &'static str,
        detail: String,
    },
    /// Programming error. Fatal in debug builds, logged in release.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// Rejected configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SimError {
    pub fn invalid(context: &'static str, detail: impl Into<String>) -> Self {
        SimError::InvalidArgument {
            context,
            detail: detail.into(),
        }
    }
}

