//! Simulation error types

use rust_tracking_algo::FilterError;
use thiserror::Error;

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while simulating or running a tracking pass
#[derive(Error, Debug)]
pub enum SimError {
    /// Simulator or noise parameters out of range
    #[error("invalid simulation configuration: {0}")]
    InvalidConfiguration(String),

    /// The estimator rejected its configuration or failed mid-run
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Writing recorded results failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(reason.into())
    }
}
