//! Estimator error types

use thiserror::Error;

/// Result type for estimator operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while constructing or running a [`KalmanFilter`](crate::KalmanFilter).
///
/// None of these are retried: each one is a configuration problem or a numerical
/// degeneracy that rerunning the same inputs cannot fix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Malformed or dimensionally inconsistent construction parameters
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Innovation covariance S = H P Hᵀ + R could not be inverted
    #[error("innovation covariance is singular")]
    SingularInnovationCovariance,

    /// `update` called without a preceding `predict` while strict mode is on
    #[error("update called out of sequence: predict must run first")]
    OutOfSequenceCall,
}

impl FilterError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        FilterError::InvalidConfiguration(reason.into())
    }
}
