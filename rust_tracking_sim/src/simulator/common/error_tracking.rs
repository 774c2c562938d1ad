//! Error tracking for position estimation accuracy.

use rust_tracking_algo::util::distance_2d;
use rust_tracking_algo::Vector2;

/// Tracks per-step position errors of the estimate and of the raw measurement.
///
/// Comparing the two shows how much the filter improves on the sensor alone.
#[derive(Debug, Clone, Default)]
pub struct ErrorTracker {
    /// History of estimation errors
    est_errors: Vec<f64>,
    /// History of measurement errors
    meas_errors: Vec<f64>,
    est_sq_sum: f64,
    meas_sq_sum: f64,
}

impl ErrorTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Track errors for this timestep.
    pub fn track(&mut self, est_err: f64, meas_err: f64) {
        self.est_errors.push(est_err);
        self.meas_errors.push(meas_err);
        self.est_sq_sum += est_err * est_err;
        self.meas_sq_sum += meas_err * meas_err;
    }

    /// Track errors by computing position differences against the truth.
    pub fn track_positions(&mut self, truth: &Vector2, measurement: &Vector2, estimate: &Vector2) {
        let est_err = distance_2d(truth, estimate);
        let meas_err = distance_2d(truth, measurement);
        self.track(est_err, meas_err);
    }

    /// Get the estimation error history
    pub fn est_errors(&self) -> &[f64] {
        &self.est_errors
    }

    /// Get the measurement error history
    pub fn measurement_errors(&self) -> &[f64] {
        &self.meas_errors
    }

    /// Get the current estimation error (last value).
    pub fn current_est_error(&self) -> Option<f64> {
        self.est_errors.last().copied()
    }

    /// Get the current measurement error (last value).
    pub fn current_measurement_error(&self) -> Option<f64> {
        self.meas_errors.last().copied()
    }

    /// Root-mean-square estimation error over all tracked steps.
    pub fn est_rmse(&self) -> Option<f64> {
        self.rmse(self.est_sq_sum)
    }

    /// Root-mean-square measurement error over all tracked steps.
    pub fn measurement_rmse(&self) -> Option<f64> {
        self.rmse(self.meas_sq_sum)
    }

    fn rmse(&self, sq_sum: f64) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some((sq_sum / self.len() as f64).sqrt())
        }
    }

    /// Get the number of tracked steps
    pub fn len(&self) -> usize {
        self.est_errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.est_errors.is_empty()
    }
}
