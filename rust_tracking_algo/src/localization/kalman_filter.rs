//! Discrete-time linear Kalman filter over a 2D constant-velocity model.
//!
//! The filter keeps a 4-dimensional belief `[x, y, vx, vy]` with covariance `P`
//! and consumes one noisy position measurement per timestep:
//!
//! ```text
//! predict:  x ← F x            P ← F P Fᵀ + Q
//! update:   y = z − H x        S = H P Hᵀ + R
//!           K = P Hᵀ S⁻¹       x ← x + K y
//!           P ← (I − K H) P (I − K H)ᵀ + K R Kᵀ
//! ```
//!
//! The covariance update uses the Joseph form so `P` stays symmetric and
//! positive semi-definite over long runs.
//!
//! ## Example
//!
//! ```
//! use rust_tracking_algo::prelude::*;
//!
//! let mut kf = KalmanFilter::new(KalmanConfig::default()).unwrap();
//! for z in [vector![0.0, 0.0], vector![1.0, 0.0], vector![2.0, 0.0]] {
//!     kf.predict();
//!     let est = kf.update(&z).unwrap();
//!     println!("({:.2}, {:.2})", est.x, est.y);
//! }
//! ```

use nalgebra::DMatrix;

use super::constant_velocity::{observation_matrix, transition_matrix, white_noise_acceleration};
use crate::error::{FilterError, FilterResult};
use crate::util::{symmetrize, Matrix2, Matrix2x4, Matrix4, Vector2, Vector4};

/// A covariance given either as a scalar multiple of identity or as a full matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum CovarianceSpec {
    /// `σ² · I`
    Scalar(f64),
    /// Full matrix, dimensions checked at construction
    Full(DMatrix<f64>),
}

impl From<f64> for CovarianceSpec {
    fn from(value: f64) -> Self {
        CovarianceSpec::Scalar(value)
    }
}

impl From<DMatrix<f64>> for CovarianceSpec {
    fn from(value: DMatrix<f64>) -> Self {
        CovarianceSpec::Full(value)
    }
}

impl CovarianceSpec {
    fn resolve<const N: usize>(&self, name: &str) -> FilterResult<nalgebra::SMatrix<f64, N, N>> {
        match self {
            CovarianceSpec::Scalar(var) => {
                check_variance(name, *var)?;
                Ok(nalgebra::SMatrix::<f64, N, N>::identity() * *var)
            }
            CovarianceSpec::Full(m) => fixed_from_dynamic::<N>(name, m),
        }
    }
}

/// Process noise: a scalar acceleration variance run through the
/// white-noise-acceleration model, or a full 4x4 matrix used as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessNoise {
    Variance(f64),
    Full(DMatrix<f64>),
}

impl From<f64> for ProcessNoise {
    fn from(value: f64) -> Self {
        ProcessNoise::Variance(value)
    }
}

impl From<DMatrix<f64>> for ProcessNoise {
    fn from(value: DMatrix<f64>) -> Self {
        ProcessNoise::Full(value)
    }
}

/// Kalman filter construction parameters.
///
/// Fixed for the life of a filter instance.
#[derive(Debug, Clone, PartialEq)]
pub struct KalmanConfig {
    /// Initial position estimate; initial velocity is taken as zero
    pub initial_position: Vector2,
    /// Initial state covariance P0 (4x4)
    pub initial_covariance: CovarianceSpec,
    /// Measurement noise covariance R (2x2)
    pub measurement_variance: CovarianceSpec,
    /// Process noise Q
    pub process_noise: ProcessNoise,
    /// Timestep between measurements, must be positive
    pub timestep: f64,
    /// Reject `update` calls that are not preceded by `predict`
    pub strict: bool,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            initial_position: Vector2::zeros(),
            // Very uncertain start so the first measurements dominate
            initial_covariance: CovarianceSpec::Scalar(50000.0),
            // 8 units std dev per axis
            measurement_variance: CovarianceSpec::Scalar(64.0),
            process_noise: ProcessNoise::Variance(0.001),
            timestep: 0.1,
            strict: false,
        }
    }
}

/// Where the filter is in its predict/update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingPredict,
    AwaitingUpdate,
}

/// Output of one completed predict + update cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub x: f64,
    pub y: f64,
    pub cov: Matrix4,
}

/// Linear Kalman filter tracking position and velocity of one planar target.
#[derive(Debug, Clone)]
pub struct KalmanFilter {
    /// State estimate [x, y, vx, vy]
    x: Vector4,
    /// State covariance
    P: Matrix4,
    /// State transition
    F: Matrix4,
    /// Process noise covariance
    Q: Matrix4,
    /// Measurement matrix
    H: Matrix2x4,
    /// Measurement noise covariance
    R: Matrix2,
    phase: Phase,
    config: KalmanConfig,
}

impl KalmanFilter {
    /// Build a filter, validating every parameter up front.
    pub fn new(config: KalmanConfig) -> FilterResult<Self> {
        let dt = config.timestep;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(FilterError::invalid(format!(
                "timestep must be positive and finite, got {dt}"
            )));
        }
        let p0 = config.initial_position;
        if !p0.iter().all(|v| v.is_finite()) {
            return Err(FilterError::invalid("initial position must be finite"));
        }

        let P = config.initial_covariance.resolve::<4>("initial covariance")?;
        let R = config.measurement_variance.resolve::<2>("measurement variance")?;
        let Q = match &config.process_noise {
            ProcessNoise::Variance(var) => {
                check_variance("process variance", *var)?;
                white_noise_acceleration(dt, *var)
            }
            ProcessNoise::Full(m) => fixed_from_dynamic::<4>("process noise", m)?,
        };

        Ok(Self {
            x: Vector4::new(p0[0], p0[1], 0.0, 0.0),
            P,
            F: transition_matrix(dt),
            Q,
            H: observation_matrix(),
            R,
            phase: Phase::AwaitingPredict,
            config,
        })
    }

    /// Advance the belief by one timestep with no new information.
    pub fn predict(&mut self) {
        self.x = self.F * self.x;
        self.P = self.F * self.P * self.F.transpose() + self.Q;
        self.phase = Phase::AwaitingUpdate;
    }

    /// Fold one position measurement into the belief.
    pub fn update(&mut self, z: &Vector2) -> FilterResult<Estimate> {
        if self.config.strict && self.phase != Phase::AwaitingUpdate {
            return Err(FilterError::OutOfSequenceCall);
        }

        // Innovation: y = z - H x
        let y = z - self.H * self.x;

        // Innovation covariance: S = H P Hᵀ + R
        let S = self.H * self.P * self.H.transpose() + self.R;
        let S_inv = S
            .try_inverse()
            .filter(|inv| inv.iter().all(|v| v.is_finite()))
            .ok_or(FilterError::SingularInnovationCovariance)?;

        // Kalman gain: K = P Hᵀ S⁻¹
        let K = self.P * self.H.transpose() * S_inv;

        self.x += K * y;

        // Joseph form
        let I_KH = Matrix4::identity() - K * self.H;
        let P = I_KH * self.P * I_KH.transpose() + K * self.R * K.transpose();
        self.P = symmetrize(&P);

        self.phase = Phase::AwaitingPredict;
        Ok(self.estimate())
    }

    /// Predict then update, the usual once-per-measurement call.
    pub fn step(&mut self, z: &Vector2) -> FilterResult<Estimate> {
        self.predict();
        self.update(z)
    }

    /// Current position estimate and covariance.
    pub fn estimate(&self) -> Estimate {
        Estimate {
            x: self.x[0],
            y: self.x[1],
            cov: self.P,
        }
    }

    /// Get the full state `[x, y, vx, vy]`
    pub fn state(&self) -> &Vector4 {
        &self.x
    }

    /// Get the state covariance P
    pub fn covariance(&self) -> &Matrix4 {
        &self.P
    }

    /// Get the position estimate
    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x[0], self.x[1])
    }

    /// Get the velocity estimate
    pub fn velocity(&self) -> Vector2 {
        Vector2::new(self.x[2], self.x[3])
    }

    /// Get the current predict/update phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get the configuration the filter was built with
    pub fn config(&self) -> &KalmanConfig {
        &self.config
    }

    /// Get the state transition matrix F
    pub fn transition(&self) -> &Matrix4 {
        &self.F
    }

    /// Get the process noise covariance Q
    pub fn process_noise(&self) -> &Matrix4 {
        &self.Q
    }

    /// Get the measurement noise covariance R
    pub fn measurement_noise(&self) -> &Matrix2 {
        &self.R
    }
}

/// Relative slack for symmetry and eigenvalue checks
const COVARIANCE_TOLERANCE: f64 = 1e-9;

fn check_variance(name: &str, var: f64) -> FilterResult<()> {
    if !var.is_finite() || var < 0.0 {
        return Err(FilterError::invalid(format!(
            "{name} must be finite and non-negative, got {var}"
        )));
    }
    Ok(())
}

fn fixed_from_dynamic<const N: usize>(
    name: &str,
    m: &DMatrix<f64>,
) -> FilterResult<nalgebra::SMatrix<f64, N, N>> {
    if m.nrows() != N || m.ncols() != N {
        return Err(FilterError::invalid(format!(
            "{name} must be {N}x{N}, got {}x{}",
            m.nrows(),
            m.ncols()
        )));
    }
    if !m.iter().all(|v| v.is_finite()) {
        return Err(FilterError::invalid(format!("{name} has non-finite entries")));
    }
    check_covariance(name, m)?;
    Ok(nalgebra::SMatrix::<f64, N, N>::from_fn(|r, c| m[(r, c)]))
}

/// Reject matrices that are not symmetric positive semi-definite.
fn check_covariance(name: &str, m: &DMatrix<f64>) -> FilterResult<()> {
    let tol = COVARIANCE_TOLERANCE * m.amax().max(1.0);
    if (m - m.transpose()).amax() > tol {
        return Err(FilterError::invalid(format!("{name} must be symmetric")));
    }
    if let Some(d) = m.diagonal().iter().find(|d| **d < 0.0) {
        return Err(FilterError::invalid(format!(
            "{name} has a negative diagonal entry {d}"
        )));
    }
    let min_eig = m.clone().symmetric_eigenvalues().min();
    if min_eig < -tol {
        return Err(FilterError::invalid(format!(
            "{name} must be positive semi-definite, smallest eigenvalue {min_eig}"
        )));
    }
    Ok(())
}
