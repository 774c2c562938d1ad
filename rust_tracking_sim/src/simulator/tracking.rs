//! End-to-end tracking run.
//!
//! Ground truth from a [`Trajectory`] is perturbed by a [`NoiseInjector`], fed one
//! measurement at a time through a [`KalmanFilter`], and every
//! `(truth, measurement, estimate)` triple is appended to a [`RunRecorder`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_tracking_algo::{Estimate, KalmanConfig, KalmanFilter, Vector2};
use tracing::{debug, info, trace, warn};

use super::common::{ErrorTracker, NoiseInjector, ResultRecord, RunRecorder, DEFAULT_MEASUREMENT_STD};
use super::trajectory::{Trajectory, TrajectoryConfig};
use crate::error::SimResult;

/// Everything needed to reproduce a run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingConfig {
    pub trajectory: TrajectoryConfig,
    /// Std dev of the noise actually added to the truth, independent of the
    /// filter's measurement variance
    pub measurement_noise_std: f64,
    pub filter: KalmanConfig,
    pub seed: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            trajectory: TrajectoryConfig::default(),
            measurement_noise_std: DEFAULT_MEASUREMENT_STD,
            filter: KalmanConfig::default(),
            seed: 0,
        }
    }
}

/// Results of a completed run.
#[derive(Debug, Clone)]
pub struct TrackingOutcome {
    pub recorder: RunRecorder,
    pub errors: ErrorTracker,
    /// Estimate after the last measurement, `None` for an empty truth sequence
    pub final_estimate: Option<Estimate>,
}

/// A validated, reusable run description.
#[derive(Debug, Clone)]
pub struct TrackingRun {
    config: TrackingConfig,
    noise: NoiseInjector,
}

impl TrackingRun {
    /// Validate all parameters eagerly, including the filter's.
    pub fn new(config: TrackingConfig) -> SimResult<Self> {
        config.trajectory.validate()?;
        let noise = NoiseInjector::new(config.measurement_noise_std)?;
        KalmanFilter::new(config.filter.clone())?;
        debug!(?config, "tracking run configured");
        Ok(Self { config, noise })
    }

    /// Get the run configuration
    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Run with random streams derived from the configured seed.
    pub fn run(&self) -> SimResult<TrackingOutcome> {
        let mut master = StdRng::seed_from_u64(self.config.seed);
        let trajectory_rng = StdRng::seed_from_u64(master.gen());
        let mut noise_rng = StdRng::seed_from_u64(master.gen());
        self.run_with(trajectory_rng, &mut noise_rng)
    }

    /// Run with explicitly supplied random sources for the walk and the noise.
    pub fn run_with<T, N>(&self, trajectory_rng: T, noise_rng: &mut N) -> SimResult<TrackingOutcome>
    where
        T: Rng + Clone,
        N: Rng + ?Sized,
    {
        let trajectory = Trajectory::new(self.config.trajectory, trajectory_rng)?;
        self.track_positions(trajectory.positions(), noise_rng)
    }

    /// Filter noisy versions of an externally supplied ground-truth track.
    ///
    /// The first filter error aborts the run and is returned as-is.
    pub fn track_positions<I, N>(&self, truth: I, noise_rng: &mut N) -> SimResult<TrackingOutcome>
    where
        I: IntoIterator<Item = Vector2>,
        N: Rng + ?Sized,
    {
        let truth = truth.into_iter();
        let mut filter = KalmanFilter::new(self.config.filter.clone())?;
        let mut recorder = RunRecorder::with_capacity(truth.size_hint().0);
        let mut errors = ErrorTracker::new();
        let mut final_estimate = None;

        info!(
            seed = self.config.seed,
            noise_std = self.noise.std_dev(),
            "starting tracking run"
        );

        for (step, truth) in truth.enumerate() {
            let z = self.noise.apply(&truth, noise_rng);

            filter.predict();
            let estimate = filter.update(&z).map_err(|e| {
                warn!(step, error = %e, "filter update failed");
                e
            })?;
            let est = Vector2::new(estimate.x, estimate.y);

            trace!(step, zx = z.x, zy = z.y, est_x = est.x, est_y = est.y, "step");

            recorder.push(ResultRecord::new(&truth, &z, &est));
            errors.track_positions(&truth, &z, &est);
            final_estimate = Some(estimate);
        }

        info!(
            steps = recorder.len(),
            est_rmse = ?errors.est_rmse(),
            measurement_rmse = ?errors.measurement_rmse(),
            "tracking run complete"
        );

        Ok(TrackingOutcome {
            recorder,
            errors,
            final_estimate,
        })
    }
}
