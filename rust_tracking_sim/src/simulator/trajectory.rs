//! Random-walk ground truth generator.
//!
//! Each step integrates position from the current velocity, then perturbs the
//! velocity with Gaussian noise of standard deviation `step_size` and clamps it
//! to `[-max_velocity, max_velocity]` per axis. The result is a smooth,
//! randomly curving path with bounded speed.

use nalgebra::vector;
use rand::Rng;
use rust_tracking_algo::util::distance_2d;
use rust_tracking_algo::{StateVector, Vector2, Vector4};

use super::common::gaussian_noise;
use crate::error::{SimError, SimResult};

/// Every trajectory starts at rest at the origin.
pub const INITIAL_STATE: Vector4 = vector![0.0, 0.0, 0.0, 0.0];

/// Floor for the running maximum used by [`step_intensities`]
pub const MIN_MAX_DISTANCE: f64 = 0.01;

/// Random walk parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryConfig {
    /// Number of states produced, including the initial one
    pub steps: usize,
    /// Integration step and velocity noise std dev
    pub step_size: f64,
    /// Per-axis velocity bound
    pub max_velocity: f64,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            steps: 3000,
            step_size: 0.1,
            max_velocity: 1.4,
        }
    }
}

impl TrajectoryConfig {
    /// Check every parameter is in range
    pub fn validate(&self) -> SimResult<()> {
        if self.steps == 0 {
            return Err(SimError::invalid("trajectory needs at least one step"));
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(SimError::invalid(format!(
                "step size must be positive and finite, got {}",
                self.step_size
            )));
        }
        if !self.max_velocity.is_finite() || self.max_velocity <= 0.0 {
            return Err(SimError::invalid(format!(
                "max velocity must be positive and finite, got {}",
                self.max_velocity
            )));
        }
        Ok(())
    }
}

/// Advance `state` by one random-walk step.
pub fn apply_motion<R: Rng + ?Sized>(
    state: &mut Vector4,
    step_size: f64,
    max_velocity: f64,
    rng: &mut R,
) {
    state[0] += state[2] * step_size;
    state[1] += state[3] * step_size;
    // Clamp after the perturbation so stored velocities never leave the bounds
    state[2] = (state[2] + gaussian_noise(step_size, rng)).clamp(-max_velocity, max_velocity);
    state[3] = (state[3] + gaussian_noise(step_size, rng)).clamp(-max_velocity, max_velocity);
}

/// A finite, restartable random walk.
///
/// The random source is cloned for every [`iter`](Trajectory::iter) call, so a
/// seeded RNG yields the same walk each time it is iterated.
#[derive(Debug, Clone)]
pub struct Trajectory<R> {
    config: TrajectoryConfig,
    rng: R,
}

impl<R: Rng + Clone> Trajectory<R> {
    /// Create a walk, validating the config first
    pub fn new(config: TrajectoryConfig, rng: R) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Get the walk parameters
    pub fn config(&self) -> &TrajectoryConfig {
        &self.config
    }

    /// The random source every iteration starts from.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Number of states the walk produces.
    pub fn len(&self) -> usize {
        self.config.steps
    }

    /// Pairs with `len`; always false since validation rejects `steps == 0`
    pub fn is_empty(&self) -> bool {
        self.config.steps == 0
    }

    /// Lazily generate the full `(x, y, vx, vy)` sequence from the start.
    pub fn iter(&self) -> TrajectoryIter<R> {
        TrajectoryIter {
            state: INITIAL_STATE,
            remaining: self.config.steps,
            started: false,
            step_size: self.config.step_size,
            max_velocity: self.config.max_velocity,
            rng: self.rng.clone(),
        }
    }

    /// Position-only view of the walk.
    pub fn positions(&self) -> impl Iterator<Item = Vector2> {
        self.iter().map(|s| s.xy())
    }
}

impl<'a, R: Rng + Clone> IntoIterator for &'a Trajectory<R> {
    type Item = Vector4;
    type IntoIter = TrajectoryIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the states of a [`Trajectory`].
#[derive(Debug, Clone)]
pub struct TrajectoryIter<R> {
    state: Vector4,
    remaining: usize,
    started: bool,
    step_size: f64,
    max_velocity: f64,
    rng: R,
}

impl<R: Rng> Iterator for TrajectoryIter<R> {
    type Item = Vector4;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if self.started {
            apply_motion(&mut self.state, self.step_size, self.max_velocity, &mut self.rng);
        } else {
            self.started = true;
        }
        Some(self.state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng> ExactSizeIterator for TrajectoryIter<R> {}

impl<R: Rng> std::iter::FusedIterator for TrajectoryIter<R> {}

/// Per-step travel distance normalised by the largest step seen so far.
///
/// Yields one value in `[0, 1]` per consecutive pair of positions, suitable as a
/// colour or intensity channel when plotting the walk. Has no effect on motion.
pub fn step_intensities<I>(positions: I) -> StepIntensities<I::IntoIter>
where
    I: IntoIterator<Item = Vector2>,
{
    StepIntensities {
        positions: positions.into_iter(),
        previous: None,
        max_distance: MIN_MAX_DISTANCE,
    }
}

/// Iterator returned by [`step_intensities`].
#[derive(Debug, Clone)]
pub struct StepIntensities<I> {
    positions: I,
    previous: Option<Vector2>,
    max_distance: f64,
}

impl<I: Iterator<Item = Vector2>> Iterator for StepIntensities<I> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.positions.next()?;
            if let Some(prev) = self.previous.replace(current) {
                let dist = distance_2d(&prev, &current);
                self.max_distance = self.max_distance.max(dist);
                return Some(dist / self.max_distance);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn walk(config: TrajectoryConfig, seed: u64) -> Trajectory<StdRng> {
        Trajectory::new(config, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_single_step_is_initial_state() {
        let config = TrajectoryConfig {
            steps: 1,
            ..Default::default()
        };
        let states: Vec<_> = walk(config, 0).iter().collect();
        assert_eq!(states, vec![INITIAL_STATE]);
    }

    #[test]
    fn test_length_matches_steps() {
        let config = TrajectoryConfig {
            steps: 250,
            ..Default::default()
        };
        let t = walk(config, 3);
        assert_eq!(t.len(), 250);
        assert!(!t.is_empty());
        let it = t.iter();
        assert_eq!(it.len(), 250);
        assert_eq!(it.count(), 250);
        assert_eq!(t.positions().count(), 250);
    }

    #[test]
    fn test_velocity_clamp_invariant() {
        // Large noise relative to the bound so clamping actually fires
        let config = TrajectoryConfig {
            steps: 5000,
            step_size: 1.0,
            max_velocity: 1.4,
        };
        let mut hit_bound = false;
        for s in walk(config, 11).iter() {
            assert!(s.vx().abs() <= 1.4, "vx = {}", s.vx());
            assert!(s.vy().abs() <= 1.4, "vy = {}", s.vy());
            hit_bound |= s.vx().abs() == 1.4 || s.vy().abs() == 1.4;
        }
        assert!(hit_bound);
    }

    #[test]
    fn test_position_integrates_previous_velocity() {
        let config = TrajectoryConfig {
            steps: 100,
            step_size: 0.1,
            max_velocity: 1.4,
        };
        let states: Vec<_> = walk(config, 5).iter().collect();
        assert_eq!(states[1].xy(), vector![0.0, 0.0]);
        for pair in states.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            assert_abs_diff_eq!(next.x(), prev.x() + prev.vx() * 0.1, epsilon = 1e-12);
            assert_abs_diff_eq!(next.y(), prev.y() + prev.vy() * 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_restartable_and_seed_deterministic() {
        let t = walk(TrajectoryConfig::default(), 99);
        let first: Vec<_> = t.iter().collect();
        let second: Vec<_> = (&t).into_iter().collect();
        assert_eq!(first, second);

        let other: Vec<_> = walk(TrajectoryConfig::default(), 99).iter().collect();
        assert_eq!(first, other);

        let different: Vec<_> = walk(TrajectoryConfig::default(), 100).iter().collect();
        assert_ne!(first, different);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad = [
            TrajectoryConfig {
                steps: 0,
                ..Default::default()
            },
            TrajectoryConfig {
                step_size: 0.0,
                ..Default::default()
            },
            TrajectoryConfig {
                max_velocity: -1.0,
                ..Default::default()
            },
            TrajectoryConfig {
                step_size: f64::NAN,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(
                Trajectory::new(config, StdRng::seed_from_u64(0)),
                Err(SimError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_step_intensities_known_path() {
        let path = vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 2.0],
            vector![1.0, 2.5],
        ];
        let values: Vec<_> = step_intensities(path).collect();
        assert_eq!(values.len(), 3);
        assert_abs_diff_eq!(values[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(values[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(values[2], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_step_intensities_bounded() {
        let t = walk(TrajectoryConfig::default(), 8);
        let values: Vec<_> = step_intensities(t.positions()).collect();
        assert_eq!(values.len(), t.len() - 1);
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_step_intensities_stationary_uses_floor() {
        let path = vec![vector![0.0, 0.0], vector![0.0, 0.0], vector![0.005, 0.0]];
        let values: Vec<_> = step_intensities(path).collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], 0.0);
        assert_abs_diff_eq!(values[1], 0.5, epsilon = 1e-12);
    }
}
