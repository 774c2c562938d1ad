//! Synthetic sensor noise.
//!
//! The injector's standard deviation is the noise actually added to the truth.
//! It is deliberately independent of the filter's `R`, which is only the
//! filter's belief about that noise, so the two can be mismatched on purpose.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use rust_tracking_algo::Vector2;

use crate::error::{SimError, SimResult};

/// Noise level of the reference demonstration (std dev per axis)
pub const DEFAULT_MEASUREMENT_STD: f64 = 8.0;

/// Draw zero-mean Gaussian noise with the given standard deviation.
#[inline]
pub fn gaussian_noise<R: Rng + ?Sized>(std_dev: f64, rng: &mut R) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    z * std_dev
}

/// Turns true positions into noisy pseudo-measurements.
#[derive(Debug, Clone, Copy)]
pub struct NoiseInjector {
    std_dev: f64,
}

impl NoiseInjector {
    /// Create an injector, rejecting negative or non-finite std devs
    pub fn new(std_dev: f64) -> SimResult<Self> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(SimError::invalid(format!(
                "measurement noise std dev must be finite and non-negative, got {std_dev}"
            )));
        }
        Ok(Self { std_dev })
    }

    /// Get the noise std dev per axis
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Add independent noise to each axis of `truth`.
    pub fn apply<R: Rng + ?Sized>(&self, truth: &Vector2, rng: &mut R) -> Vector2 {
        Vector2::new(
            truth.x + gaussian_noise(self.std_dev, rng),
            truth.y + gaussian_noise(self.std_dev, rng),
        )
    }
}

impl Default for NoiseInjector {
    fn default() -> Self {
        Self {
            std_dev: DEFAULT_MEASUREMENT_STD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_injected_noise_is_unbiased_per_axis() {
        let injector = NoiseInjector::new(3.0).unwrap();
        let truth = Vector2::new(100.0, -40.0);
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20000;

        let offsets: Vec<Vector2> = (0..n)
            .map(|_| injector.apply(&truth, &mut rng) - truth)
            .collect();
        let mean = offsets.iter().sum::<Vector2>() / n as f64;
        let var_x = offsets.iter().map(|o| (o.x - mean.x).powi(2)).sum::<f64>() / n as f64;
        let var_y = offsets.iter().map(|o| (o.y - mean.y).powi(2)).sum::<f64>() / n as f64;
        let cov_xy = offsets
            .iter()
            .map(|o| (o.x - mean.x) * (o.y - mean.y))
            .sum::<f64>()
            / n as f64;

        // Std error of the mean is 3 / sqrt(20000) ~ 0.02
        assert!(mean.x.abs() < 0.1, "x bias {}", mean.x);
        assert!(mean.y.abs() < 0.1, "y bias {}", mean.y);
        assert!((var_x - 9.0).abs() < 0.5, "var_x {var_x}");
        assert!((var_y - 9.0).abs() < 0.5, "var_y {var_y}");
        assert!(cov_xy.abs() < 0.5, "axes correlated: {cov_xy}");
    }

    #[test]
    fn test_zero_noise_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let injector = NoiseInjector::new(0.0).unwrap();
        let truth = Vector2::new(4.0, -3.5);
        assert_eq!(injector.apply(&truth, &mut rng), truth);
    }

    #[test]
    fn test_same_seed_same_measurements() {
        let injector = NoiseInjector::default();
        let truth = Vector2::new(1.0, 2.0);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(injector.apply(&truth, &mut a), injector.apply(&truth, &mut b));
        }
    }

    #[test]
    fn test_rejects_negative_std_dev() {
        assert!(matches!(
            NoiseInjector::new(-1.0),
            Err(SimError::InvalidConfiguration(_))
        ));
        assert!(NoiseInjector::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_default_matches_reference_noise() {
        assert_eq!(NoiseInjector::default().std_dev(), DEFAULT_MEASUREMENT_STD);
    }
}
