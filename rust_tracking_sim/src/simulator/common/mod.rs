//! Components shared by tracking runs.
//!
//! - [`NoiseInjector`]: turns true positions into noisy measurements
//! - [`RunRecorder`]: append-only per-step results with CSV export
//! - [`ErrorTracker`]: estimation vs. measurement error over time

pub mod error_tracking;
pub mod history;
pub mod noise;

pub use error_tracking::ErrorTracker;
pub use history::{write_walk_csv, ResultRecord, RunRecorder};
pub use noise::{gaussian_noise, NoiseInjector, DEFAULT_MEASUREMENT_STD};
