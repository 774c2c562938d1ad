//! Ground-truth simulation and end-to-end tracking runs.

pub mod common;
pub mod tracking;
pub mod trajectory;

pub use tracking::{TrackingConfig, TrackingOutcome, TrackingRun};
pub use trajectory::{
    apply_motion, step_intensities, StepIntensities, Trajectory, TrajectoryConfig, TrajectoryIter,
};
