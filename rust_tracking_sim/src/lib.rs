#![warn(clippy::all, rust_2018_idioms)]

pub mod error;
pub mod logging;
pub mod simulator;

pub use error::{SimError, SimResult};

pub mod prelude {
    pub use crate::error::{SimError, SimResult};
    pub use crate::simulator::common::{
        ErrorTracker, NoiseInjector, ResultRecord, RunRecorder, DEFAULT_MEASUREMENT_STD,
    };
    pub use crate::simulator::{
        step_intensities, Trajectory, TrajectoryConfig, TrackingConfig, TrackingOutcome,
        TrackingRun,
    };
}
