#![allow(non_snake_case)]

pub mod error;
pub mod localization;
pub mod util;

pub use error::{FilterError, FilterResult};

pub mod prelude {
    pub use crate::error::{FilterError, FilterResult};
    pub use crate::localization::kalman_filter::{
        CovarianceSpec, Estimate, KalmanConfig, KalmanFilter, Phase, ProcessNoise,
    };
    pub use crate::localization::StateVector;
    pub use crate::util::*;
    pub use nalgebra;
    pub use nalgebra::{matrix, vector};
}

pub use prelude::*;
