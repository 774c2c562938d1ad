//! Constant-velocity motion model and position-only sensor model.
//!
//! ## State layout
//! `[x, y, vx, vy]`: each axis evolves independently, position advancing by
//! velocity × dt and velocity carrying over unchanged.
//!
//! ## Process noise
//! Discretised white-noise-acceleration: an unknown acceleration with variance
//! `q` acts for one step, giving per axis
//!
//! ```text
//! Q_axis = q * [dt⁴/4  dt³/2]
//!              [dt³/2  dt²  ]
//! ```

use crate::util::{Matrix2x4, Matrix4};

/// State transition matrix F for timestep `dt`.
pub fn transition_matrix(dt: f64) -> Matrix4 {
    let mut F = Matrix4::identity();
    F[(0, 2)] = dt;
    F[(1, 3)] = dt;
    F
}

/// Process noise Q for acceleration variance `var` over timestep `dt`.
pub fn white_noise_acceleration(dt: f64, var: f64) -> Matrix4 {
    let dt2 = dt * dt;
    let dt3 = dt2 * dt;
    let dt4 = dt3 * dt;

    let mut Q = Matrix4::zeros();
    for axis in 0..2 {
        let vel = axis + 2;
        Q[(axis, axis)] = var * dt4 / 4.0;
        Q[(axis, vel)] = var * dt3 / 2.0;
        Q[(vel, axis)] = var * dt3 / 2.0;
        Q[(vel, vel)] = var * dt2;
    }
    Q
}

/// Measurement matrix H: observes position, never velocity.
pub fn observation_matrix() -> Matrix2x4 {
    Matrix2x4::identity()
}
