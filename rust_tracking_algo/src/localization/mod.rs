//! State estimation for a single planar target.

pub mod constant_velocity;
pub mod kalman_filter;

use crate::util::{Vector2, Vector4};

/// Named getters for the `(x, y, vx, vy)` layout shared by the estimator and the
/// simulator's ground truth.
pub trait StateVector {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn vx(&self) -> f64;
    fn vy(&self) -> f64;

    /// Position sub-vector
    fn xy(&self) -> Vector2 {
        Vector2::new(self.x(), self.y())
    }

    /// Velocity sub-vector
    fn vxy(&self) -> Vector2 {
        Vector2::new(self.vx(), self.vy())
    }
}

impl StateVector for Vector4 {
    fn x(&self) -> f64 {
        self[0]
    }
    fn y(&self) -> f64 {
        self[1]
    }
    fn vx(&self) -> f64 {
        self[2]
    }
    fn vy(&self) -> f64 {
        self[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn test_state_vector_getters() {
        let s: Vector4 = vector![1.0, 2.0, 3.0, 4.0];
        assert_eq!(s.x(), 1.0);
        assert_eq!(s.y(), 2.0);
        assert_eq!(s.vx(), 3.0);
        assert_eq!(s.vy(), 4.0);
        assert_eq!(s.xy(), vector![1.0, 2.0]);
        assert_eq!(s.vxy(), vector![3.0, 4.0]);
    }
}
