//! Fixed-size linear algebra aliases used throughout the crate.
//!
//! Only 2x2, 2x4, 4x2 and 4x4 shapes are ever needed, so everything lives on the
//! stack.

pub type Vector2 = nalgebra::Vector2<f64>;
pub type Vector4 = nalgebra::Vector4<f64>;
pub type Matrix2 = nalgebra::Matrix2<f64>;
pub type Matrix4 = nalgebra::Matrix4<f64>;
pub type Matrix2x4 = nalgebra::Matrix2x4<f64>;
pub type Matrix4x2 = nalgebra::Matrix4x2<f64>;

/// Make a matrix exactly symmetric by averaging it with its transpose.
#[inline]
pub fn symmetrize(m: &Matrix4) -> Matrix4 {
    (m + m.transpose()) * 0.5
}

/// Euclidean distance between two planar points.
#[inline]
pub fn distance_2d(a: &Vector2, b: &Vector2) -> f64 {
    (a - b).norm()
}
