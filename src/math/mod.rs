pub mod intersect_3d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Smallest span used as a divisor when normalizing a position inside
/// contour bounds. Guards zero-width or zero-length planforms.
pub const SPAN_EPSILON: f64 = 1e-9;

/// Factor converting contour units (millimetres) to scene units.
pub const UNIT_SCALE: f64 = 0.01;

/// Divides `numer` by `span`, clamping the divisor away from zero.
#[must_use]
pub fn safe_ratio(numer: f64, span: f64) -> f64 {
    numer / span.max(SPAN_EPSILON)
}
