//! Geometry

mod point2;
mod ray;
mod sphere;
mod vector3;

// Re-export.
pub use point2::*;
pub use ray::*;
pub use sphere::*;
pub use vector3::*;

use crate::knight::Float;

/// Returns the unit direction for a horizon azimuth/altitude pair, in the
/// frame X = east, Y = up, Z = north.
///
/// * `az`  - Azimuth in radians, from north through east.
/// * `alt` - Altitude in radians.
pub fn horizon_direction(az: Float, alt: Float) -> Vector3f {
    Vector3f::new(alt.cos() * az.sin(), alt.sin(), alt.cos() * az.cos())
}
