//! Ray / sphere intersection

#![allow(dead_code)]

use crate::geometry::Ray;
use crate::knight::*;

/// Intersects a ray with a sphere centred at the origin.
///
/// Returns the entry and exit distances `(t0, t1)` along the ray, or `None`
/// when the ray misses the sphere or the whole sphere lies behind the origin.
/// When the ray starts inside the sphere, `t0` is clamped to zero so the
/// returned interval always starts at the ray origin.
///
/// * `ray`    - The ray (direction must be unit length).
/// * `radius` - Sphere radius.
pub fn intersect_sphere(ray: &Ray, radius: Float) -> Option<(Float, Float)> {
    let b = 2.0 * ray.o.dot(&ray.d);
    let c = ray.o.dot(&ray.o) - radius * radius;
    let disc = b * b - 4.0 * c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let t0 = (-b - sqrt_disc) * 0.5;
    let t1 = (-b + sqrt_disc) * 0.5;
    if t1 < 0.0 {
        return None;
    }
    Some((max(t0, 0.0), t1))
}
