//! Rays

#![allow(dead_code)]

use crate::geometry::Vector3f;
use crate::knight::*;

/// A ray with an origin and a direction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    /// Origin, in planet-centred coordinates (metres).
    pub o: Vector3f,

    /// Unit direction.
    pub d: Vector3f,
}

impl Ray {
    /// Creates a new ray.
    ///
    /// * `o` - Origin.
    /// * `d` - Unit direction.
    pub fn new(o: Vector3f, d: Vector3f) -> Self {
        Self { o, d }
    }

    /// Returns the point at parameter `t` along the ray.
    ///
    /// * `t` - Distance along the ray.
    pub fn at(&self, t: Float) -> Vector3f {
        self.o + self.d * t
    }
}
