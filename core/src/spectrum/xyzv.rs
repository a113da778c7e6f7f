//! XYZV tristimulus values

#![allow(dead_code)]

use crate::knight::*;
use std::ops::{Add, AddAssign, Mul, MulAssign};

/// CIE 1931 XYZ tristimulus values extended with the CIE 1951 scotopic
/// luminance V. Carrying V alongside the photopic channels lets the tone
/// mapper blend rod and cone response per pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Xyzv {
    /// CIE X.
    pub x: Float,

    /// CIE Y (photopic luminance).
    pub y: Float,

    /// CIE Z.
    pub z: Float,

    /// Scotopic luminance.
    pub v: Float,
}

impl Xyzv {
    /// Creates a new tristimulus value.
    ///
    /// * `x` - CIE X.
    /// * `y` - CIE Y.
    /// * `z` - CIE Z.
    /// * `v` - Scotopic luminance.
    pub fn new(x: Float, y: Float, z: Float, v: Float) -> Self {
        Self { x, y, z, v }
    }

    /// Returns true if any channel is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan() || self.v.is_nan()
    }

    /// Returns the xy chromaticity coordinates, or equal-energy white when the
    /// tristimulus sum is zero.
    pub fn chromaticity(&self) -> (Float, Float) {
        let sum = self.x + self.y + self.z;
        if sum <= 0.0 {
            (1.0 / 3.0, 1.0 / 3.0)
        } else {
            (self.x / sum, self.y / sum)
        }
    }

    /// Rebuilds tristimulus values from xy chromaticity and a luminance,
    /// keeping the scotopic channel supplied by the caller.
    ///
    /// * `x` - x chromaticity.
    /// * `y` - y chromaticity.
    /// * `luminance` - CIE Y.
    /// * `v` - Scotopic luminance.
    pub fn from_chromaticity(x: Float, y: Float, luminance: Float, v: Float) -> Self {
        if y <= 0.0 {
            return Self::new(0.0, luminance, 0.0, v);
        }
        let scale = luminance / y;
        Self::new(x * scale, luminance, (1.0 - x - y) * scale, v)
    }
}

impl Add for Xyzv {
    type Output = Self;

    /// Adds the given value and returns the result.
    ///
    /// * `other` - The value to add.
    fn add(self, other: Self) -> Self::Output {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.v + other.v,
        )
    }
}

impl AddAssign for Xyzv {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The value to add.
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<Float> for Xyzv {
    type Output = Self;

    /// Scales all channels.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self::new(self.x * f, self.y * f, self.z * f, self.v * f)
    }
}

impl MulAssign<Float> for Xyzv {
    /// Performs the `*=` operation.
    ///
    /// * `f` - The scaling factor.
    fn mul_assign(&mut self, f: Float) {
        *self = *self * f;
    }
}
