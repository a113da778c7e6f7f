//! Banded spectra

#![allow(dead_code)]

use crate::knight::*;
use crate::spectrum::{cie_bands, Xyzv};
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub};

/// Number of spectral bands.
pub const SPECTRUM_BANDS: usize = 40;

/// Wavelength of the first band centre in nanometres.
pub const LAMBDA_START: Float = 380.0;

/// Band spacing in nanometres.
pub const LAMBDA_STEP: Float = 10.0;

/// Band used when a scalar stand-in for a spectral quantity is needed
/// (550 nm, near the photopic peak).
pub const REFERENCE_BAND: usize = 17;

/// A radiometric quantity sampled at `SPECTRUM_BANDS` evenly spaced
/// wavelengths from `LAMBDA_START`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spectrum {
    /// Per-band values.
    pub s: [Float; SPECTRUM_BANDS],
}

impl Default for Spectrum {
    /// Returns a black spectrum.
    fn default() -> Self {
        Self::constant(0.0)
    }
}

impl Spectrum {
    /// Creates a spectrum with the same value in every band.
    ///
    /// * `v` - The value.
    pub fn constant(v: Float) -> Self {
        Self {
            s: [v; SPECTRUM_BANDS],
        }
    }

    /// Returns the wavelength of a band centre in nanometres.
    ///
    /// * `band` - Band index.
    pub fn wavelength(band: usize) -> Float {
        LAMBDA_START + band as Float * LAMBDA_STEP
    }

    /// Returns true if all bands are zero.
    pub fn is_black(&self) -> bool {
        self.s.iter().all(|&v| v == 0.0)
    }

    /// Returns true if any band is NaN.
    pub fn has_nans(&self) -> bool {
        self.s.iter().any(|v| v.is_nan())
    }

    /// Returns a spectrum with `exp()` applied per band.
    pub fn exp(&self) -> Self {
        let mut out = *self;
        for v in out.s.iter_mut() {
            *v = v.exp();
        }
        out
    }

    /// Returns the component-wise product with another spectrum.
    ///
    /// * `other` - The other spectrum.
    pub fn mul_spectrum(&self, other: &Self) -> Self {
        let mut out = *self;
        for (v, o) in out.s.iter_mut().zip(other.s.iter()) {
            *v *= o;
        }
        out
    }

    /// Projects the spectrum onto the CIE responses with a Riemann sum over
    /// the band spacing. Spectral radiance in comes out as radiance in
    /// tristimulus form.
    pub fn to_xyzv(&self) -> Xyzv {
        let bands = cie_bands();
        let mut res = Xyzv::default();
        for (v, band) in self.s.iter().zip(bands.iter()) {
            res += *band * *v;
        }
        res * LAMBDA_STEP
    }

    /// Returns the photopic luminance of the spectrum.
    pub fn y(&self) -> Float {
        self.to_xyzv().y
    }

    /// Returns the Planck blackbody spectral radiance for a temperature, in
    /// W / (sr m^2 m). Evaluated in `f64` so the lambda^5 term does not
    /// underflow.
    ///
    /// * `temp` - Temperature in Kelvin.
    pub fn blackbody(temp: Float) -> Self {
        const C1: f64 = 1.191e-16; // 2 h c^2, W m^2
        const C2: f64 = 1.4388e-2; // h c / k, m K

        let mut out = Self::default();
        for (i, v) in out.s.iter_mut().enumerate() {
            let lambda_m = Self::wavelength(i) as f64 * 1e-9;
            let power_term = lambda_m.powi(5);
            let exp_term = (C2 / (lambda_m * temp as f64)).exp() - 1.0;
            *v = (C1 / (power_term * exp_term)) as Float;
        }
        out
    }
}

impl Add for Spectrum {
    type Output = Self;

    /// Adds the given spectrum and returns the result.
    ///
    /// * `other` - The spectrum to add.
    fn add(self, other: Self) -> Self::Output {
        let mut out = self;
        for (v, o) in out.s.iter_mut().zip(other.s.iter()) {
            *v += o;
        }
        out
    }
}

impl AddAssign for Spectrum {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The spectrum to add.
    fn add_assign(&mut self, other: Self) {
        for (v, o) in self.s.iter_mut().zip(other.s.iter()) {
            *v += o;
        }
    }
}

impl Sub for Spectrum {
    type Output = Self;

    /// Subtracts the given spectrum and returns the result.
    ///
    /// * `other` - The spectrum to subtract.
    fn sub(self, other: Self) -> Self::Output {
        let mut out = self;
        for (v, o) in out.s.iter_mut().zip(other.s.iter()) {
            *v -= o;
        }
        out
    }
}

impl Mul<Float> for Spectrum {
    type Output = Self;

    /// Scales all bands.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        let mut out = self;
        for v in out.s.iter_mut() {
            *v *= f;
        }
        out
    }
}

impl MulAssign<Float> for Spectrum {
    /// Performs the `*=` operation.
    ///
    /// * `f` - The scaling factor.
    fn mul_assign(&mut self, f: Float) {
        for v in self.s.iter_mut() {
            *v *= f;
        }
    }
}

impl Index<usize> for Spectrum {
    type Output = Float;

    /// Index the spectrum by band.
    ///
    /// * `band` - Band index.
    fn index(&self, band: usize) -> &Self::Output {
        &self.s[band]
    }
}

impl IndexMut<usize> for Spectrum {
    /// Index the spectrum mutably by band.
    ///
    /// * `band` - Band index.
    fn index_mut(&mut self, band: usize) -> &mut Self::Output {
        &mut self.s[band]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn reference_band_is_550nm() {
        assert_eq!(Spectrum::wavelength(REFERENCE_BAND), 550.0);
    }

    #[test]
    fn black_detection() {
        assert!(Spectrum::default().is_black());
        assert!(!Spectrum::constant(1.0e-9).is_black());
    }

    #[test]
    fn blue_delta_projects_blue() {
        // Power only at 450 nm gives Z dominant over Y, B dominant over R.
        let mut s = Spectrum::default();
        s[7] = 1.0;
        assert_eq!(Spectrum::wavelength(7), 450.0);
        let c = s.to_xyzv();
        assert!(c.z > c.y);
        let rgb = crate::spectrum::xyz_to_srgb([c.x, c.y, c.z]);
        assert!(rgb[2] > rgb[0]);
        assert!(rgb[2] > 0.0);
    }

    #[test]
    fn constant_spectrum_luminance() {
        // With unit spectral radiance, Y is the CIE Y sum times the band step.
        let y_sum: Float = crate::spectrum::CIE_Y.iter().sum();
        let y = Spectrum::constant(1.0).y();
        assert!(approx_eq!(Float, y, y_sum * LAMBDA_STEP, epsilon = 1e-3));
    }

    #[test]
    fn blackbody_peak_shifts_blue_with_temperature() {
        let cool = Spectrum::blackbody(3000.0);
        let hot = Spectrum::blackbody(10000.0);
        // Ratio of blue band to red band grows with temperature.
        let band = |s: &Spectrum| s[7] / s[28];
        assert!(band(&hot) > band(&cool));
    }

    proptest! {
        #[test]
        fn exp_of_negated_tau_in_unit_range(tau in 0.0 as Float..50.0) {
            let t = (Spectrum::constant(tau) * -1.0).exp();
            for v in t.s.iter() {
                prop_assert!(*v > 0.0 && *v <= 1.0);
            }
        }
    }
}
