//! Atmosphere model

use knight_core::knight::*;
use knight_core::spectrum::{Spectrum, SPECTRUM_BANDS};

/// Planet radius in metres.
pub const EARTH_RADIUS: Float = 6_360_000.0;

/// Radius of the top of the atmosphere shell in metres.
pub const ATMOSPHERE_TOP: Float = 6_440_000.0;

/// Rayleigh density scale height in metres.
pub const RAYLEIGH_SCALE_HEIGHT: Float = 8000.0;

/// Mie density scale height in metres.
pub const MIE_SCALE_HEIGHT: Float = 1200.0;

/// Henyey-Greenstein asymmetry for aerosol scattering.
pub const MIE_G: Float = 0.8;

/// Rayleigh scattering coefficient at sea level, at 680 nm, in 1/m.
pub const BETA_RAYLEIGH_680: Float = 5.8e-6;

/// Mie scattering coefficient at sea level, at 550 nm, in 1/m, for a clear
/// night.
pub const BETA_MIE_550: Float = 2.0e-5;

/// Parameters of a spherical-shell atmosphere with exponential density
/// falloff.
#[derive(Clone, Debug)]
pub struct Atmosphere {
    /// Planet radius in metres.
    pub planet_radius: Float,

    /// Radius of the top of the atmosphere in metres.
    pub top_radius: Float,

    /// Rayleigh density scale height in metres.
    pub rayleigh_scale_height: Float,

    /// Mie density scale height in metres.
    pub mie_scale_height: Float,

    /// Sea level Rayleigh scattering coefficients per band, in 1/m.
    pub beta_rayleigh: Spectrum,

    /// Sea level Mie scattering coefficients per band, in 1/m.
    pub beta_mie: Spectrum,

    /// Henyey-Greenstein asymmetry for the Mie phase.
    pub mie_g: Float,
}

impl Default for Atmosphere {
    /// Returns the standard clear-sky atmosphere.
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Atmosphere {
    /// Creates an atmosphere whose aerosol load is scaled by `haze`.
    ///
    /// * `haze` - Multiplier on the Mie coefficients (1 is a clear night).
    pub fn new(haze: Float) -> Self {
        let mut beta_rayleigh = Spectrum::default();
        let mut beta_mie = Spectrum::default();

        for i in 0..SPECTRUM_BANDS {
            let lambda = Spectrum::wavelength(i);

            // Rayleigh falls off as lambda^-4, anchored at 680 nm.
            beta_rayleigh[i] = BETA_RAYLEIGH_680 * (680.0 / lambda).powf(4.0);

            // Aerosols have a weak lambda^-1.3 dependence, anchored at 550 nm.
            beta_mie[i] = haze * BETA_MIE_550 * (550.0 / lambda).powf(1.3);
        }

        Self {
            planet_radius: EARTH_RADIUS,
            top_radius: ATMOSPHERE_TOP,
            rayleigh_scale_height: RAYLEIGH_SCALE_HEIGHT,
            mie_scale_height: MIE_SCALE_HEIGHT,
            beta_rayleigh,
            beta_mie,
            mie_g: MIE_G,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knight_core::spectrum::REFERENCE_BAND;

    #[test]
    fn rayleigh_favours_short_wavelengths() {
        let atm = Atmosphere::default();
        // 450 nm scatters much more strongly than 650 nm.
        assert!(atm.beta_rayleigh[7] > 3.0 * atm.beta_rayleigh[27]);
    }

    #[test]
    fn haze_scales_mie_only() {
        let clear = Atmosphere::default();
        let hazy = Atmosphere::new(3.0);
        assert_eq!(
            hazy.beta_mie[REFERENCE_BAND],
            3.0 * clear.beta_mie[REFERENCE_BAND]
        );
        assert_eq!(
            hazy.beta_rayleigh[REFERENCE_BAND],
            clear.beta_rayleigh[REFERENCE_BAND]
        );
    }
}
