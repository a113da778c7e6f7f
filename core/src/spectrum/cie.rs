//! CIE colour matching data

#![allow(dead_code)]

use crate::knight::*;
use crate::spectrum::{Xyzv, SPECTRUM_BANDS};
use std::sync::OnceLock;

/// CIE 1931 X colour matching function sampled at the band centres.
pub const CIE_X: [Float; SPECTRUM_BANDS] = [
    0.0014, 0.0042, 0.0143, 0.0435, 0.1344, 0.2839, 0.3483, 0.3362, 0.2908, 0.1954, // 380-470
    0.0956, 0.0320, 0.0049, 0.0093, 0.0633, 0.1655, 0.2904, 0.4334, 0.5945, 0.7621, // 480-570
    0.9163, 1.0263, 1.0622, 1.0026, 0.8544, 0.6424, 0.4479, 0.2835, 0.1649, 0.0874, // 580-670
    0.0468, 0.0227, 0.0114, 0.0058, 0.0029, 0.0014, 0.0007, 0.0003, 0.0002, 0.0001, // 680-770
];

/// CIE 1931 Y colour matching function sampled at the band centres.
pub const CIE_Y: [Float; SPECTRUM_BANDS] = [
    0.0000, 0.0001, 0.0004, 0.0012, 0.0040, 0.0116, 0.0230, 0.0380, 0.0600, 0.0910, // 380-470
    0.1390, 0.2080, 0.3230, 0.5030, 0.7100, 0.8620, 0.9540, 0.9950, 0.9950, 0.9520, // 480-570
    0.8700, 0.7570, 0.6310, 0.5030, 0.3810, 0.2650, 0.1750, 0.1070, 0.0610, 0.0320, // 580-670
    0.0170, 0.0082, 0.0041, 0.0021, 0.0010, 0.0005, 0.0002, 0.0001, 0.0001, 0.0000, // 680-770
];

/// CIE 1931 Z colour matching function sampled at the band centres.
pub const CIE_Z: [Float; SPECTRUM_BANDS] = [
    0.0065, 0.0201, 0.0679, 0.2074, 0.6456, 1.3856, 1.7471, 1.7721, 1.6692, 1.2876, // 380-470
    0.8130, 0.4652, 0.2720, 0.1582, 0.0782, 0.0422, 0.0203, 0.0087, 0.0039, 0.0021, // 480-570
    0.0017, 0.0011, 0.0008, 0.0003, 0.0002, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, // 580-670
    0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, // 680-770
];

/// CIE 1951 scotopic V(lambda) sampled at the band centres.
pub const CIE_V: [Float; SPECTRUM_BANDS] = [
    0.0006, 0.0022, 0.0093, 0.0348, 0.1084, 0.2525, 0.4571, 0.6756, 0.8524, 0.9632, // 380-470
    0.9939, 0.9398, 0.8110, 0.6496, 0.4812, 0.3283, 0.2076, 0.1212, 0.0665, 0.0346, // 480-570
    0.0173, 0.0083, 0.0039, 0.0018, 0.0008, 0.0004, 0.0002, 0.0001, 0.0000, 0.0000, // 580-670
    0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, // 680-770
];

/// Returns the per-band CIE responses gathered into `Xyzv` values. Built once
/// on first use so projection loops index a single table.
pub fn cie_bands() -> &'static [Xyzv; SPECTRUM_BANDS] {
    static BANDS: OnceLock<[Xyzv; SPECTRUM_BANDS]> = OnceLock::new();
    BANDS.get_or_init(|| {
        let mut bands = [Xyzv::default(); SPECTRUM_BANDS];
        for (i, band) in bands.iter_mut().enumerate() {
            *band = Xyzv::new(CIE_X[i], CIE_Y[i], CIE_Z[i], CIE_V[i]);
        }
        bands
    })
}

/// Converts CIE XYZ tristimulus values to linear sRGB.
///
/// * `xyz` - The tristimulus values as `[X, Y, Z]`.
pub fn xyz_to_srgb(xyz: [Float; 3]) -> [Float; 3] {
    let [x, y, z] = xyz;
    [
        3.2404542 * x - 1.5371385 * y - 0.4985314 * z,
        -0.9692660 * x + 1.8760108 * y + 0.0415560 * z,
        0.0556434 * x - 0.2040259 * y + 1.0572252 * z,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn band_table_matches_source_tables() {
        let bands = cie_bands();
        for i in 0..SPECTRUM_BANDS {
            assert_eq!(bands[i].x, CIE_X[i]);
            assert_eq!(bands[i].y, CIE_Y[i]);
            assert_eq!(bands[i].z, CIE_Z[i]);
            assert_eq!(bands[i].v, CIE_V[i]);
        }
    }

    #[test]
    fn equal_energy_white_maps_near_grey() {
        // X = Y = Z should land close to R = G = B in linear sRGB.
        let rgb = xyz_to_srgb([1.0, 1.0, 1.0]);
        for c in rgb {
            assert!(approx_eq!(Float, c, 1.0, epsilon = 0.3));
        }
    }
}
