//! Coordinate frames

use knight_core::geometry::{horizon_direction, Vector3f};
use knight_core::knight::*;

/// Mean obliquity of the ecliptic at J2000, radians.
pub const OBLIQUITY_J2000: f64 = 23.439 * std::f64::consts::PI / 180.0;

/// Converts equatorial coordinates to horizon coordinates.
///
/// * `ra`      - Right ascension in radians.
/// * `dec`     - Declination in radians.
/// * `lmst`    - Local mean sidereal time in radians.
/// * `lat_deg` - Observer latitude in degrees.
///
/// Returns `(altitude, azimuth)` in radians, azimuth from north through
/// east.
pub fn equatorial_to_horizon(ra: f64, dec: f64, lmst: f64, lat_deg: f64) -> (Float, Float) {
    let ha = lmst - ra;
    let lat = lat_deg.to_radians();

    let sin_alt = dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos();
    let alt = sin_alt.clamp(-1.0, 1.0).asin();

    let sin_az_c_alt = -dec.cos() * ha.sin();
    let cos_az_c_alt = dec.sin() * lat.cos() - dec.cos() * lat.sin() * ha.cos();
    let az = sin_az_c_alt.atan2(cos_az_c_alt);

    (alt as Float, az as Float)
}

/// Converts ecliptic coordinates to equatorial coordinates.
///
/// * `lambda` - Ecliptic longitude in radians.
/// * `beta`   - Ecliptic latitude in radians.
///
/// Returns `(right ascension, declination)` in radians.
pub fn ecliptic_to_equatorial(lambda: f64, beta: f64) -> (f64, f64) {
    let eps = OBLIQUITY_J2000;
    let sin_dec = beta.sin() * eps.cos() + beta.cos() * eps.sin() * lambda.sin();
    let cos_dec_cos_ra = beta.cos() * lambda.cos();
    let cos_dec_sin_ra = -beta.sin() * eps.sin() + beta.cos() * eps.cos() * lambda.sin();

    let dec = sin_dec.clamp(-1.0, 1.0).asin();
    let ra = cos_dec_sin_ra.atan2(cos_dec_cos_ra);
    (ra, dec)
}

/// Converts equatorial coordinates straight to a unit direction in the
/// horizon frame.
///
/// * `ra`      - Right ascension in radians.
/// * `dec`     - Declination in radians.
/// * `lmst`    - Local mean sidereal time in radians.
/// * `lat_deg` - Observer latitude in degrees.
pub fn equatorial_direction(ra: f64, dec: f64, lmst: f64, lat_deg: f64) -> Vector3f {
    let (alt, az) = equatorial_to_horizon(ra, dec, lmst, lat_deg);
    horizon_direction(az, alt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn celestial_pole_altitude_equals_latitude() {
        // From 45 N the north celestial pole sits 45 degrees up, due north.
        let (alt, az) = equatorial_to_horizon(1.234, std::f64::consts::FRAC_PI_2, 0.5, 45.0);
        assert!(approx_eq!(Float, alt, radians(45.0), epsilon = 1e-4));
        assert!(approx_eq!(Float, az.cos(), 1.0, epsilon = 1e-4));
    }

    #[test]
    fn transiting_object_is_due_south() {
        // Hour angle zero, declination below the observer's latitude.
        let (alt, az) = equatorial_to_horizon(1.0, 0.0, 1.0, 45.0);
        assert!(approx_eq!(Float, alt, radians(45.0), epsilon = 1e-4));
        // Azimuth 180 degrees.
        assert!(approx_eq!(Float, abs(az), PI, epsilon = 1e-4));
    }

    #[test]
    fn ecliptic_zero_point_is_equatorial_zero() {
        let (ra, dec) = ecliptic_to_equatorial(0.0, 0.0);
        assert!(ra.abs() < 1e-9);
        assert!(dec.abs() < 1e-9);
    }

    #[test]
    fn summer_solstice_declination() {
        // Lambda 90 degrees on the ecliptic lies at declination +obliquity.
        let (_, dec) = ecliptic_to_equatorial(std::f64::consts::FRAC_PI_2, 0.0);
        assert!((dec - OBLIQUITY_J2000).abs() < 1e-9);
    }
}
