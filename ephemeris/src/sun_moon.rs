//! Sun and moon

use crate::frames::equatorial_direction;
use crate::time::{greenwich_mean_sidereal_time, local_mean_sidereal_time, J2000};
use knight_core::geometry::Vector3f;
use knight_core::knight::*;

/// Returns the sun's ecliptic longitude in degrees, low precision.
///
/// * `jd` - Julian day.
pub fn sun_ecliptic_longitude(jd: f64) -> f64 {
    let n = jd - J2000;
    let l = (280.460 + 0.9856474 * n).rem_euclid(360.0);
    let g = (357.528 + 0.9856003 * n).rem_euclid(360.0).to_radians();
    (l + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()).rem_euclid(360.0)
}

/// Returns the sun's equatorial coordinates `(ra, dec)` in radians.
///
/// * `jd` - Julian day.
pub fn sun_equatorial(jd: f64) -> (f64, f64) {
    let n = jd - J2000;
    let lambda = sun_ecliptic_longitude(jd).to_radians();
    let epsilon = (23.439 - 0.000_000_4 * n).to_radians();

    let ra = (epsilon.cos() * lambda.sin()).atan2(lambda.cos());
    let dec = (epsilon.sin() * lambda.sin()).asin();
    (ra, dec)
}

/// Returns the moon's equatorial coordinates `(ra, dec)` in radians, from
/// the mean longitude with the largest perturbation term in longitude and
/// latitude.
///
/// * `jd` - Julian day.
pub fn moon_equatorial(jd: f64) -> (f64, f64) {
    let t = (jd - J2000) / 36525.0;

    let lp = 218.3164477 + 481_267.881_234_21 * t; // mean longitude
    let mp = 134.9633964 + 477_198.867_505_5 * t; // mean anomaly
    let f = 93.2720950 + 483_202.017_523_3 * t; // argument of latitude

    let lambda = (lp + 6.289 * mp.to_radians().sin()).to_radians();
    let beta = (5.128 * f.to_radians().sin()).to_radians();

    let epsilon = 23.439_f64.to_radians();
    let sin_dec = beta.sin() * epsilon.cos() + beta.cos() * epsilon.sin() * lambda.sin();
    let cos_dec_cos_ra = beta.cos() * lambda.cos();
    let cos_dec_sin_ra = -beta.sin() * epsilon.sin() + beta.cos() * epsilon.cos() * lambda.sin();

    let dec = sin_dec.clamp(-1.0, 1.0).asin();
    let ra = cos_dec_sin_ra.atan2(cos_dec_cos_ra);
    (ra, dec)
}

/// Returns the sun and moon unit directions in the horizon frame.
///
/// * `jd`      - Julian day.
/// * `lat_deg` - Observer latitude in degrees.
/// * `lon_deg` - Observer longitude in degrees, east positive.
pub fn sun_moon_directions(jd: f64, lat_deg: f64, lon_deg: f64) -> (Vector3f, Vector3f) {
    let lmst = local_mean_sidereal_time(greenwich_mean_sidereal_time(jd), lon_deg);

    let (s_ra, s_dec) = sun_equatorial(jd);
    let sun = equatorial_direction(s_ra, s_dec, lmst, lat_deg);

    let (m_ra, m_dec) = moon_equatorial(jd);
    let moon = equatorial_direction(m_ra, m_dec, lmst, lat_deg);

    (sun, moon)
}

/// Returns the fraction of full-moon brightness for the lunar phase implied
/// by the sun and moon directions, using the Lambert sphere phase law.
///
/// * `sun_dir`  - Unit direction to the sun.
/// * `moon_dir` - Unit direction to the moon.
pub fn moon_phase_factor(sun_dir: Vector3f, moon_dir: Vector3f) -> Float {
    // Phase angle: 0 at full moon (sun opposite the moon), pi at new moon.
    let cos_elong = clamp(sun_dir.dot(&moon_dir), -1.0, 1.0);
    let alpha = (-cos_elong).acos();

    if alpha < 0.01 {
        return 1.0;
    }
    if alpha > PI - 0.01 {
        return 0.0;
    }

    let a2 = alpha * 0.5;
    let a4 = alpha * 0.25;
    max(1.0 - a2.sin() * a2.tan() * (1.0 / a4.tan()).ln(), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::julian_day;

    #[test]
    fn sun_longitude_near_zero_at_march_equinox() {
        let jd = julian_day(2026, 3, 20, 14.0);
        let lon = sun_ecliptic_longitude(jd);
        assert!(lon < 2.0 || lon > 358.0);
    }

    #[test]
    fn sun_below_horizon_at_local_midnight() {
        let jd = julian_day(2026, 2, 17, 0.0);
        let (sun, _) = sun_moon_directions(jd, 45.0, 0.0);
        assert!(sun.y < 0.0);
    }

    #[test]
    fn directions_are_unit() {
        let jd = julian_day(2026, 2, 17, 18.25);
        let (sun, moon) = sun_moon_directions(jd, 45.0, 0.0);
        assert!((sun.length() - 1.0).abs() < 1e-5);
        assert!((moon.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn phase_factor_limits() {
        let up = Vector3f::new(0.0, 1.0, 0.0);
        let down = Vector3f::new(0.0, -1.0, 0.0);
        // Opposed sun and moon: full.
        assert_eq!(moon_phase_factor(down, up), 1.0);
        // Aligned: new.
        assert_eq!(moon_phase_factor(up, up), 0.0);
        // Quadrature is dimmer than half.
        let east = Vector3f::new(1.0, 0.0, 0.0);
        let q = moon_phase_factor(east, up);
        assert!(q > 0.0 && q < 0.5);
    }
}
