//! Zodiacal light

use knight_core::geometry::Vector3f;
use knight_core::knight::*;
use knight_core::spectrum::Spectrum;

/// Obliquity of the ecliptic, J2000.
const OBLIQUITY: Float = 23.439 * PI / 180.0;

/// Overall radiance scale for the empirical zodiacal brightness model.
const ZODIACAL_SCALE: Float = 3.0e-7;

/// Converts horizon coordinates to ecliptic coordinates.
///
/// * `alt`     - Altitude in radians.
/// * `az`      - Azimuth in radians, measured from north through east.
/// * `lat_deg` - Observer latitude in degrees.
/// * `lmst`    - Local mean sidereal time in radians.
///
/// Returns `(ecliptic longitude, ecliptic latitude)` in radians.
pub fn horizon_to_ecliptic(alt: Float, az: Float, lat_deg: Float, lmst: Float) -> (Float, Float) {
    let lat = radians(lat_deg);

    // Horizon to equatorial.
    let sin_dec = alt.sin() * lat.sin() + alt.cos() * lat.cos() * az.cos();
    let dec = sin_dec.asin();
    let cos_dec = dec.cos();

    let ha = if abs(cos_dec) > 1e-4 {
        let sin_ha = -az.sin() * alt.cos() / cos_dec;
        let cos_ha = (alt.sin() - lat.sin() * sin_dec) / (lat.cos() * cos_dec);
        sin_ha.atan2(cos_ha)
    } else {
        0.0
    };

    let mut ra = lmst - ha;
    while ra < 0.0 {
        ra += TWO_PI;
    }
    while ra >= TWO_PI {
        ra -= TWO_PI;
    }

    // Equatorial to ecliptic.
    let sin_beta = sin_dec * OBLIQUITY.cos() - cos_dec * OBLIQUITY.sin() * ra.sin();
    let beta = sin_beta.asin();

    let sin_lambda = sin_dec * OBLIQUITY.sin() + cos_dec * OBLIQUITY.cos() * ra.sin();
    let cos_lambda = cos_dec * ra.cos();
    let mut lambda = sin_lambda.atan2(cos_lambda);
    if lambda < 0.0 {
        lambda += TWO_PI;
    }

    (lambda, beta)
}

/// Returns the zodiacal light radiance for a view direction, from an
/// empirical fit: a steep power-law peak towards the sun, a gaussian
/// gegenschein bump at 180 degrees elongation, and an exponential falloff
/// away from the ecliptic plane. The spectrum is flat.
///
/// * `view_dir`        - Unit view direction in the horizon frame.
/// * `sun_ecl_lon_deg` - Sun's ecliptic longitude in degrees.
/// * `lat_deg`         - Observer latitude in degrees.
/// * `lmst`            - Local mean sidereal time in radians.
pub fn zodiacal_radiance(
    view_dir: Vector3f,
    sun_ecl_lon_deg: Float,
    lat_deg: Float,
    lmst: Float,
) -> Spectrum {
    let alt = clamp(view_dir.y, -1.0, 1.0).asin();
    let az = view_dir.x.atan2(view_dir.z);

    let (lambda, beta) = horizon_to_ecliptic(alt, az, lat_deg, lmst);

    // Longitude offset from the sun, wrapped to [0, pi].
    let mut d_lambda = abs(lambda - radians(sun_ecl_lon_deg));
    if d_lambda > PI {
        d_lambda = TWO_PI - d_lambda;
    }

    // Elongation.
    let cos_eps = beta.cos() * d_lambda.cos();
    let eps_deg = degrees(clamp(cos_eps, -1.0, 1.0).acos());

    let eps_term = 1.0 / (eps_deg.powf(1.5) + 1.0);
    let gegenschein = 0.002 * (-((eps_deg - 180.0) / 15.0).powi(2)).exp();
    let beta_term = (-3.0 * abs(beta)).exp();

    let radiance = (2000.0 * eps_term + 5.0 * gegenschein) * beta_term * ZODIACAL_SCALE;

    Spectrum::constant(radiance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knight_core::spectrum::REFERENCE_BAND;

    #[test]
    fn brighter_near_sun_than_at_quadrature() {
        // Equatorial observer, lmst chosen so the ecliptic passes overhead
        // isn't required; just compare two elongations with everything else
        // fixed.
        let lat = 0.0;
        let lmst = 0.0;
        let near = zodiacal_radiance(Vector3f::new(0.0, 0.3, 1.0).normalize(), 0.0, lat, lmst);
        let far = zodiacal_radiance(Vector3f::new(0.0, 0.3, -1.0).normalize(), 90.0, lat, lmst);
        assert!(near[REFERENCE_BAND] >= far[REFERENCE_BAND]);
    }

    #[test]
    fn horizon_ecliptic_latitude_bounded() {
        for (alt, az) in [(0.1, 0.5), (1.2, 3.0), (0.7, 5.5)] {
            let (lambda, beta) = horizon_to_ecliptic(alt, az, 45.0, 1.0);
            assert!((0.0..TWO_PI).contains(&lambda));
            assert!(abs(beta) <= PI / 2.0 + 1e-4);
        }
    }

    #[test]
    fn radiance_is_non_negative() {
        let s = zodiacal_radiance(Vector3f::new(0.3, 0.5, 0.8).normalize(), 120.0, 30.0, 2.0);
        assert!(s[REFERENCE_BAND] >= 0.0);
    }
}
