//! Naked-eye planets

use crate::frames::{ecliptic_to_equatorial, equatorial_to_horizon};
use crate::time::{greenwich_mean_sidereal_time, local_mean_sidereal_time, J2000};
use knight_core::geometry::{horizon_direction, Vector3f};
use knight_core::knight::*;

/// Apparent state of a planet for one observer and instant.
#[derive(Clone, Debug)]
pub struct Planet {
    /// Planet name.
    pub name: &'static str,

    /// Altitude in radians.
    pub alt: Float,

    /// Azimuth in radians, from north through east.
    pub az: Float,

    /// Unit direction in the horizon frame.
    pub direction: Vector3f,

    /// Apparent visual magnitude.
    pub vmag: Float,

    /// B-V colour index.
    pub bv: Float,
}

/// Mean orbital elements at J2000 with a secular rate on the mean longitude
/// only. Low precision, but the slow elements drift under a degree per
/// century for these bodies.
struct Elements {
    name: &'static str,
    /// Semi-major axis, AU.
    a: f64,
    /// Eccentricity.
    e: f64,
    /// Inclination, degrees.
    i: f64,
    /// Mean longitude at epoch, degrees.
    l0: f64,
    /// Mean longitude rate, degrees per Julian century.
    l_rate: f64,
    /// Longitude of perihelion, degrees.
    peri: f64,
    /// Longitude of the ascending node, degrees.
    node: f64,
    /// Absolute magnitude term.
    h: f64,
    /// Linear phase coefficient, magnitudes per degree.
    phase_coeff: f64,
    /// B-V colour index.
    bv: Float,
}

const ELEMENTS: [Elements; 5] = [
    Elements {
        name: "Mercury",
        a: 0.387_099_27,
        e: 0.205_635_93,
        i: 7.004_979_02,
        l0: 252.250_323_50,
        l_rate: 149_472.674_111_75,
        peri: 77.457_796_28,
        node: 48.330_765_93,
        h: -0.42,
        phase_coeff: 0.038,
        bv: 0.93,
    },
    Elements {
        name: "Venus",
        a: 0.723_335_66,
        e: 0.006_776_72,
        i: 3.394_676_05,
        l0: 181.979_099_50,
        l_rate: 58_517.815_387_29,
        peri: 131.602_467_18,
        node: 76.679_842_55,
        h: -4.40,
        phase_coeff: 0.0009,
        bv: 0.82,
    },
    Elements {
        name: "Mars",
        a: 1.523_710_34,
        e: 0.093_394_10,
        i: 1.849_691_42,
        l0: -4.553_432_05,
        l_rate: 19_140.302_684_99,
        peri: -23.943_629_59,
        node: 49.559_538_91,
        h: -1.52,
        phase_coeff: 0.016,
        bv: 1.36,
    },
    Elements {
        name: "Jupiter",
        a: 5.202_887_00,
        e: 0.048_386_24,
        i: 1.304_396_95,
        l0: 34.396_440_51,
        l_rate: 3_034.746_127_75,
        peri: 14.728_479_83,
        node: 100.473_909_09,
        h: -9.40,
        phase_coeff: 0.005,
        bv: 0.83,
    },
    Elements {
        name: "Saturn",
        a: 9.536_675_94,
        e: 0.053_861_79,
        i: 2.485_991_87,
        l0: 49.954_244_23,
        l_rate: 1_222.493_622_01,
        peri: 92.598_878_31,
        node: 113.662_424_48,
        h: -8.88,
        phase_coeff: 0.044,
        bv: 1.04,
    },
];

/// Earth-Moon barycentre elements, used to form geocentric positions.
const EARTH: Elements = Elements {
    name: "Earth",
    a: 1.000_002_61,
    e: 0.016_711_23,
    i: -0.000_015_31,
    l0: 100.464_571_66,
    l_rate: 35_999.372_449_81,
    peri: 102.937_681_93,
    node: 0.0,
    h: 0.0,
    phase_coeff: 0.0,
    bv: 0.0,
};

/// Solves Kepler's equation E - e sin E = M with Newton iteration.
fn solve_kepler(m: f64, e: f64) -> f64 {
    let mut big_e = m + e * m.sin();
    for _ in 0..8 {
        let f = big_e - e * big_e.sin() - m;
        let fp = 1.0 - e * big_e.cos();
        big_e -= f / fp;
    }
    big_e
}

/// Returns the heliocentric ecliptic position in AU at a Julian day.
fn heliocentric(el: &Elements, jd: f64) -> [f64; 3] {
    let t = (jd - J2000) / 36525.0;
    let l = (el.l0 + el.l_rate * t).rem_euclid(360.0);

    // Mean anomaly, then the orbital plane position.
    let m = ((l - el.peri).rem_euclid(360.0)).to_radians();
    let big_e = solve_kepler(m, el.e);
    let xp = el.a * (big_e.cos() - el.e);
    let yp = el.a * (1.0 - el.e * el.e).sqrt() * big_e.sin();

    // Rotate by argument of perihelion, inclination and node into the
    // ecliptic frame.
    let w = (el.peri - el.node).to_radians();
    let omega = el.node.to_radians();
    let inc = el.i.to_radians();

    let (cw, sw) = (w.cos(), w.sin());
    let (co, so) = (omega.cos(), omega.sin());
    let ci = inc.cos();

    [
        (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
        (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
        (sw * inc.sin()) * xp + (cw * inc.sin()) * yp,
    ]
}

/// Computes apparent positions and magnitudes of the five naked-eye planets.
///
/// * `jd`      - Julian day.
/// * `lat_deg` - Observer latitude in degrees.
/// * `lon_deg` - Observer longitude in degrees, east positive.
pub fn planet_positions(jd: f64, lat_deg: f64, lon_deg: f64) -> Vec<Planet> {
    let lmst = local_mean_sidereal_time(greenwich_mean_sidereal_time(jd), lon_deg);
    let earth = heliocentric(&EARTH, jd);
    let r_earth = (earth[0] * earth[0] + earth[1] * earth[1] + earth[2] * earth[2]).sqrt();

    ELEMENTS
        .iter()
        .map(|el| {
            let p = heliocentric(el, jd);
            let g = [p[0] - earth[0], p[1] - earth[1], p[2] - earth[2]];

            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            let delta = (g[0] * g[0] + g[1] * g[1] + g[2] * g[2]).sqrt();

            // Geocentric ecliptic coordinates.
            let lambda = g[1].atan2(g[0]);
            let beta = g[2].atan2((g[0] * g[0] + g[1] * g[1]).sqrt());

            let (ra, dec) = ecliptic_to_equatorial(lambda, beta);
            let (alt, az) = equatorial_to_horizon(ra, dec, lmst, lat_deg);

            // Phase angle at the planet between the sun and the earth.
            let cos_alpha =
                ((r * r + delta * delta - r_earth * r_earth) / (2.0 * r * delta)).clamp(-1.0, 1.0);
            let alpha_deg = cos_alpha.acos().to_degrees();

            let vmag = el.h + 5.0 * (r * delta).log10() + el.phase_coeff * alpha_deg;

            Planet {
                name: el.name,
                alt,
                az,
                direction: horizon_direction(az, alt),
                vmag: vmag as Float,
                bv: el.bv,
            }
        })
        .collect()
}
