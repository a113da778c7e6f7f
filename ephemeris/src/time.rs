//! Time scales

use knight_core::knight::*;

/// Julian day of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;

/// Returns the Julian day for a calendar date and UTC hour.
///
/// * `year`  - Calendar year.
/// * `month` - Month, 1 to 12.
/// * `day`   - Day of month.
/// * `hour`  - UTC hour as a fraction, e.g. 18.25 for 18:15.
pub fn julian_day(year: i32, month: i32, day: i32, hour: f64) -> f64 {
    let (year, month) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = year / 100;
    let b = 2 - a + a / 4;
    (365.25 * (year + 4716) as f64).floor()
        + (30.6001 * (month + 1) as f64).floor()
        + day as f64
        + b as f64
        - 1524.5
        + hour / 24.0
}

/// Returns the Greenwich mean sidereal time in radians.
///
/// * `jd` - Julian day.
pub fn greenwich_mean_sidereal_time(jd: f64) -> f64 {
    let t = (jd - J2000) / 36525.0;
    let mut gmst = 280.46061837
        + 360.98564736629 * (jd - J2000)
        + t * t * (0.000387933 - t / 38_710_000.0);
    gmst = gmst.rem_euclid(360.0);
    gmst.to_radians()
}

/// Returns the local mean sidereal time in radians.
///
/// * `gmst`    - Greenwich mean sidereal time in radians.
/// * `lon_deg` - Observer longitude in degrees, east positive.
pub fn local_mean_sidereal_time(gmst: f64, lon_deg: f64) -> f64 {
    (gmst + lon_deg.to_radians()).rem_euclid(TWO_PI as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_epoch() {
        // 2000-01-01 12:00 UTC is JD 2451545.0.
        assert_eq!(julian_day(2000, 1, 1, 12.0), J2000);
    }

    #[test]
    fn january_wraps_to_previous_year() {
        // One day before the epoch, crossing the month-adjust branch.
        assert_eq!(julian_day(1999, 12, 31, 12.0), J2000 - 1.0);
        assert_eq!(julian_day(2000, 2, 29, 0.0), 2_451_603.5);
    }

    #[test]
    fn gmst_at_epoch() {
        // Meeus: GMST at J2000.0 is 280.46062 degrees.
        let gmst = greenwich_mean_sidereal_time(J2000).to_degrees();
        assert!((gmst - 280.46062).abs() < 1e-3);
    }

    #[test]
    fn lmst_offsets_by_longitude() {
        let gmst = 1.0;
        let east = local_mean_sidereal_time(gmst, 90.0);
        assert!((east - (1.0 + std::f64::consts::FRAC_PI_2)).abs() < 1e-9);
    }
}
