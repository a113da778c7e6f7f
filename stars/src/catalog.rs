//! Bright star catalog

use knight_core::geometry::{horizon_direction, Vector3f};
use knight_core::knight::*;
use knight_ephemeris::{
    equatorial_to_horizon, greenwich_mean_sidereal_time, local_mean_sidereal_time,
};
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Minimum line length of a usable catalog record.
const MIN_RECORD_LEN: usize = 114;

/// A catalog star.
#[derive(Clone, Debug)]
pub struct Star {
    /// Right ascension in radians.
    pub ra: Float,

    /// Declination in radians.
    pub dec: Float,

    /// Visual magnitude.
    pub vmag: Float,

    /// B-V colour index.
    pub bv: Float,

    /// Unit direction in the horizon frame, filled in by
    /// `update_directions`.
    pub direction: Vector3f,
}

/// Extracts a fixed-column float field, `None` when blank.
fn field(line: &str, start: usize, len: usize) -> Option<Float> {
    let text = line.get(start..start + len)?.trim();
    if text.is_empty() {
        None
    } else {
        text.parse().ok()
    }
}

/// Extracts a fixed-column integer field, zero when blank or malformed.
fn int_field(line: &str, start: usize, len: usize) -> Float {
    line.get(start..start + len)
        .map(|text| text.trim().parse::<Int>().unwrap_or(0))
        .unwrap_or(0) as Float
}

/// Loads stars from a Yale Bright Star catalog file, keeping those at or
/// brighter than a magnitude limit. Records without a visual magnitude are
/// skipped.
///
/// * `path`      - Catalog file path.
/// * `mag_limit` - Faintest magnitude to keep.
pub fn load_catalog(path: &str, mag_limit: Float) -> Result<Vec<Star>, String> {
    let file =
        File::open(path).map_err(|e| format!("Error opening catalog file '{}'. {}", path, e))?;
    let reader = BufReader::new(file);

    let mut stars = vec![];
    for line in reader.lines() {
        let line = line.map_err(|e| format!("Error reading catalog file '{}'. {}", path, e))?;
        if line.len() < MIN_RECORD_LEN {
            continue;
        }

        let vmag = match field(&line, 102, 5) {
            Some(v) => v,
            None => continue,
        };
        if vmag > mag_limit {
            continue;
        }

        let bv = field(&line, 109, 5).unwrap_or(0.0);

        let ra_h = int_field(&line, 75, 2);
        let ra_m = int_field(&line, 77, 2);
        let ra_s = field(&line, 79, 4).unwrap_or(0.0);

        let de_sign = if line.as_bytes().get(83) == Some(&b'-') {
            -1.0
        } else {
            1.0
        };
        let de_d = int_field(&line, 84, 2);
        let de_m = int_field(&line, 86, 2);
        let de_s = int_field(&line, 88, 2);

        let ra_deg = (ra_h + ra_m / 60.0 + ra_s / 3600.0) * 15.0;
        let dec_deg = de_sign * (de_d + de_m / 60.0 + de_s / 3600.0);

        stars.push(Star {
            ra: radians(ra_deg),
            dec: radians(dec_deg),
            vmag,
            bv,
            direction: Vector3f::zero(),
        });
    }

    debug!("Loaded {} stars from '{}'", stars.len(), path);
    Ok(stars)
}

/// Recomputes the horizon-frame directions of all stars for an observer and
/// instant.
///
/// * `stars`   - Catalog stars.
/// * `jd`      - Julian day.
/// * `lat_deg` - Observer latitude in degrees.
/// * `lon_deg` - Observer longitude in degrees, east positive.
pub fn update_directions(stars: &mut [Star], jd: f64, lat_deg: f64, lon_deg: f64) {
    let lmst = local_mean_sidereal_time(greenwich_mean_sidereal_time(jd), lon_deg);
    for star in stars.iter_mut() {
        let (alt, az) = equatorial_to_horizon(star.ra as f64, star.dec as f64, lmst, lat_deg);
        star.direction = horizon_direction(az, alt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn mock_catalog(records: &[(Float, Float)]) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("knight-catalog-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("ybs-{}.dat", records.len()));
        let mut f = File::create(&path).unwrap();
        for (vmag, bv) in records {
            // Pad out to the fixed record layout with magnitude at column
            // 102 and colour index at column 109.
            writeln!(f, "{:<102}{:>5.2}  {:>5.2}", "HR0000", vmag, bv).unwrap();
        }
        path
    }

    #[test]
    fn magnitude_limit_filters() {
        let path = mock_catalog(&[(2.0, 0.0), (5.0, 0.5), (7.0, 1.0)]);
        let path = path.to_str().unwrap();

        assert_eq!(load_catalog(path, 6.0).unwrap().len(), 2);
        assert_eq!(load_catalog(path, 4.0).unwrap().len(), 1);
        assert_eq!(load_catalog(path, 1.0).unwrap().len(), 0);
    }

    #[test]
    fn colour_index_is_parsed() {
        let path = mock_catalog(&[(3.0, 1.25)]);
        let stars = load_catalog(path.to_str().unwrap(), 6.0).unwrap();
        assert_eq!(stars[0].bv, 1.25);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_catalog("/nonexistent/ybs.dat", 6.0).is_err());
    }

    #[test]
    fn update_directions_yields_unit_vectors() {
        let mut stars = vec![Star {
            ra: 1.0,
            dec: 0.5,
            vmag: 1.0,
            bv: 0.0,
            direction: Vector3f::zero(),
        }];
        update_directions(&mut stars, 2_460_000.5, 45.0, 10.0);
        assert!((stars[0].direction.length() - 1.0).abs() < 1e-5);
    }
}
