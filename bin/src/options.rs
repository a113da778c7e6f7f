//! Command line options

use clap::Parser;
use knight_core::knight::*;

/// Night sky renderer.
#[derive(Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Options {
    /// Observer latitude in degrees.
    #[clap(long, value_name = "DEG", default_value_t = 45.0, allow_hyphen_values = true)]
    pub lat: f64,

    /// Observer longitude in degrees, east positive.
    #[clap(long, value_name = "DEG", default_value_t = 0.0, allow_hyphen_values = true)]
    pub lon: f64,

    /// Simulation date as YYYY-MM-DD.
    #[clap(long, value_name = "DATE", default_value = "2026-02-17")]
    pub date: String,

    /// UTC hour as a fraction, e.g. 18.25 for 18:15.
    #[clap(long, value_name = "HOUR", default_value_t = 18.25)]
    pub time: f64,

    /// Camera azimuth in degrees (0 = N, 90 = E, 180 = S, 270 = W).
    #[clap(long, value_name = "DEG", default_value_t = 270.0)]
    pub az: Float,

    /// Camera altitude in degrees above the horizon.
    #[clap(long, value_name = "DEG", default_value_t = 10.0, allow_hyphen_values = true)]
    pub alt: Float,

    /// Vertical field of view in degrees.
    #[clap(long, value_name = "DEG", default_value_t = 60.0)]
    pub fov: Float,

    /// Image width in pixels.
    #[clap(long, value_name = "PX", default_value_t = 640)]
    pub width: usize,

    /// Image height in pixels.
    #[clap(long, value_name = "PX", default_value_t = 480)]
    pub height: usize,

    /// Render a full-sky cylindrical panorama instead of a pinhole view.
    #[clap(long)]
    pub panorama: bool,

    /// Aim the camera at the moon, ignoring --az and --alt.
    #[clap(long = "track-moon")]
    pub track_moon: bool,

    /// Disable the moon.
    #[clap(long = "no-moon")]
    pub no_moon: bool,

    /// Aerosol load multiplier; 1 is a clear night.
    #[clap(long, value_name = "FACTOR", default_value_t = 1.0)]
    pub haze: Float,

    /// Star catalog file path.
    #[clap(long, value_name = "FILE", default_value = "data/ybsc5.dat")]
    pub catalog: String,

    /// Faintest stellar magnitude to render.
    #[clap(long = "mag-limit", value_name = "MAG", default_value_t = 6.5)]
    pub mag_limit: Float,

    /// Aperture diameter in millimetres, controls star spread widths.
    #[clap(long, value_name = "MM", default_value_t = 6.0)]
    pub aperture: Float,

    /// Exposure adjustment in stops.
    #[clap(long, value_name = "STOPS", default_value_t = 0.0, allow_hyphen_values = true)]
    pub exposure: Float,

    /// Disable the bloom pass.
    #[clap(long = "no-bloom")]
    pub no_bloom: bool,

    /// Bloom standard deviation in degrees on the sky.
    #[clap(long = "bloom-size", value_name = "DEG", default_value_t = 0.15)]
    pub bloom_size: Float,

    /// Number of render threads; 0 uses all available cores.
    #[clap(long = "nthreads", short = 't', value_name = "NUM", default_value_t = 0)]
    pub n_threads: usize,

    /// Output image path (.pfm or .png).
    #[clap(long = "outfile", short = 'o', value_name = "FILE", default_value = "output.pfm")]
    pub image_file: String,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        if self.n_threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.n_threads
        }
    }

    /// Parses the `--date` value into `(year, month, day)`.
    pub fn date_parts(&self) -> Result<(i32, i32, i32), String> {
        let parts: Vec<_> = self.date.split('-').collect();
        if parts.len() != 3 {
            return Err(format!("Invalid date '{}'. Expected YYYY-MM-DD.", self.date));
        }
        let parse = |s: &str| {
            s.parse::<i32>()
                .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD.", self.date))
        };
        Ok((parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parsing() {
        let mut opts = Options::parse_from(["knight"]);
        assert_eq!(opts.date_parts().unwrap(), (2026, 2, 17));

        opts.date = "1999-12-31".into();
        assert_eq!(opts.date_parts().unwrap(), (1999, 12, 31));

        opts.date = "not-a-date".into();
        assert!(opts.date_parts().is_err());
    }

    #[test]
    fn defaults_are_sane() {
        let opts = Options::parse_from(["knight"]);
        assert_eq!(opts.width, 640);
        assert_eq!(opts.height, 480);
        assert!(!opts.panorama);
        assert!(opts.threads() >= 1);
    }
}
