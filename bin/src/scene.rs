//! Scene setup

use crate::options::Options;
use knight_atmosphere::{Atmosphere, SkyLight, EARTH_RADIUS};
use knight_cameras::{Camera, EnvironmentCamera, PerspectiveCamera};
use knight_core::geometry::{horizon_direction, Vector3f};
use knight_core::knight::*;
use knight_core::spectrum::Spectrum;
use knight_ephemeris::{
    greenwich_mean_sidereal_time, julian_day, local_mean_sidereal_time, moon_phase_factor,
    planet_positions, sun_ecliptic_longitude, sun_moon_directions,
};
use knight_stars::{load_catalog, update_directions, PointSource};

/// Flat extraterrestrial solar spectral irradiance.
pub const SUN_IRRADIANCE: Float = 100.0;

/// Full-moon irradiance as a fraction of the sun's.
pub const MOON_IRRADIANCE_RATIO: Float = 1.0e-6;

/// Observer height above the surface in metres.
pub const OBSERVER_HEIGHT: Float = 10.0;

/// Everything one render needs, assembled from the command line.
pub struct Scene {
    /// Atmosphere model.
    pub atmosphere: Atmosphere,

    /// Camera.
    pub camera: Box<dyn Camera>,

    /// Observer position, planet-centred.
    pub origin: Vector3f,

    /// Lights feeding the scattering integral.
    pub lights: Vec<SkyLight>,

    /// Unit direction to the sun.
    pub sun_dir: Vector3f,

    /// Extraterrestrial solar irradiance.
    pub sun_irradiance: Spectrum,

    /// Unit direction to the moon, `None` when the moon is disabled.
    pub moon_dir: Option<Vector3f>,

    /// Sun's ecliptic longitude in degrees, for the zodiacal light model.
    pub sun_ecl_lon_deg: Float,

    /// Observer latitude in degrees.
    pub lat_deg: f64,

    /// Local mean sidereal time in radians.
    pub lmst: Float,

    /// Stars and planets to splat.
    pub sources: Vec<PointSource>,
}

impl Scene {
    /// Builds the scene for a set of options.
    pub fn build(opts: &Options) -> Result<Self, String> {
        let (year, month, day) = opts.date_parts()?;
        let jd = julian_day(year, month, day, opts.time);
        let lmst = local_mean_sidereal_time(greenwich_mean_sidereal_time(jd), opts.lon);

        let (sun_dir, moon_dir) = sun_moon_directions(jd, opts.lat, opts.lon);
        info!(
            "Sun altitude {:.2} deg, moon altitude {:.2} deg",
            degrees(clamp(sun_dir.y, -1.0, 1.0).asin()),
            degrees(clamp(moon_dir.y, -1.0, 1.0).asin())
        );

        let sun_irradiance = Spectrum::constant(SUN_IRRADIANCE);
        let mut lights = vec![SkyLight {
            dir: sun_dir,
            irradiance: sun_irradiance,
        }];

        let moon_dir = if opts.no_moon {
            None
        } else {
            let phase = moon_phase_factor(sun_dir, moon_dir);
            info!("Moon phase factor {:.3}", phase);
            lights.push(SkyLight {
                dir: moon_dir,
                irradiance: sun_irradiance * (MOON_IRRADIANCE_RATIO * phase),
            });
            Some(moon_dir)
        };

        let origin = Vector3f::new(0.0, EARTH_RADIUS + OBSERVER_HEIGHT, 0.0);

        let forward = match moon_dir {
            Some(moon) if opts.track_moon && moon.y > 0.0 => {
                info!("Tracking the moon");
                moon
            }
            _ => horizon_direction(radians(opts.az), radians(opts.alt)),
        };

        let camera: Box<dyn Camera> = if opts.panorama {
            Box::new(EnvironmentCamera::new(origin, opts.width, opts.height))
        } else {
            Box::new(PerspectiveCamera::new(
                origin,
                forward,
                opts.fov,
                opts.width,
                opts.height,
            ))
        };

        let mut sources = vec![];
        match load_catalog(&opts.catalog, opts.mag_limit) {
            Ok(mut stars) => {
                info!("Loaded {} stars from '{}'", stars.len(), opts.catalog);
                update_directions(&mut stars, jd, opts.lat, opts.lon);
                sources.extend(stars.into_iter().map(|s| PointSource {
                    direction: s.direction,
                    vmag: s.vmag,
                    bv: s.bv,
                }));
            }
            Err(e) => warn!("Rendering without stars. {}", e),
        }

        for p in planet_positions(jd, opts.lat, opts.lon) {
            if p.alt > 0.0 {
                info!(
                    "{}: alt {:.1} deg, az {:.1} deg, mag {:.1}",
                    p.name,
                    degrees(p.alt),
                    degrees(p.az),
                    p.vmag
                );
            }
            sources.push(PointSource {
                direction: p.direction,
                vmag: p.vmag,
                bv: p.bv,
            });
        }

        Ok(Self {
            atmosphere: Atmosphere::new(opts.haze),
            camera,
            origin,
            lights,
            sun_dir,
            sun_irradiance,
            moon_dir,
            sun_ecl_lon_deg: sun_ecliptic_longitude(jd) as Float,
            lat_deg: opts.lat,
            lmst: lmst as Float,
            sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn options(extra: &[&str]) -> Options {
        let mut args = vec!["knight", "--catalog", "/nonexistent/ybs.dat"];
        args.extend_from_slice(extra);
        Options::parse_from(args)
    }

    #[test]
    fn default_scene_has_sun_and_moon_lights() {
        let scene = Scene::build(&options(&[])).unwrap();
        assert_eq!(scene.lights.len(), 2);
        assert!(scene.moon_dir.is_some());
        // Five planets even with no star catalog.
        assert_eq!(scene.sources.len(), 5);
    }

    #[test]
    fn no_moon_drops_the_second_light() {
        let scene = Scene::build(&options(&["--no-moon"])).unwrap();
        assert_eq!(scene.lights.len(), 1);
        assert!(scene.moon_dir.is_none());
    }

    #[test]
    fn bad_date_is_an_error() {
        assert!(Scene::build(&options(&["--date", "soon"])).is_err());
    }
}
