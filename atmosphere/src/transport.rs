//! Single scattering transport

use crate::model::Atmosphere;
use crate::phase::{phase_hg, phase_rayleigh};
use knight_core::geometry::{intersect_sphere, Ray, Vector3f};
use knight_core::knight::*;
use knight_core::spectrum::Spectrum;

/// Number of samples along the view ray.
pub const VIEW_SAMPLES: usize = 16;

/// Number of samples along each light path.
pub const LIGHT_SAMPLES: usize = 8;

/// A distant light illuminating the atmosphere.
#[derive(Clone, Debug)]
pub struct SkyLight {
    /// Unit direction towards the light.
    pub dir: Vector3f,

    /// Extraterrestrial spectral irradiance.
    pub irradiance: Spectrum,
}

/// Result of marching a view ray through the atmosphere.
#[derive(Clone, Debug)]
pub struct ScatterResult {
    /// In-scattered spectral radiance along the ray.
    pub radiance: Spectrum,

    /// Per-band transmittance from the ray origin to the top of the
    /// atmosphere (or to the ground when the ray hits it). Sources behind the
    /// atmosphere are attenuated by this.
    pub transmittance: Spectrum,
}

impl ScatterResult {
    /// Result for a ray that never enters the atmosphere: no scattering and
    /// no coverage, so compositing consumers leave the pixel untouched.
    fn miss() -> Self {
        Self {
            radiance: Spectrum::default(),
            transmittance: Spectrum::default(),
        }
    }
}

impl Atmosphere {
    /// Integrates the Rayleigh and Mie density profiles along a segment with
    /// a fixed-count midpoint rule. Returns the two density integrals; they
    /// become optical depths once multiplied by the scattering coefficients.
    ///
    /// * `p`    - Segment start, planet-centred.
    /// * `dir`  - Unit direction.
    /// * `dist` - Segment length in metres.
    fn density_integrals(&self, p: Vector3f, dir: Vector3f, dist: Float) -> (Float, Float) {
        let dt = dist / LIGHT_SAMPLES as Float;
        let mut od_r = 0.0;
        let mut od_m = 0.0;

        for i in 0..LIGHT_SAMPLES {
            let t = (i as Float + 0.5) * dt;
            let h = max((p + dir * t).length() - self.planet_radius, 0.0);
            od_r += (-h / self.rayleigh_scale_height).exp() * dt;
            od_m += (-h / self.mie_scale_height).exp() * dt;
        }

        (od_r, od_m)
    }

    /// Returns the per-band transmittance from a point to the top of the
    /// atmosphere along a direction. Rays that miss the shell see free space.
    ///
    /// * `p`   - Start point, planet-centred.
    /// * `dir` - Unit direction.
    pub fn transmittance(&self, p: Vector3f, dir: Vector3f) -> Spectrum {
        let ray = Ray::new(p, dir);
        match intersect_sphere(&ray, self.top_radius) {
            Some((_, t1)) => {
                let (od_r, od_m) = self.density_integrals(p, dir, t1);
                self.extinction(od_r, od_m)
            }
            None => Spectrum::constant(1.0),
        }
    }

    /// Converts a pair of density integrals into per-band transmittance.
    fn extinction(&self, od_r: Float, od_m: Float) -> Spectrum {
        let tau = self.beta_rayleigh * od_r + self.beta_mie * od_m;
        (tau * -1.0).exp()
    }

    /// Marches a view ray through the atmosphere, accumulating single
    /// scattered radiance from each light. The integration interval is the
    /// ray's overlap with the shell, cut short at the ground when the ray
    /// hits the planet.
    ///
    /// * `ray`    - View ray with a planet-centred origin.
    /// * `lights` - Lights illuminating the atmosphere.
    pub fn in_scatter(&self, ray: &Ray, lights: &[SkyLight]) -> ScatterResult {
        let (t0, mut t1) = match intersect_sphere(ray, self.top_radius) {
            Some(interval) => interval,
            None => return ScatterResult::miss(),
        };
        if let Some((t_ground, _)) = intersect_sphere(ray, self.planet_radius) {
            t1 = min(t1, t_ground);
        }

        let dt = (t1 - t0) / VIEW_SAMPLES as Float;

        // Phase values are constant along the ray for distant lights.
        let phases: Vec<(Float, Float)> = lights
            .iter()
            .map(|light| {
                let mu = ray.d.dot(&light.dir);
                (phase_rayleigh(mu), phase_hg(mu, self.mie_g))
            })
            .collect();

        let mut radiance = Spectrum::default();
        let mut view_od_r = 0.0;
        let mut view_od_m = 0.0;

        for i in 0..VIEW_SAMPLES {
            let t = t0 + (i as Float + 0.5) * dt;
            let p = ray.at(t);
            let h = max(p.length() - self.planet_radius, 0.0);

            let rho_r = (-h / self.rayleigh_scale_height).exp();
            let rho_m = (-h / self.mie_scale_height).exp();

            // Transmittance back to the camera, evaluated at the segment
            // midpoint by adding half of this segment's depth.
            let t_view = self.extinction(
                view_od_r + rho_r * dt * 0.5,
                view_od_m + rho_m * dt * 0.5,
            );

            for (light, &(p_r, p_m)) in lights.iter().zip(phases.iter()) {
                let t_light = self.transmittance(p, light.dir);
                let scatter =
                    self.beta_rayleigh * (rho_r * p_r) + self.beta_mie * (rho_m * p_m);
                radiance += scatter
                    .mul_spectrum(&light.irradiance)
                    .mul_spectrum(&t_light)
                    .mul_spectrum(&t_view)
                    * dt;
            }

            view_od_r += rho_r * dt;
            view_od_m += rho_m * dt;
        }

        ScatterResult {
            radiance,
            transmittance: self.extinction(view_od_r, view_od_m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EARTH_RADIUS;
    use knight_core::spectrum::REFERENCE_BAND;
    use proptest::prelude::*;

    fn observer() -> Vector3f {
        Vector3f::new(0.0, EARTH_RADIUS + 1.0, 0.0)
    }

    fn overhead_sun() -> SkyLight {
        SkyLight {
            dir: Vector3f::new(0.0, 1.0, 0.0),
            irradiance: Spectrum::constant(100.0),
        }
    }

    #[test]
    fn ray_missing_shell_contributes_nothing() {
        let atm = Atmosphere::default();
        // Far outside the shell, pointing away.
        let ray = Ray::new(
            Vector3f::new(0.0, 10.0 * EARTH_RADIUS, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
        );
        let res = atm.in_scatter(&ray, &[overhead_sun()]);
        assert!(res.radiance.is_black());
        assert!(res.transmittance.is_black());
    }

    #[test]
    fn transmittance_drops_with_deeper_origins() {
        let atm = Atmosphere::default();
        let up = Vector3f::new(0.0, 1.0, 0.0);
        // Lowering the start of a zenith path only lengthens it.
        let high = atm.transmittance(Vector3f::new(0.0, EARTH_RADIUS + 20_000.0, 0.0), up);
        let low = atm.transmittance(Vector3f::new(0.0, EARTH_RADIUS + 100.0, 0.0), up);
        assert!(low[REFERENCE_BAND] < high[REFERENCE_BAND]);
    }

    #[test]
    fn zenith_sky_is_blue_dominant() {
        let atm = Atmosphere::default();
        let ray = Ray::new(observer(), Vector3f::new(0.0, 1.0, 0.0));
        let res = atm.in_scatter(&ray, &[overhead_sun()]);

        // 450 nm scatters more than 650 nm.
        assert!(res.radiance[7] > res.radiance[27]);
        // Some light was removed from the direct path.
        let t = res.transmittance[REFERENCE_BAND];
        assert!(t > 0.0 && t < 1.0);
    }

    #[test]
    fn downward_ray_interval_is_ground_clamped() {
        let atm = Atmosphere::default();
        // An observer slightly above the surface looking straight down
        // traverses almost no air, so transmittance stays near one.
        let ray = Ray::new(
            Vector3f::new(0.0, EARTH_RADIUS + 100.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
        );
        let res = atm.in_scatter(&ray, &[overhead_sun()]);
        assert!(res.transmittance[REFERENCE_BAND] > 0.99);
    }

    #[test]
    fn horizon_dimmer_light_path_than_zenith() {
        let atm = Atmosphere::default();
        let up = atm.transmittance(observer(), Vector3f::new(0.0, 1.0, 0.0));
        let sideways = atm.transmittance(observer(), Vector3f::new(1.0, 0.001, 0.0).normalize());
        assert!(up[REFERENCE_BAND] > sideways[REFERENCE_BAND]);
    }

    proptest! {
        #[test]
        fn transmittance_in_unit_range(alt in 0.01 as Float..1.5) {
            let atm = Atmosphere::default();
            let dir = Vector3f::new(alt.cos(), alt.sin(), 0.0).normalize();
            let t = atm.transmittance(observer(), dir);
            for v in t.s.iter() {
                prop_assert!(*v > 0.0 && *v <= 1.0);
            }
        }

        #[test]
        fn transmittance_monotone_in_path_length(
            h in 0.0 as Float..60_000.0,
            dh in 100.0 as Float..20_000.0,
        ) {
            // Same zenith direction, deeper origin, longer path.
            let atm = Atmosphere::default();
            let up = Vector3f::new(0.0, 1.0, 0.0);
            let shallow = atm.transmittance(Vector3f::new(0.0, EARTH_RADIUS + h + dh, 0.0), up);
            let deep = atm.transmittance(Vector3f::new(0.0, EARTH_RADIUS + h, 0.0), up);
            for (d, s) in deep.s.iter().zip(shallow.s.iter()) {
                prop_assert!(d <= s);
            }
        }
    }
}
