//! Render backends

use crate::scene::Scene;
use indicatif::ProgressBar;
use knight_core::film::RadianceFilm;
use knight_core::geometry::{intersect_sphere, Ray, Vector3f};
use knight_core::knight::*;
use knight_core::spectrum::{Spectrum, Xyzv};
use knight_stars::render_point_sources;
use std::thread;

/// Ground diffuse albedo.
pub const GROUND_ALBEDO: Float = 0.1;

/// Radiance floor added to ground pixels, keeping them out of the tone
/// mapper's empty-space class.
pub const GROUND_FLOOR: Float = 1.0e-8;

/// Moon angular radius in radians.
pub const MOON_ANGULAR_RADIUS: Float = 0.0045;

/// Lunar surface albedo.
pub const MOON_ALBEDO: Float = 0.12;

/// Solar disk solid angle in steradians, converting irradiance to disk
/// radiance.
pub const SUN_SOLID_ANGLE: Float = 6.8e-5;

/// View-to-disk cosine above which a ray is inside a sun or moon disk.
const DISK_COS_THRESHOLD: Float = 0.99999;

/// Rows per work tile.
const TILE_ROWS: usize = 16;

/// A sky-pass executor. Separates the per-pixel contract from how the pixels
/// are scheduled, so an accelerated implementation can slot in beside the
/// CPU one.
pub trait Backend {
    /// Renders the sky, ground and disks into the film.
    fn render_sky(&self, scene: &Scene, film: &RadianceFilm);

    /// Splats the scene's point sources into the film.
    fn render_sources(&self, scene: &Scene, aperture_mm: Float, film: &RadianceFilm);
}

/// Multi-threaded CPU backend.
pub struct Cpu {
    /// Worker thread count.
    threads: usize,
}

impl Cpu {
    /// Creates a CPU backend.
    ///
    /// * `threads` - Worker thread count, at least 1.
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }
}

impl Backend for Cpu {
    fn render_sky(&self, scene: &Scene, film: &RadianceFilm) {
        let (width, height) = film.resolution();
        let n_tiles = (height + TILE_ROWS - 1) / TILE_ROWS;
        let progress = ProgressBar::new(n_tiles as u64);

        thread::scope(|scope| {
            let (tx_worker, rx_worker) = crossbeam_channel::bounded::<usize>(self.threads);

            // Spawn worker threads.
            for _ in 0..self.threads {
                let rx_worker = rx_worker.clone();
                let progress = progress.clone();
                scope.spawn(move || {
                    for tile_idx in rx_worker.iter() {
                        let y0 = tile_idx * TILE_ROWS;
                        let y1 = min(y0 + TILE_ROWS, height);

                        let mut tile = film.tile(y0, y1);
                        for y in y0..y1 {
                            for x in 0..width {
                                let ray = scene.camera.generate_ray(x, y);
                                tile.add(x, y, shade_pixel(scene, &ray));
                            }
                        }
                        film.merge_tile(tile);
                        progress.inc(1);
                    }
                });
            }
            drop(rx_worker);

            for tile_idx in 0..n_tiles {
                tx_worker.send(tile_idx).unwrap();
            }
        });

        progress.finish_and_clear();
    }

    fn render_sources(&self, scene: &Scene, aperture_mm: Float, film: &RadianceFilm) {
        render_point_sources(
            &scene.sources,
            scene.camera.as_ref(),
            aperture_mm,
            scene.origin,
            scene.atmosphere.planet_radius,
            film,
        );
    }
}

/// Shades one view ray: in-scattered sky plus either ground or the
/// behind-the-atmosphere sources, everything distant attenuated by the view
/// path transmittance.
fn shade_pixel(scene: &Scene, ray: &Ray) -> Xyzv {
    let scatter = scene.atmosphere.in_scatter(ray, &scene.lights);
    let mut l = scatter.radiance;

    if let Some((t_ground, _)) = intersect_sphere(ray, scene.atmosphere.planet_radius) {
        let ground = ground_radiance(scene, ray.at(t_ground)) + Spectrum::constant(GROUND_FLOOR);
        l += ground.mul_spectrum(&scatter.transmittance);
    } else {
        let mut behind = knight_atmosphere::zodiacal_radiance(
            ray.d,
            scene.sun_ecl_lon_deg,
            scene.lat_deg as Float,
            scene.lmst,
        );
        if let Some(moon) = scene.moon_dir {
            if let Some(disk) = moon_disk_radiance(scene, ray.d, moon) {
                behind += disk;
            }
        }
        if scene.sun_dir.y > 0.0 && ray.d.dot(&scene.sun_dir) > DISK_COS_THRESHOLD {
            behind += scene.sun_irradiance * (1.0 / SUN_SOLID_ANGLE);
        }
        l += behind.mul_spectrum(&scatter.transmittance);
    }

    l.to_xyzv()
}

/// Lambertian ground shading at a surface point, lit directly by each sky
/// light through the transmittance query.
fn ground_radiance(scene: &Scene, p: Vector3f) -> Spectrum {
    let n = p.normalize();
    let mut radiance = Spectrum::default();
    for light in scene.lights.iter() {
        let cos = n.dot(&light.dir);
        if cos <= 0.0 {
            continue;
        }
        let t = scene.atmosphere.transmittance(p, light.dir);
        radiance += light.irradiance.mul_spectrum(&t) * (cos * GROUND_ALBEDO * INV_PI);
    }
    radiance
}

/// Radiance of the sunlit moon disk for a view direction inside it, shading
/// the disc as a Lambert sphere with a small earthshine floor.
fn moon_disk_radiance(scene: &Scene, dir: Vector3f, moon: Vector3f) -> Option<Spectrum> {
    if moon.y <= 0.0 || dir.dot(&moon) <= DISK_COS_THRESHOLD {
        return None;
    }

    // Disk-plane offset of the view direction.
    let ref_up = if abs(moon.y) > 0.99 {
        Vector3f::new(0.0, 0.0, 1.0)
    } else {
        Vector3f::new(0.0, 1.0, 0.0)
    };
    let t1 = ref_up.cross(&moon).normalize();
    let t2 = moon.cross(&t1);

    let delta = dir - moon;
    let dx = delta.dot(&t1) / MOON_ANGULAR_RADIUS;
    let dy = delta.dot(&t2) / MOON_ANGULAR_RADIUS;
    let dist2 = dx * dx + dy * dy;
    if dist2 > 1.0 {
        return None;
    }

    // Sphere normal at the intersection.
    let nz = (1.0 - dist2).sqrt();
    let n = (t1 * dx + t2 * dy + moon * nz).normalize();
    let ndotl = max(n.dot(&scene.sun_dir), 0.0) + 0.01;

    Some(scene.sun_irradiance * (MOON_ALBEDO * ndotl))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use clap::Parser;

    fn daylit_scene() -> Scene {
        // Noon on the equator puts the sun high in the sky.
        let opts = Options::parse_from([
            "knight",
            "--catalog",
            "/nonexistent/ybs.dat",
            "--lat",
            "0.0",
            "--date",
            "2026-03-20",
            "--time",
            "12.0",
            "--panorama",
            "--width",
            "16",
            "--height",
            "8",
        ]);
        Scene::build(&opts).unwrap()
    }

    #[test]
    fn sky_pass_fills_film_without_nans() {
        let scene = daylit_scene();
        let film = RadianceFilm::new(16, 8);
        Cpu::new(2).render_sky(&scene, &film);

        let pixels = film.into_pixels();
        assert!(pixels.iter().all(|p| !p.has_nans()));
        // Sky rows carry radiance.
        assert!(pixels[..16 * 4].iter().any(|p| p.y > 0.0));
    }

    #[test]
    fn ground_rows_receive_radiance() {
        let scene = daylit_scene();
        let film = RadianceFilm::new(16, 8);
        Cpu::new(1).render_sky(&scene, &film);

        // Bottom row looks near the nadir; the lit ground and its floor
        // keep every pixel strictly positive.
        let pixels = film.into_pixels();
        assert!(pixels[16 * 7..].iter().all(|p| p.y > 0.0));
    }

    #[test]
    fn moon_disk_requires_alignment() {
        let scene = daylit_scene();
        let moon = Vector3f::new(0.0, 1.0, 0.0);
        assert!(moon_disk_radiance(&scene, Vector3f::new(1.0, 0.0, 0.0), moon).is_none());
        assert!(moon_disk_radiance(&scene, moon, moon).is_some());
    }
}
