//! Environment camera

use crate::{horizon_direction, Camera};
use knight_core::geometry::{Point2f, Ray, Vector3f};
use knight_core::knight::*;

/// Full-sky camera mapping azimuth to the image x axis and altitude to the
/// image y axis. The top row is the zenith, the bottom row the nadir, and
/// x = 0 faces north.
#[derive(Clone, Debug)]
pub struct EnvironmentCamera {
    /// Camera position, planet-centred.
    pos: Vector3f,

    /// Image width in pixels.
    width: usize,

    /// Image height in pixels.
    height: usize,
}

impl EnvironmentCamera {
    /// Creates a new environment camera.
    ///
    /// * `pos`    - Camera position, planet-centred.
    /// * `width`  - Image width in pixels.
    /// * `height` - Image height in pixels.
    pub fn new(pos: Vector3f, width: usize, height: usize) -> Self {
        Self { pos, width, height }
    }
}

impl Camera for EnvironmentCamera {
    fn generate_ray(&self, x: usize, y: usize) -> Ray {
        let az = (x as Float + 0.5) / self.width as Float * TWO_PI;
        let alt = PI / 2.0 - (y as Float + 0.5) / self.height as Float * PI;
        Ray::new(self.pos, horizon_direction(az, alt))
    }

    fn project(&self, dir: &Vector3f) -> Option<Point2f> {
        let alt = clamp(dir.y, -1.0, 1.0).asin();
        let mut az = dir.x.atan2(dir.z);
        if az < 0.0 {
            az += TWO_PI;
        }

        let px = az / TWO_PI * self.width as Float;
        let py = (PI / 2.0 - alt) / PI * self.height as Float;
        Some(Point2f::new(px, py))
    }

    fn pixels_per_radian(&self) -> Float {
        self.width as Float / TWO_PI
    }

    fn wraps_horizontally(&self) -> bool {
        // Azimuth 0 and 360 degrees are the same column of sky.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn camera() -> EnvironmentCamera {
        EnvironmentCamera::new(Vector3f::zero(), 360, 180)
    }

    #[test]
    fn cardinal_directions_project() {
        let cam = camera();

        // North on the horizon maps to the left edge, halfway down.
        let p = cam.project(&Vector3f::new(0.0, 0.0, 1.0)).unwrap();
        assert!(approx_eq!(Float, p.x, 0.0, epsilon = 1e-4));
        assert!(approx_eq!(Float, p.y, 90.0, epsilon = 1e-4));

        // East on the horizon maps a quarter of the way across.
        let p = cam.project(&Vector3f::new(1.0, 0.0, 0.0)).unwrap();
        assert!(approx_eq!(Float, p.x, 90.0, epsilon = 1e-4));
        assert!(approx_eq!(Float, p.y, 90.0, epsilon = 1e-4));

        // The zenith maps to the top row.
        let p = cam.project(&Vector3f::new(0.0, 1.0, 0.0)).unwrap();
        assert!(approx_eq!(Float, p.y, 0.0, epsilon = 1e-4));
    }

    #[test]
    fn project_inverts_generate_ray() {
        let cam = camera();
        for (x, y) in [(0, 0), (90, 45), (359, 179)] {
            let r = cam.generate_ray(x, y);
            let p = cam.project(&r.d).unwrap();
            assert!(approx_eq!(Float, p.x, x as Float + 0.5, epsilon = 1e-2));
            assert!(approx_eq!(Float, p.y, y as Float + 0.5, epsilon = 1e-2));
        }
    }
}
