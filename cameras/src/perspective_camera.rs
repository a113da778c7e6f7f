//! Perspective camera

use crate::Camera;
use knight_core::geometry::{Point2f, Ray, Vector3f};
use knight_core::knight::*;

/// Pinhole camera with a vertical field of view.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// Camera position, planet-centred.
    pos: Vector3f,

    /// Forward basis vector.
    forward: Vector3f,

    /// Right basis vector.
    right: Vector3f,

    /// Up basis vector.
    up: Vector3f,

    /// Image width in pixels.
    width: usize,

    /// Image height in pixels.
    height: usize,

    /// Width over height.
    aspect: Float,

    /// Tangent of half the vertical field of view.
    tan_half_fov: Float,
}

impl PerspectiveCamera {
    /// Creates a new perspective camera looking along `forward`.
    ///
    /// The basis is built against world up, switching to world north as the
    /// reference when the view is close to the zenith or nadir.
    ///
    /// * `pos`     - Camera position, planet-centred.
    /// * `forward` - View direction, need not be normalized.
    /// * `fov`     - Vertical field of view in degrees.
    /// * `width`   - Image width in pixels.
    /// * `height`  - Image height in pixels.
    pub fn new(pos: Vector3f, forward: Vector3f, fov: Float, width: usize, height: usize) -> Self {
        let forward = forward.normalize();
        let world_up = if abs(forward.y) > 0.99 {
            Vector3f::new(0.0, 0.0, 1.0)
        } else {
            Vector3f::new(0.0, 1.0, 0.0)
        };
        let right = world_up.cross(&forward).normalize();
        let up = forward.cross(&right);

        Self {
            pos,
            forward,
            right,
            up,
            width,
            height,
            aspect: width as Float / height as Float,
            tan_half_fov: (radians(fov) * 0.5).tan(),
        }
    }
}

impl Camera for PerspectiveCamera {
    fn generate_ray(&self, x: usize, y: usize) -> Ray {
        // Row 0 is the top of the frame.
        let u = (2.0 * (x as Float + 0.5) / self.width as Float - 1.0)
            * self.aspect
            * self.tan_half_fov;
        let v = (1.0 - 2.0 * (y as Float + 0.5) / self.height as Float) * self.tan_half_fov;

        let d = (self.forward + self.right * u + self.up * v).normalize();
        Ray::new(self.pos, d)
    }

    fn project(&self, dir: &Vector3f) -> Option<Point2f> {
        let dz = dir.dot(&self.forward);
        if dz <= 0.0 {
            return None;
        }
        let u = dir.dot(&self.right) / dz;
        let v = dir.dot(&self.up) / dz;

        let px = (u / (self.aspect * self.tan_half_fov) + 1.0) * 0.5 * self.width as Float;
        let py = (1.0 - v / self.tan_half_fov) * 0.5 * self.height as Float;
        Some(Point2f::new(px, py))
    }

    fn pixels_per_radian(&self) -> Float {
        // Small-angle pixel pitch at the frame centre; identical on both
        // axes since the horizontal extent scales with the aspect ratio.
        self.height as Float / (2.0 * self.tan_half_fov)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(
            Vector3f::zero(),
            Vector3f::new(0.0, 0.0, 1.0),
            60.0,
            200,
            100,
        )
    }

    #[test]
    fn centre_pixel_looks_forward() {
        let cam = camera();
        let r = cam.generate_ray(100, 50);
        assert!(r.d.dot(&Vector3f::new(0.0, 0.0, 1.0)) > 0.999);
    }

    #[test]
    fn project_inverts_generate_ray() {
        let cam = camera();
        for (x, y) in [(10, 10), (100, 50), (190, 90)] {
            let r = cam.generate_ray(x, y);
            let p = cam.project(&r.d).unwrap();
            assert!(approx_eq!(Float, p.x, x as Float + 0.5, epsilon = 1e-2));
            assert!(approx_eq!(Float, p.y, y as Float + 0.5, epsilon = 1e-2));
        }
    }

    #[test]
    fn behind_camera_does_not_project() {
        let cam = camera();
        assert!(cam.project(&Vector3f::new(0.0, 0.0, -1.0)).is_none());
    }

    #[test]
    fn zenith_view_has_valid_basis() {
        let cam = PerspectiveCamera::new(
            Vector3f::zero(),
            Vector3f::new(0.0, 1.0, 0.0),
            60.0,
            100,
            100,
        );
        let r = cam.generate_ray(50, 50);
        assert!(!r.d.has_nans());
        assert!(r.d.y > 0.999);
    }
}
