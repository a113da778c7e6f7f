//! Cameras

mod environment_camera;
mod perspective_camera;

pub use environment_camera::*;
pub use perspective_camera::*;

pub use knight_core::geometry::horizon_direction;

use knight_core::geometry::{Point2f, Ray, Vector3f};
use knight_core::knight::*;

/// Camera interface.
///
/// Cameras map pixels to world rays for the sky pass and world directions
/// back to pixel coordinates for splatting point sources.
pub trait Camera: Send + Sync {
    /// Returns the world ray through the centre of a pixel.
    ///
    /// * `x` - Pixel column.
    /// * `y` - Pixel row.
    fn generate_ray(&self, x: usize, y: usize) -> Ray;

    /// Projects a world direction to continuous pixel coordinates, or `None`
    /// when the direction is behind the camera. The result can lie outside
    /// the frame; callers clip.
    ///
    /// * `dir` - Unit direction.
    fn project(&self, dir: &Vector3f) -> Option<Point2f>;

    /// Returns the angular resolution in pixels per radian at the frame
    /// centre. Point spread sizes scale by this.
    fn pixels_per_radian(&self) -> Float;

    /// Returns true if the left and right image edges are the same sky
    /// direction, so splat kernels should wrap horizontally instead of
    /// clipping.
    fn wraps_horizontally(&self) -> bool {
        false
    }
}
