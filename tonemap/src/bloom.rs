//! Bloom

use knight_core::knight::*;
use knight_core::spectrum::Xyzv;

/// Photopic luminance above which a pixel blooms. Keeps the sky gradient
/// itself from glowing.
pub const BLOOM_THRESHOLD: Float = 0.01;

/// Fraction of a blooming pixel's energy moved into its neighbourhood.
pub const BLOOM_SPREAD: Float = 0.15;

/// Kernel extent in standard deviations.
const BLOOM_RADIUS_SIGMA: Float = 3.0;

/// Redistributes a fraction of every bright pixel's energy into a Gaussian
/// neighbourhood sized in degrees on the sky. The pass reads from a frozen
/// snapshot so bloom never cascades through itself, and the spread fraction
/// is subtracted from the source pixel so total energy is conserved (up to
/// kernel clipping at the frame edge).
///
/// * `pixels`         - Radiance buffer, row-major.
/// * `width`          - Buffer width in pixels.
/// * `height`         - Buffer height in pixels.
/// * `bloom_size_deg` - Bloom standard deviation in degrees.
/// * `fov_deg`        - Horizontal field of view in degrees.
pub fn apply_bloom(
    pixels: &mut [Xyzv],
    width: usize,
    height: usize,
    bloom_size_deg: Float,
    fov_deg: Float,
) {
    if bloom_size_deg <= 0.0 || fov_deg <= 0.0 {
        return;
    }
    let sigma = max(bloom_size_deg / fov_deg * width as Float, 0.5);
    let radius = (sigma * BLOOM_RADIUS_SIGMA).ceil() as Int;

    // Normalized kernel over the neighbourhood, centre excluded.
    let inv_2s2 = 1.0 / (2.0 * sigma * sigma);
    let mut weights = vec![];
    let mut total = 0.0;
    for ky in -radius..=radius {
        for kx in -radius..=radius {
            if kx == 0 && ky == 0 {
                continue;
            }
            let w = (-((kx * kx + ky * ky) as Float) * inv_2s2).exp();
            weights.push((kx, ky, w));
            total += w;
        }
    }
    if total <= 0.0 {
        return;
    }
    for (_, _, w) in weights.iter_mut() {
        *w /= total;
    }

    let snapshot = pixels.to_vec();
    for y in 0..height as Int {
        for x in 0..width as Int {
            let p = snapshot[(y * width as Int + x) as usize];
            if p.y < BLOOM_THRESHOLD {
                continue;
            }

            let moved = p * BLOOM_SPREAD;
            pixels[(y * width as Int + x) as usize] += moved * -1.0;

            for &(kx, ky, w) in weights.iter() {
                let nx = x + kx;
                let ny = y + ky;
                if nx >= 0 && nx < width as Int && ny >= 0 && ny < height as Int {
                    pixels[(ny * width as Int + nx) as usize] += moved * w;
                }
            }
        }
    }
}
