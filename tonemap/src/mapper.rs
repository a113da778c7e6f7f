//! Night vision tone mapper

use knight_core::knight::*;
use knight_core::spectrum::{xyz_to_srgb, Xyzv};

/// Extended Reinhard white point. Luminances at or above this map to full
/// white.
pub const WHITE_POINT: Float = 2.0;

/// Chromaticity the image shifts towards as rod vision takes over.
pub const SCOTOPIC_CHROMA: (Float, Float) = (0.25, 0.25);

/// Scotopic-to-photopic luminance weight in the mesopic blend.
pub const SCOTOPIC_WEIGHT: Float = 0.4468;

/// Pixels at or below this photopic luminance are treated as empty space and
/// excluded from the exposure estimate.
pub const LUMINANCE_FLOOR: Float = 1e-9;

/// Log-luminance range, in decades, over which rods hand off to cones.
pub const MESOPIC_RANGE: (Float, Float) = (-2.0, 0.6);

/// Returns the log-average photopic luminance of a buffer, ignoring pixels
/// at or below the noise floor. Returns zero for an empty buffer.
///
/// * `pixels` - Radiance buffer.
pub fn log_average_luminance(pixels: &[Xyzv]) -> Float {
    let mut sum = 0.0;
    let mut count = 0;
    for p in pixels {
        if p.y > LUMINANCE_FLOOR {
            sum += p.y.ln();
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        (sum / count as Float).exp()
    }
}

/// Returns the scene key for a log-average luminance, lower for darker
/// scenes, shifted by an exposure boost in stops.
///
/// * `log_avg`     - Log-average luminance.
/// * `boost_stops` - Exposure adjustment in stops.
pub fn scene_key(log_avg: Float, boost_stops: Float) -> Float {
    let key = 1.03 - 2.0 / (2.0 + (log_avg + 1.0).log10());
    key * (2.0 as Float).powf(boost_stops)
}

/// Applies the extended Reinhard operator to a scaled luminance.
fn reinhard(l: Float, white: Float) -> Float {
    l * (1.0 + l / (white * white)) / (1.0 + l)
}

/// Blends a pixel's chromaticity and luminance between photopic and
/// scotopic response. Returns the Purkinje-shifted pixel; the scotopic
/// channel carries the blended luminance for downstream compression.
fn mesopic_shift(p: &Xyzv) -> Xyzv {
    let s = smoothstep(MESOPIC_RANGE.0, MESOPIC_RANGE.1, p.y.log10());

    let (x, y) = p.chromaticity();
    let x_new = (1.0 - s) * SCOTOPIC_CHROMA.0 + s * x;
    let y_new = max((1.0 - s) * SCOTOPIC_CHROMA.1 + s * y, 1e-4);

    let y_mixed = SCOTOPIC_WEIGHT * (1.0 - s) * p.v + s * p.y;
    Xyzv::from_chromaticity(x_new, y_new, y_mixed, y_mixed)
}

/// Reduces a radiance buffer to gamma-encoded RGB in [0, 1].
///
/// * `pixels`      - Radiance buffer.
/// * `boost_stops` - Exposure adjustment in stops.
pub fn tone_map(pixels: &[Xyzv], boost_stops: Float) -> Vec<[Float; 3]> {
    let log_avg = log_average_luminance(pixels);
    let key = scene_key(log_avg, boost_stops);
    let scale = if log_avg > 0.0 { key / log_avg } else { 0.0 };

    pixels
        .iter()
        .map(|p| {
            if p.y <= LUMINANCE_FLOOR {
                return [0.0, 0.0, 0.0];
            }

            let shifted = mesopic_shift(p);

            let l = shifted.y * scale;
            let ld = reinhard(l, WHITE_POINT);
            let ratio = if shifted.y > 0.0 { ld / shifted.y } else { 0.0 };

            let rgb = xyz_to_srgb([
                shifted.x * ratio,
                shifted.y * ratio,
                shifted.z * ratio,
            ]);
            rgb.map(|c| clamp(c, 0.0, 1.0).powf(1.0 / 2.2))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn zero_buffer_maps_to_black() {
        let pixels = vec![Xyzv::default(); 16];
        let rgb = tone_map(&pixels, 0.0);
        assert!(rgb.iter().all(|p| *p == [0.0, 0.0, 0.0]));
    }

    #[test]
    fn monotonic_in_luminance() {
        // Two grey pixels, one strictly brighter. The brighter one must not
        // come out darker.
        let dim = Xyzv::new(0.01, 0.01, 0.01, 0.01);
        let bright = Xyzv::new(0.1, 0.1, 0.1, 0.1);
        let rgb = tone_map(&[dim, bright], 0.0);
        assert!(rgb[1][1] >= rgb[0][1]);
    }

    #[test]
    fn output_stays_in_unit_range() {
        let pixels = vec![
            Xyzv::new(1e3, 1e3, 1e3, 1e3),
            Xyzv::new(1e-6, 1e-6, 1e-6, 1e-6),
            Xyzv::new(0.3, 0.5, 0.9, 0.2),
        ];
        for p in tone_map(&pixels, 2.0) {
            for c in p {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }

    #[test]
    fn key_darkens_with_dim_scenes() {
        assert!(scene_key(0.001, 0.0) < scene_key(10.0, 0.0));
    }

    #[test]
    fn boost_doubles_key_per_stop() {
        let base = scene_key(0.1, 0.0);
        assert!(approx_eq!(Float, scene_key(0.1, 1.0), 2.0 * base, epsilon = 1e-5));
    }

    #[test]
    fn dim_pixels_shift_blue() {
        // Deep in the scotopic regime chromaticity lands on the rod point.
        let p = Xyzv::new(1e-4, 1e-4, 1e-4, 1e-4);
        let shifted = mesopic_shift(&p);
        let (x, y) = shifted.chromaticity();
        assert!(approx_eq!(Float, x, SCOTOPIC_CHROMA.0, epsilon = 0.02));
        assert!(approx_eq!(Float, y, SCOTOPIC_CHROMA.1, epsilon = 0.02));
    }

    proptest! {
        #[test]
        fn brighter_grey_never_maps_darker(
            y in 1e-4 as Float..10.0,
            factor in 2.0 as Float..100.0,
        ) {
            let dim = Xyzv::new(y, y, y, y);
            let yb = y * factor;
            let bright = Xyzv::new(yb, yb, yb, yb);
            let rgb = tone_map(&[dim, bright], 0.0);
            prop_assert!(rgb[1][1] >= rgb[0][1]);
        }
    }
}
