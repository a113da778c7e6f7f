//! Point source splatting

use knight_cameras::Camera;
use knight_core::film::RadianceFilm;
use knight_core::geometry::{intersect_sphere, Ray, Vector3f};
use knight_core::knight::*;
use knight_core::spectrum::{cie_bands, Spectrum, LAMBDA_STEP, SPECTRUM_BANDS};

/// Flux calibration for a magnitude zero source. Tuned so bright stars sit
/// well above the night-sky radiance floor after tone mapping.
pub const MAG0_FLUX: Float = 2.0e-5;

/// Minimum point spread standard deviation in pixels, keeping sub-pixel
/// diffraction discs visible.
pub const MIN_SIGMA_PIXELS: Float = 0.5;

/// Kernel extent in standard deviations.
pub const KERNEL_RADIUS_SIGMA: Float = 4.0;

/// Constant-altitude extinction scale in airmass units.
const EXTINCTION_TAU: Float = 0.1;

/// A star or planet to splat.
#[derive(Clone, Debug)]
pub struct PointSource {
    /// Unit direction in the horizon frame.
    pub direction: Vector3f,

    /// Visual magnitude.
    pub vmag: Float,

    /// B-V colour index.
    pub bv: Float,
}

/// Returns the effective blackbody temperature for a B-V colour index,
/// using the Ballesteros two-term inverse relation.
///
/// * `bv` - B-V colour index.
pub fn color_temperature(bv: Float) -> Float {
    4600.0 * (1.0 / (0.92 * bv + 1.7) + 1.0 / (0.92 * bv + 0.62))
}

/// Returns the definite integral of a unit 2-D Gaussian over an axis-aligned
/// box centred on the Gaussian's mean.
///
/// * `x0`, `y0` - Lower corner.
/// * `x1`, `y1` - Upper corner.
/// * `sigma`    - Standard deviation on both axes.
pub fn gaussian_box_integral(x0: Float, y0: Float, x1: Float, y1: Float, sigma: Float) -> Float {
    let norm = 1.0 / (sigma * (2.0 as Float).sqrt());
    let ix = 0.5 * (erf(x1 * norm) - erf(x0 * norm));
    let iy = 0.5 * (erf(y1 * norm) - erf(y0 * norm));
    ix * iy
}

/// Splats point sources into the film as diffraction-sized Gaussian discs.
///
/// Each source gets a blackbody spectrum for its colour temperature, scaled
/// so its integrated photopic luminance equals the flux its magnitude
/// implies. Every spectral band is spread with its own diffraction width and
/// accumulated through the cached CIE band responses, so the total deposited
/// luminance does not depend on the output resolution. Sources below the
/// horizon, behind the camera, occluded by the ground sphere or entirely off
/// frame are skipped. On cameras whose left and right edges meet, kernels
/// wrap around the seam instead of clipping.
///
/// * `sources`       - Sources to splat.
/// * `camera`        - Camera for projection and angular scale.
/// * `aperture_mm`   - Aperture diameter in millimetres.
/// * `origin`        - Observer position, planet-centred.
/// * `planet_radius` - Ground sphere radius for occlusion.
/// * `film`          - Destination film.
pub fn render_point_sources(
    sources: &[PointSource],
    camera: &dyn Camera,
    aperture_mm: Float,
    origin: Vector3f,
    planet_radius: Float,
    film: &RadianceFilm,
) {
    let (width, height) = film.resolution();
    let ppr = camera.pixels_per_radian();
    // Guard a caller handing in a degenerate aperture.
    let aperture_m = max(aperture_mm, 0.1) * 1e-3;

    // Per-band pixel-space sigma from the diffraction half-width.
    let sigmas: Vec<Float> = (0..SPECTRUM_BANDS)
        .map(|band| {
            let lambda_m = Spectrum::wavelength(band) * 1e-9;
            max(1.22 * lambda_m / aperture_m * ppr, MIN_SIGMA_PIXELS)
        })
        .collect();
    let max_radius = sigmas
        .iter()
        .fold(0.0, |acc: Float, s| acc.max(*s * KERNEL_RADIUS_SIGMA));

    let bands = cie_bands();
    let wrap_x = camera.wraps_horizontally();
    let mut splatted = 0usize;

    for source in sources {
        if source.direction.y <= 0.0 {
            continue;
        }
        if intersect_sphere(&Ray::new(origin, source.direction), planet_radius).is_some() {
            continue;
        }
        let centre = match camera.project(&source.direction) {
            Some(p) => p,
            None => continue,
        };
        if centre.y < -max_radius || centre.y >= height as Float + max_radius {
            continue;
        }
        if !wrap_x
            && (centre.x < -max_radius || centre.x >= width as Float + max_radius)
        {
            continue;
        }

        let spectrum = Spectrum::blackbody(color_temperature(source.bv));
        let luminance = spectrum.y();
        if luminance <= 0.0 {
            continue;
        }

        // Scale so that summing the splat through the CIE tables yields this
        // flux as photopic luminance, then dim by altitude extinction.
        let flux = (10.0 as Float).powf(-0.4 * source.vmag) * MAG0_FLUX;
        let extinction = (-EXTINCTION_TAU / (source.direction.y + 0.01)).exp();
        let scale = flux * extinction / luminance * LAMBDA_STEP;

        for (band, &sigma) in sigmas.iter().enumerate() {
            let energy = spectrum[band] * scale;
            if energy <= 0.0 {
                continue;
            }

            let radius = sigma * KERNEL_RADIUS_SIGMA;
            // A wrapping camera keeps the horizontal extent unclipped and
            // folds columns back into the frame instead.
            let (x_min, x_max) = if wrap_x {
                ((centre.x - radius).floor() as Int, (centre.x + radius).ceil() as Int)
            } else {
                (
                    max((centre.x - radius).floor() as Int, 0),
                    min((centre.x + radius).ceil() as Int, width as Int - 1),
                )
            };
            let y_min = max((centre.y - radius).floor() as Int, 0);
            let y_max = min((centre.y + radius).ceil() as Int, height as Int - 1);
            if x_max < x_min || y_max < y_min {
                continue;
            }

            for y in y_min..=y_max {
                for x in x_min..=x_max {
                    let w = gaussian_box_integral(
                        x as Float - centre.x,
                        y as Float - centre.y,
                        x as Float + 1.0 - centre.x,
                        y as Float + 1.0 - centre.y,
                        sigma,
                    );
                    if w > 0.0 {
                        let xi = if wrap_x {
                            x.rem_euclid(width as Int) as usize
                        } else {
                            x as usize
                        };
                        film.add_splat(xi, y as usize, bands[band] * (energy * w));
                    }
                }
            }
        }
        splatted += 1;
    }

    debug!("Splatted {} of {} point sources", splatted, sources.len());
}
