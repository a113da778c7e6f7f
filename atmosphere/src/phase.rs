//! Phase functions

use knight_core::knight::*;

/// Returns the Rayleigh phase function value.
///
/// * `cos_theta` - Cosine of the angle between the view and light directions.
pub fn phase_rayleigh(cos_theta: Float) -> Float {
    (3.0 / (16.0 * PI)) * (1.0 + cos_theta * cos_theta)
}

/// Returns the Henyey-Greenstein phase function value.
///
/// * `cos_theta` - Cosine of the angle between the view and light directions.
/// * `g`         - Asymmetry parameter.
pub fn phase_hg(cos_theta: Float, g: Float) -> Float {
    let g2 = g * g;
    let denom = 1.0 + g2 - 2.0 * g * cos_theta;
    INV_FOUR_PI * (1.0 - g2) / denom.powf(1.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn rayleigh_symmetric_forward_back() {
        assert_eq!(phase_rayleigh(0.8), phase_rayleigh(-0.8));
    }

    #[test]
    fn hg_forward_peaked_for_positive_g() {
        assert!(phase_hg(1.0, 0.8) > phase_hg(0.0, 0.8));
        assert!(phase_hg(0.0, 0.8) > phase_hg(-1.0, 0.8));
    }

    #[test]
    fn hg_zero_g_is_isotropic() {
        assert!(approx_eq!(
            Float,
            phase_hg(0.3, 0.0),
            INV_FOUR_PI,
            epsilon = 1e-6
        ));
    }

    #[test]
    fn rayleigh_integrates_to_one() {
        // Integrate over the sphere with the substitution mu = cos(theta).
        let n = 1000;
        let mut sum = 0.0;
        for i in 0..n {
            let mu = -1.0 + 2.0 * (i as Float + 0.5) / n as Float;
            sum += phase_rayleigh(mu) * (2.0 / n as Float);
        }
        sum *= TWO_PI;
        assert!(approx_eq!(Float, sum, 1.0, epsilon = 1e-3));
    }
}
