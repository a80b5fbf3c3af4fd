//! Stumpff-like coefficient functions C2 and C3 of the universal variable,
//! used by the Lambert time-of-flight equation. The trigonometric form holds
//! for φ > 0 (elliptic), the hyperbolic form for φ < 0, and a short Taylor
//! series bridges the removable singularity at φ = 0.

/// Switch-over point below which |φ| is handled by the series expansions.
const SERIES_EPS: f64 = 1e-6;

/// C2(φ) = (1 − cos√φ)/φ, continued to φ ≤ 0.
pub(crate) fn c2(phi: f64) -> f64 {
    if phi > SERIES_EPS {
        (1.0 - phi.sqrt().cos()) / phi
    } else if phi < -SERIES_EPS {
        (1.0 - (-phi).sqrt().cosh()) / phi
    } else {
        0.5 - phi / 24.0 + phi * phi / 720.0
    }
}

/// C3(φ) = (√φ − sin√φ)/√φ³, continued to φ ≤ 0.
pub(crate) fn c3(phi: f64) -> f64 {
    if phi > SERIES_EPS {
        let s = phi.sqrt();
        (s - s.sin()) / s.powi(3)
    } else if phi < -SERIES_EPS {
        let s = (-phi).sqrt();
        (s.sinh() - s) / s.powi(3)
    } else {
        1.0 / 6.0 - phi / 120.0 + phi * phi / 5040.0
    }
}

#[cfg(test)]
mod stumpff_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_elliptic_branch() {
        assert_relative_eq!(c2(4.0), 0.3540367091367856, epsilon = 1e-15);
        assert_relative_eq!(c3(4.0), 0.1363378216467898, epsilon = 1e-15);
        // φ = π²: one full revolution, C2 = 2/π², C3 = 1/π²
        let pi2 = std::f64::consts::PI.powi(2);
        assert_relative_eq!(c2(pi2), 2.0 / pi2, epsilon = 1e-14);
        assert_relative_eq!(c3(pi2), 1.0 / pi2, epsilon = 1e-14);
    }

    #[test]
    fn test_hyperbolic_branch() {
        assert_relative_eq!(c2(-4.0), 0.6905489227709078, epsilon = 1e-15);
        assert_relative_eq!(c3(-4.0), 0.20335755098087738, epsilon = 1e-15);
        assert_relative_eq!(c2(-16.0), 1.6442645522510304, epsilon = 1e-15);
        assert_relative_eq!(c3(-16.0), 0.3639049562051211, epsilon = 1e-15);
    }

    #[test]
    fn test_series_at_origin() {
        assert_eq!(c2(0.0), 0.5);
        assert_eq!(c3(0.0), 1.0 / 6.0);

        // series and closed forms agree across the switch-over
        for phi in [1e-8f64, -1e-8, 9e-7, -9e-7] {
            let exact_c2 = if phi >= 0.0 {
                (1.0 - phi.sqrt().cos()) / phi
            } else {
                (1.0 - (-phi).sqrt().cosh()) / phi
            };
            // the closed form loses ~8 digits to cancellation this close to 0
            assert!((c2(phi) - exact_c2).abs() < 1e-8, "c2 mismatch at {phi}");
        }
    }
}
