use crate::constants::DPI;
use crate::twobody_errors::TwoBodyError;

/// Maximum Newton iterations for Kepler's equation. Moderate eccentricities
/// converge in under 20 iterations, e ≈ 0.9 in ~40; hitting this bound is
/// reported as [`TwoBodyError::NotConverged`].
const KEPLER_MAX_IT: usize = 100;

/// Absolute tolerance on successive Newton iterates.
const KEPLER_TOL: f64 = 1e-12;

/// Return the principal value of an angle in radians, reduced to [0, 2π).
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Solve Kepler's equation `E - e·sin(E) = M` for the eccentric anomaly.
///
/// Newton–Raphson iteration on `f(E) = E - e·sin(E) - M`, seeded at `E₀ = 0`,
/// stopping when successive iterates differ by less than 1e-12. The mean
/// anomaly is not reduced first, so values outside [0, 2π) resolve to the
/// eccentric anomaly on the same revolution.
///
/// Arguments
/// ---------------
/// * `mean_anomaly`: mean anomaly in radians (any revolution, may be negative)
/// * `eccentricity`: orbit eccentricity, must lie in [0, 1)
///
/// Return
/// ----------
/// * the eccentric anomaly in radians, on the same revolution as the input
/// * `TwoBodyError::NonEllipticOrbit` for eccentricities outside [0, 1)
/// * `TwoBodyError::NotConverged` if the iteration bound is exhausted
pub fn eccentric_from_mean(mean_anomaly: f64, eccentricity: f64) -> Result<f64, TwoBodyError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(TwoBodyError::NonEllipticOrbit(eccentricity));
    }

    let kep = |e: f64| e - eccentricity * e.sin() - mean_anomaly;
    let kep_d = |e: f64| 1.0 - eccentricity * e.cos();

    let mut e_prev = 0.0;
    let mut e_next = e_prev - kep(e_prev) / kep_d(e_prev);
    for _ in 0..KEPLER_MAX_IT {
        if (e_next - e_prev).abs() < KEPLER_TOL {
            return Ok(e_next);
        }
        e_prev = e_next;
        e_next = e_prev - kep(e_prev) / kep_d(e_prev);
    }

    Err(TwoBodyError::NotConverged {
        solver: "Kepler Newton iteration",
        iterations: KEPLER_MAX_IT,
    })
}

/// Convert an eccentric anomaly to the true anomaly on the same revolution.
///
/// Uses the half-angle form `ν = 2·atan(√((1+e)/(1−e))·tan(E/2))`, which keeps
/// the quadrant of `E` (the arccosine form does not).
pub fn eccentric_to_true(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let ratio = ((1.0 + eccentricity) / (1.0 - eccentricity)).sqrt();
    2.0 * (ratio * (eccentric_anomaly / 2.0).tan()).atan()
}

/// Convert a true anomaly to the eccentric anomaly.
///
/// Works through the in-plane position on the ellipse (radius against the
/// semi-minor axis) and recovers the quadrant with `atan2`, so the result is
/// signed: anomalies past apoapsis come back in (−π, 0).
///
/// Arguments
/// ---------------
/// * `true_anomaly`: true anomaly in radians
/// * `semi_major_axis`: semi-major axis, any length unit
/// * `eccentricity`: orbit eccentricity, must lie in [0, 1)
pub fn true_to_eccentric(true_anomaly: f64, semi_major_axis: f64, eccentricity: f64) -> f64 {
    let a = semi_major_axis;
    let e = eccentricity;
    let b = a * (1.0 - e.powi(2)).sqrt();
    let p = a * (1.0 - e.powi(2));
    let r = p / (1.0 + e * true_anomaly.cos());
    let c = (a * e + r * true_anomaly.cos()) / a;
    let s = (r / b) * true_anomaly.sin();
    s.atan2(c)
}
