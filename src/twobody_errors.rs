use thiserror::Error;

/// Errors reported by the element derivation and the iterative solvers.
///
/// Three families, all unrecoverable at the point of detection and surfaced
/// to the caller rather than silently defaulted:
///
/// * **domain errors** — the input geometry makes the requested quantity
///   undefined ([`NonEllipticOrbit`](TwoBodyError::NonEllipticOrbit),
///   [`NearCircularOrbit`](TwoBodyError::NearCircularOrbit),
///   [`UndefinedAscendingNode`](TwoBodyError::UndefinedAscendingNode),
///   [`DegenerateTransferGeometry`](TwoBodyError::DegenerateTransferGeometry)),
/// * **convergence errors** — an iteration exceeded its bound
///   ([`NotConverged`](TwoBodyError::NotConverged)),
/// * **precondition errors** — malformed input caught before any numerics run
///   (the remaining variants).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TwoBodyError {
    #[error("orbit is not elliptic (eccentricity {0}), only elliptical orbits are supported")]
    NonEllipticOrbit(f64),

    #[error("orbit is nearly circular (eccentricity {0}), eccentricity-dependent angle is undefined")]
    NearCircularOrbit(f64),

    #[error("orbit is nearly equatorial, ascending node direction is undefined")]
    UndefinedAscendingNode,

    #[error("transfer endpoints are collinear, no transfer solution exists")]
    DegenerateTransferGeometry,

    #[error("{solver} did not converge within {iterations} iterations")]
    NotConverged {
        solver: &'static str,
        iterations: usize,
    },

    #[error("position vector has zero length")]
    ZeroLengthPosition,

    #[error("{0} vector has zero length, no direction defined")]
    ZeroLengthVector(&'static str),

    #[error("transfer time must be positive, got {0}")]
    NonPositiveTransferTime(f64),

    #[error("invalid window scan parameters: {0}")]
    InvalidScanParams(String),

    #[error("states use different gravitational parameters ({0} vs {1})")]
    MismatchedGravParameter(f64, f64),
}
