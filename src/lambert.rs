//! # Lambert's problem — universal-variable two-point transfer solver
//!
//! Given two position vectors and a transfer time, find the velocity vectors
//! at departure and arrival of the conic arc connecting them. This is the
//! boundary-value counterpart of the propagation in
//! [`orbital_state`](crate::orbital_state): trajectory-design callers pick the
//! endpoints, the solver returns the velocities a spacecraft would need.
//!
//! ## Algorithm outline
//!
//! 1. Chord geometry: `cos Δθ` from the dot product; the transfer direction
//!    fixes the sign of `A = ±√(r₀·r·(1 + cos Δθ))`, with the auto mode
//!    reading the sign off the z-component of `r₀ × r` (prograde ⇒ short way).
//! 2. Seed the universal parameter at `φ = 0` with the Taylor values
//!    `C2 = 1/2`, `C3 = 1/6` and bracket it with `[−4π, 4π²]`.
//! 3. Bisect on the time of flight implied by `φ`: compute
//!    `y = r₀ + r + A·(φ·C3 − 1)/√C2`, walk the lower bracket up by `π/4`
//!    steps while `A > 0` leaves `y` negative, then
//!    `Δt(φ) = (x³·C3 + A·√y)/√GM` with `x = √(y/C2)`, narrowing the bracket
//!    until `Δt(φ)` matches the requested time to 1e-6 (absolute, in the
//!    caller's time unit). The C2/C3 functions cover `φ ≤ 0` with their
//!    hyperbolic forms, so the full bracket is usable.
//! 4. Recover the velocities from the Lagrange coefficients
//!    `f = 1 − y/r₀`, `g = A·√(y/GM)`, `ġ = 1 − y/r`.
//!
//! Degenerate geometry (collinear endpoints, where no transfer plane exists)
//! and non-convergence are reported as errors; the batch-scan caller skips
//! such grid points, a single-transfer caller aborts.
//!
//! ## References
//!
//! * Bate, Mueller & White (1971), *Fundamentals of Astrodynamics*, ch. 5
//! * Vallado (2013), *Fundamentals of Astrodynamics and Applications*, algorithm 57

use log::debug;
use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::constants::VEC_EPS;
use crate::stumpff::{c2, c3};
use crate::twobody_errors::TwoBodyError;

/// Maximum bisection iterations; the textbook cases converge in ~30.
const LAMBERT_MAX_IT: usize = 200;

/// Absolute convergence tolerance on the time of flight, in the caller's
/// time unit.
const LAMBERT_TOL: f64 = 1e-6;

/// Which way around the focus the transfer arc runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// Transfer angle below 180° (positive-A branch).
    ShortWay,
    /// Transfer angle above 180° (negative-A branch).
    LongWay,
    /// Pick the branch from the orientation of `r₀ × r`: prograde geometry
    /// (positive z-component) takes the short way.
    Auto,
}

/// Input to a Lambert solve: the transfer endpoints, the time of flight and
/// the way around.
#[derive(Debug, Clone)]
pub struct TransferProblem {
    pub r_departure: Vector3<f64>,
    pub r_arrival: Vector3<f64>,
    pub transfer_time: f64,
    pub direction: TransferDirection,
}

/// Output of a Lambert solve: the velocity vectors consistent with the
/// requested transfer, at departure and arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct LambertSolution {
    pub v_departure: Vector3<f64>,
    pub v_arrival: Vector3<f64>,
}

impl TransferProblem {
    pub fn new(
        r_departure: Vector3<f64>,
        r_arrival: Vector3<f64>,
        transfer_time: f64,
        direction: TransferDirection,
    ) -> Self {
        Self {
            r_departure,
            r_arrival,
            transfer_time,
            direction,
        }
    }

    /// Solve the transfer for the given gravitational parameter.
    ///
    /// Arguments
    /// ---------------
    /// * `gm`: gravitational parameter of the regime, in units consistent
    ///   with the endpoint vectors and the transfer time
    ///
    /// Return
    /// ----------
    /// * the departure/arrival velocities
    /// * `TwoBodyError::DegenerateTransferGeometry` for collinear endpoints
    ///   (transfer angle 0 or 180°, no unique transfer plane)
    /// * `TwoBodyError::NotConverged` if the bisection exhausts its bound
    /// * precondition errors for non-positive transfer time or zero-length
    ///   endpoints
    pub fn solve(&self, gm: f64) -> Result<LambertSolution, TwoBodyError> {
        if self.transfer_time <= 0.0 {
            return Err(TwoBodyError::NonPositiveTransferTime(self.transfer_time));
        }
        let r0_mag = self.r_departure.norm();
        let r_mag = self.r_arrival.norm();
        if r0_mag < VEC_EPS {
            return Err(TwoBodyError::ZeroLengthVector("departure position"));
        }
        if r_mag < VEC_EPS {
            return Err(TwoBodyError::ZeroLengthVector("arrival position"));
        }

        let chord_normal = self.r_departure.cross(&self.r_arrival);
        if chord_normal.norm() < VEC_EPS * r0_mag * r_mag {
            return Err(TwoBodyError::DegenerateTransferGeometry);
        }

        let cos_delta_tht = self.r_departure.dot(&self.r_arrival) / (r0_mag * r_mag);
        let multiplier = match self.direction {
            TransferDirection::ShortWay => 1.0,
            TransferDirection::LongWay => -1.0,
            TransferDirection::Auto => {
                let sin_delta_tht = chord_normal[2] / (r0_mag * r_mag);
                if sin_delta_tht >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
        };

        let a_param = multiplier * (r0_mag * r_mag * (1.0 + cos_delta_tht)).sqrt();
        if a_param.abs() < VEC_EPS {
            return Err(TwoBodyError::DegenerateTransferGeometry);
        }

        // Taylor-series values of C2/C3 at φ = 0
        let mut phi: f64 = 0.0;
        let mut c2_n: f64 = 0.5;
        let mut c3_n: f64 = 1.0 / 6.0;
        let mut phi_lower = -4.0 * PI;
        let mut phi_upper = 4.0 * PI.powi(2);

        for iteration in 0..LAMBERT_MAX_IT {
            let mut y = r0_mag + r_mag + a_param * ((phi * c3_n - 1.0) / c2_n.sqrt());
            if a_param > 0.0 && y < 0.0 {
                // non-physical intermediate value: walk the lower bracket up
                // until y turns positive
                while y < 0.0 && phi_lower < phi_upper {
                    phi_lower += PI / 4.0;
                    y = r0_mag + r_mag + a_param * ((phi_lower * c3_n - 1.0) / c2_n.sqrt());
                }
            }

            let x = (y / c2_n).sqrt();
            let dt_n = (x.powi(3) * c3_n + a_param * y.sqrt()) / gm.sqrt();

            if (self.transfer_time - dt_n).abs() < LAMBERT_TOL {
                debug!(
                    "lambert converged after {} iterations (phi = {:.6e})",
                    iteration, phi
                );
                let f = 1.0 - y / r0_mag;
                let g = a_param * (y / gm).sqrt();
                let g_dot = 1.0 - y / r_mag;
                return Ok(LambertSolution {
                    v_departure: (self.r_arrival - f * self.r_departure) / g,
                    v_arrival: (g_dot * self.r_arrival - self.r_departure) / g,
                });
            }

            if dt_n <= self.transfer_time {
                phi_lower = phi;
            } else {
                phi_upper = phi;
            }
            phi = 0.5 * (phi_lower + phi_upper);
            c2_n = c2(phi);
            c3_n = c3(phi);
        }

        Err(TwoBodyError::NotConverged {
            solver: "Lambert bisection",
            iterations: LAMBERT_MAX_IT,
        })
    }
}
