//! Rotation-matrix helpers for orbital frames.
//!
//! [`rotmt`] builds the elemental rotation about a single axis; [`three_one_three`]
//! composes the z–x–z Euler sequence `Rz(ω)·Rx(i)·Rz(θ)` used to map the working
//! (inertial) frame into an orbit-fixed frame. The matrices are direction-cosine
//! (passive) matrices: they re-express a fixed vector in the rotated frame, and
//! being orthonormal their inverse is the transpose.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::Radian;

/// Elemental active rotation by `alpha` around coordinate axis `k`
/// (0 = X, 1 = Y, 2 = Z).
///
/// The passive (frame) rotation by `alpha` is `rotmt(-alpha, k)`.
///
/// Panics on an axis index outside 0..=2; the index is a compile-site constant
/// everywhere this crate calls it.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Compose the 3-1-3 direction-cosine matrix `Rz(omega)·Rx(inc)·Rz(theta)`.
///
/// This is the standard perifocal-orientation sequence: rotate about z by
/// `theta` (ascending-node longitude), tilt about x by `inc` (inclination),
/// rotate about z by `omega` (in-plane angle). The result maps inertial
/// coordinates into the orbit-fixed frame; transpose it to go back.
///
/// Arguments
/// ---------------
/// * `omega`: in-plane rotation angle in radians
/// * `inc`: inclination in radians
/// * `theta`: ascending-node angle in radians
///
/// Return
/// ----------
/// * the 3×3 direction-cosine matrix of the composed sequence
pub fn three_one_three(omega: Radian, inc: Radian, theta: Radian) -> Matrix3<f64> {
    rotmt(-omega, 2) * rotmt(-inc, 0) * rotmt(-theta, 2)
}
