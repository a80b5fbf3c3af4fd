//! # Cartesian orbital state and element derivation
//!
//! This module defines [`OrbitalState`], the central type of the crate: a position/velocity
//! snapshot of a two-body orbit together with the gravitational parameter `GM` of its regime.
//!
//! ## Overview
//!
//! - Classical orbital elements (eccentricity, semi-major axis, inclination, node longitude,
//!   periapsis argument, anomalies) derived on demand from the stored vectors,
//! - Propagation to an arbitrary past/future time through the anomaly chain
//!   (time since periapsis → mean anomaly → Kepler solve → true anomaly),
//! - Frame utilities (perifocal-style transform of the instantaneous anomaly,
//!   radial/transverse/normal triad).
//!
//! ## Design
//!
//! An `OrbitalState` is **immutable**: every derived quantity is a pure function of
//! `(position, velocity, GM)`, and "the state at another time" is a *new* value returned by
//! [`OrbitalState::state_at_time`]. Derived elements are recomputed on each call; nothing is
//! cached.
//!
//! `GM` is threaded in at construction rather than read from a global, so states in different
//! regimes (heliocentric AU³/day², geocentric km³/s², …) coexist freely as long as each state's
//! own units are consistent.
//!
//! ## Degenerate geometry
//!
//! Calls whose result is undefined for the given geometry report a
//! [`TwoBodyError`](crate::twobody_errors::TwoBodyError) instead of letting a division by a
//! vanishing norm poison downstream results: near-circular orbits have no periapsis direction,
//! near-equatorial orbits no ascending node, and parabolic/hyperbolic orbits no finite
//! semi-major axis (only elliptical orbits are supported).

use nalgebra::{Matrix3, Vector3};

use crate::constants::{Day, Radian, DPI, ECC_EPS, PARABOLIC_EPS, VEC_EPS};
use crate::kepler::{eccentric_from_mean, eccentric_to_true, principal_angle, true_to_eccentric};
use crate::ref_system::three_one_three;
use crate::twobody_errors::TwoBodyError;

/// A two-body orbiting object at one instant: position, velocity and the
/// gravitational parameter of the attracting body.
///
/// Units are the caller's, as long as they are consistent with each other
/// (e.g. AU, days and AU³/day², or km, seconds and km³/s²).
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalState {
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    gm: f64,
}

impl OrbitalState {
    /// Build a state from an ephemeris position/velocity pair.
    ///
    /// Arguments
    /// ---------------
    /// * `position`: position vector, distance units
    /// * `velocity`: velocity vector, distance/time units
    /// * `gm`: gravitational parameter of the orbital regime, distance³/time²
    ///
    /// Return
    /// ----------
    /// * the immutable state, or `TwoBodyError::ZeroLengthPosition` when the
    ///   position norm vanishes (every element derivation divides by it)
    pub fn new(
        position: Vector3<f64>,
        velocity: Vector3<f64>,
        gm: f64,
    ) -> Result<Self, TwoBodyError> {
        if position.norm() < VEC_EPS {
            return Err(TwoBodyError::ZeroLengthPosition);
        }
        Ok(Self {
            position,
            velocity,
            gm,
        })
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    pub fn gm(&self) -> f64 {
        self.gm
    }

    /// Specific angular momentum `r × v`.
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }

    /// Eccentricity vector `(v × h)/GM − r̂`, pointing from focus to periapsis.
    pub fn eccentricity_vector(&self) -> Vector3<f64> {
        let h = self.angular_momentum();
        self.velocity.cross(&h) / self.gm - self.position.normalize()
    }

    /// Scalar eccentricity. Well-defined for every orbit, including circular
    /// ones where it is simply tiny.
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_vector().norm()
    }

    /// Specific orbital energy `v²/2 − GM/r`, negative for bound orbits.
    pub fn total_energy(&self) -> f64 {
        0.5 * self.velocity.norm_squared() - self.gm / self.position.norm()
    }

    /// Instantaneous rotation-rate vector of the radial frame, `h / r²`.
    pub fn omega(&self) -> Vector3<f64> {
        self.angular_momentum() / self.position.norm_squared()
    }

    /// Magnitude of [`OrbitalState::omega`].
    pub fn frame_rotation_rate(&self) -> f64 {
        self.omega().norm()
    }

    /// Component of the velocity along the position vector.
    pub fn radial_velocity(&self) -> Vector3<f64> {
        (self.velocity.dot(&self.position) / self.position.norm_squared()) * self.position
    }

    /// Component of the velocity normal to the position vector, `ω × r`.
    pub fn tangential_velocity(&self) -> Vector3<f64> {
        self.omega().cross(&self.position)
    }

    /// Semi-major axis `‖h‖² / (GM·(1 − e²))`.
    ///
    /// Return
    /// ----------
    /// * the semi-major axis in the caller's distance unit
    /// * `TwoBodyError::NonEllipticOrbit` when the eccentricity is parabolic
    ///   or hyperbolic (the expression has no finite elliptical value there)
    pub fn semi_major_axis(&self) -> Result<f64, TwoBodyError> {
        let ecc = self.eccentricity();
        if (ecc - 1.0).abs() < PARABOLIC_EPS || ecc > 1.0 {
            return Err(TwoBodyError::NonEllipticOrbit(ecc));
        }
        let h = self.angular_momentum().norm();
        Ok(h.powi(2) / (self.gm * (1.0 - ecc.powi(2))))
    }

    /// Semi-latus rectum `a·(1 − e²)`.
    pub fn orbital_parameter(&self) -> Result<f64, TwoBodyError> {
        let ecc = self.eccentricity();
        Ok(self.semi_major_axis()? * (1.0 - ecc.powi(2)))
    }

    /// Orbital period `2π·√(a³/GM)`.
    pub fn orbital_period(&self) -> Result<f64, TwoBodyError> {
        Ok(DPI * (self.semi_major_axis()?.powi(3) / self.gm).sqrt())
    }

    /// Inclination of the orbital plane, `arccos(h_z/‖h‖)`, in [0, π].
    pub fn inclination(&self) -> Result<Radian, TwoBodyError> {
        let h = self.angular_momentum();
        if h.norm() < VEC_EPS {
            return Err(TwoBodyError::ZeroLengthVector("angular momentum"));
        }
        Ok((h[2] / h.norm()).acos())
    }

    /// Ascending-node vector `k̂ × h`. Zero for equatorial orbits.
    pub fn ascending_node(&self) -> Vector3<f64> {
        Vector3::new(0.0, 0.0, 1.0).cross(&self.angular_momentum())
    }

    /// Longitude of the ascending node: angle of the node vector in the
    /// xy-plane, quadrant-corrected by the sign of its y-component.
    pub fn argument_of_ascending_node(&self) -> Result<Radian, TwoBodyError> {
        let n = self.ascending_node();
        if n.norm() < VEC_EPS {
            return Err(TwoBodyError::UndefinedAscendingNode);
        }
        let angle = (n[0] / n.norm()).acos();
        if n[1] >= 0.0 {
            Ok(angle)
        } else {
            Ok(DPI - angle)
        }
    }

    /// Argument of periapsis: angle between the node vector and the
    /// eccentricity vector, pushed into (π, 2π) when periapsis lies below the
    /// reference plane (negative z-component of the eccentricity vector).
    pub fn argument_of_periapsis(&self) -> Result<Radian, TwoBodyError> {
        let n = self.ascending_node();
        if n.norm() < VEC_EPS {
            return Err(TwoBodyError::UndefinedAscendingNode);
        }
        let e_vec = self.eccentricity_vector();
        if e_vec.norm() < ECC_EPS {
            return Err(TwoBodyError::NearCircularOrbit(e_vec.norm()));
        }
        let omega = (n.dot(&e_vec) / (n.norm() * e_vec.norm())).acos();
        if e_vec[2] < 0.0 {
            Ok(DPI - omega)
        } else {
            Ok(omega)
        }
    }

    /// True anomaly: angle between the eccentricity vector and the position,
    /// flipped into (π, 2π) while the object moves toward periapsis
    /// (`v·r < 0`), so the angle covers the full revolution.
    ///
    /// Return
    /// ----------
    /// * the true anomaly in [0, 2π)
    /// * `TwoBodyError::NearCircularOrbit` when no periapsis direction exists
    pub fn true_anomaly(&self) -> Result<Radian, TwoBodyError> {
        let e_vec = self.eccentricity_vector();
        if e_vec.norm() < ECC_EPS {
            return Err(TwoBodyError::NearCircularOrbit(e_vec.norm()));
        }
        let r_hat = self.position.normalize();
        let val = (e_vec.dot(&r_hat) / e_vec.norm()).clamp(-1.0, 1.0);
        if r_hat.dot(&self.velocity.normalize()) < 0.0 {
            Ok(DPI - val.acos())
        } else {
            Ok(val.acos())
        }
    }

    /// Eccentric anomaly matching [`OrbitalState::true_anomaly`], signed like
    /// [`true_to_eccentric`].
    pub fn eccentric_anomaly(&self) -> Result<Radian, TwoBodyError> {
        let t_anom = self.true_anomaly()?;
        Ok(true_to_eccentric(
            t_anom,
            self.semi_major_axis()?,
            self.eccentricity(),
        ))
    }

    /// Time elapsed since the last periapsis passage, `√(a³/GM)·(E − e·sin E)`.
    ///
    /// Signed like the eccentric anomaly: negative while the object approaches
    /// periapsis (true anomaly past apoapsis). The propagation chain consumes
    /// the signed value directly.
    pub fn time_since_periapsis(&self) -> Result<f64, TwoBodyError> {
        let e_anom = self.eccentric_anomaly()?;
        let a = self.semi_major_axis()?;
        let ecc = self.eccentricity();
        Ok((a.powi(3) / self.gm).sqrt() * (e_anom - ecc * e_anom.sin()))
    }

    /// Mean anomaly `n·t` for a time `t` measured from periapsis passage,
    /// with mean motion `n = √(GM/a³)`.
    pub fn mean_anomaly(&self, time: Day) -> Result<Radian, TwoBodyError> {
        let n = (self.gm / self.semi_major_axis()?.powi(3)).sqrt();
        Ok(n * time)
    }

    /// True anomaly after `time` has elapsed from this state.
    ///
    /// Composite of the whole anomaly chain: current time-since-periapsis,
    /// plus the requested offset, to mean anomaly, through the Kepler solve to
    /// the eccentric anomaly, converted to a true anomaly and reduced to
    /// [0, 2π). The returned value is `2π − ν`, the direction convention the
    /// frame construction in [`OrbitalState::position_at_time`] expects.
    pub fn true_anomaly_at_time(&self, time: Day) -> Result<Radian, TwoBodyError> {
        let t_peri = self.time_since_periapsis()?;
        let m_anom = self.mean_anomaly(time + t_peri)?;
        let e_anom = eccentric_from_mean(m_anom, self.eccentricity())?;
        let t_anom = principal_angle(eccentric_to_true(e_anom, self.eccentricity()));
        Ok(DPI - t_anom)
    }

    /// In-plane position at the given (direction-flipped) anomaly: the radial
    /// axis of the instantaneous frame carries the full radius.
    pub fn position_at_angle(&self, angle: Radian) -> Result<Vector3<f64>, TwoBodyError> {
        let ecc = self.eccentricity();
        let p = self.orbital_parameter()?;
        let radius = p / (1.0 + ecc * angle.cos());
        Ok(Vector3::new(radius, 0.0, 0.0))
    }

    /// In-plane velocity at the given (direction-flipped) anomaly, as
    /// radial/transverse components `GM/h·(−e·sin ν', 1 + e·cos ν', 0)`.
    pub fn velocity_at_angle(&self, angle: Radian) -> Result<Vector3<f64>, TwoBodyError> {
        let h = self.angular_momentum().norm();
        if h < VEC_EPS {
            return Err(TwoBodyError::ZeroLengthVector("angular momentum"));
        }
        let coeff = self.gm / h;
        let ecc = self.eccentricity();
        Ok(Vector3::new(
            coeff * -ecc * angle.sin(),
            coeff * (1.0 + ecc * angle.cos()),
            0.0,
        ))
    }

    /// Position vector after `time` has elapsed, in the working frame.
    ///
    /// Builds the in-plane vector at the propagated anomaly and rotates it out
    /// through the inverse of the 3-1-3 transform parameterized by
    /// `(argument_of_periapsis − true_anomaly, inclination, node longitude)` —
    /// the in-plane angle pins the frame's x-axis to the instantaneous
    /// anomaly rather than to periapsis.
    pub fn position_at_time(&self, time: Day) -> Result<Vector3<f64>, TwoBodyError> {
        let t_anom = self.true_anomaly_at_time(time)?;
        Ok(self.instantaneous_frame(t_anom)? * self.position_at_angle(t_anom)?)
    }

    /// Velocity vector after `time` has elapsed, in the working frame.
    pub fn velocity_at_time(&self, time: Day) -> Result<Vector3<f64>, TwoBodyError> {
        let t_anom = self.true_anomaly_at_time(time)?;
        Ok(self.instantaneous_frame(t_anom)? * self.velocity_at_angle(t_anom)?)
    }

    /// The state after `time` has elapsed, as a new immutable value.
    pub fn state_at_time(&self, time: Day) -> Result<Self, TwoBodyError> {
        let t_anom = self.true_anomaly_at_time(time)?;
        let rot = self.instantaneous_frame(t_anom)?;
        Self::new(
            rot * self.position_at_angle(t_anom)?,
            rot * self.velocity_at_angle(t_anom)?,
            self.gm,
        )
    }

    /// Inverse 3-1-3 transform at the given propagated anomaly (the matrix is
    /// orthonormal, so the inverse is the transpose).
    fn instantaneous_frame(&self, t_anom: Radian) -> Result<Matrix3<f64>, TwoBodyError> {
        let omega = self.argument_of_periapsis()? - t_anom;
        let inc = self.inclination()?;
        let node = self.argument_of_ascending_node()?;
        Ok(three_one_three(omega, inc, node).transpose())
    }

    /// Radial/transverse/normal triad of this state, as a rotation matrix with
    /// rows `(r̂, ĥ × r̂, ĥ)`.
    pub fn make_frame(&self) -> Result<Matrix3<f64>, TwoBodyError> {
        let h = self.angular_momentum();
        if h.norm() < VEC_EPS {
            return Err(TwoBodyError::ZeroLengthVector("angular momentum"));
        }
        let e_r = self.position.normalize();
        let e_h = h.normalize();
        let e_tht = e_h.cross(&e_r);
        Ok(Matrix3::from_rows(&[
            e_r.transpose(),
            e_tht.transpose(),
            e_h.transpose(),
        ]))
    }

    /// Distance to another state, measured after rotating both positions into
    /// **this** state's orbital frame.
    ///
    /// The frame choice cannot change the magnitude (the 3-1-3 matrix is a
    /// pure rotation), so `a.distance_to(b)` and `b.distance_to(a)` agree; the
    /// formulation is kept because the rotated difference is what the
    /// transfer-geometry callers feed into further in-frame work.
    pub fn distance_to(&self, other: &Self) -> Result<f64, TwoBodyError> {
        let t_mat = three_one_three(
            self.argument_of_periapsis()?,
            self.inclination()?,
            self.argument_of_ascending_node()?,
        );
        Ok((t_mat * other.position - t_mat * self.position).norm())
    }

    /// Angle subtended at the focus between this state's position and
    /// another's.
    pub fn angle_to(&self, other: &Self) -> Radian {
        (self.position.dot(&other.position) / (self.position.norm() * other.position.norm()))
            .clamp(-1.0, 1.0)
            .acos()
    }
}
