//! # Constants and type definitions for twobody
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `twobody` library.
//!
//! ## Overview
//!
//! - Gravitational parameters of the supported orbital regimes
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, AU ↔ km)
//! - Numerical thresholds shared by the element derivation and the solvers
//! - Core type aliases used across the crate
//!
//! Gravitational parameters are plain values deliberately: every
//! [`OrbitalState`](crate::orbital_state::OrbitalState) and every Lambert solve receives its `GM`
//! explicitly, so the constants below are starting points for callers, not process-wide state.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Heliocentric gravitational parameter, AU³/day²
pub const GM_SUN: f64 = 2.963092749241593e-4;

/// Geocentric gravitational parameter, AU³/day²
pub const GM_EARTH: f64 = 8.887692546888129e-10;

/// Areocentric gravitational parameter, AU³/day²
pub const GM_MARS: f64 = 9.54953192489925e-11;

/// Geocentric gravitational parameter, km³/s² (WGS84), for callers working in km and seconds
pub const GM_EARTH_KM3_S2: f64 = 398_600.4418;

// -------------------------------------------------------------------------------------------------
// Numerical thresholds
// -------------------------------------------------------------------------------------------------

/// Below this eccentricity the orbit is treated as circular and
/// eccentricity-dependent angles are undefined
pub const ECC_EPS: f64 = 1e-10;

/// Half-width of the eccentricity band around 1 treated as parabolic
pub const PARABOLIC_EPS: f64 = 1e-9;

/// Norm below which a vector no longer defines a direction
pub const VEC_EPS: f64 = 1e-12;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Time interval in days
pub type Day = f64;
/// Julian date (days since 4713 BC January 1, 12:00)
pub type JulianDate = f64;
