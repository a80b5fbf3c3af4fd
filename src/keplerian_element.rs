use crate::constants::Radian;
use crate::kepler::principal_angle;
use crate::orbital_state::OrbitalState;
use crate::twobody_errors::TwoBodyError;

/// Keplerian orbital elements
/// Units:
/// * `semi_major_axis`: caller's distance unit
/// * `eccentricity`: unitless
/// * `inclination`: radians
/// * `ascending_node_longitude`: radians
/// * `periapsis_argument`: radians
/// * `true_anomaly`: radians
/// * `mean_anomaly`: radians
#[derive(Debug, Clone, PartialEq)]
pub struct KeplerianElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub true_anomaly: Radian,
    pub mean_anomaly: Radian,
}

impl KeplerianElements {
    /// Derive the full element set from a Cartesian state in one call.
    ///
    /// Arguments
    /// ---------------
    /// * `state`: the orbital state to summarize
    ///
    /// Return
    /// ----------
    /// * the element set, with angles reduced to [0, 2π)
    /// * any [`TwoBodyError`] of the underlying derivations (near-circular,
    ///   near-equatorial and non-elliptic orbits have undefined angles)
    pub fn from_state(state: &OrbitalState) -> Result<Self, TwoBodyError> {
        let eccentricity = state.eccentricity();
        let e_anom = state.eccentric_anomaly()?;
        Ok(Self {
            semi_major_axis: state.semi_major_axis()?,
            eccentricity,
            inclination: state.inclination()?,
            ascending_node_longitude: state.argument_of_ascending_node()?,
            periapsis_argument: state.argument_of_periapsis()?,
            true_anomaly: state.true_anomaly()?,
            mean_anomaly: principal_angle(e_anom - eccentricity * e_anom.sin()),
        })
    }
}

#[cfg(test)]
mod keplerian_element_test {
    use super::*;
    use crate::constants::GM_SUN;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_elements_from_state() {
        let earth = OrbitalState::new(
            Vector3::new(
                -9.461495867803592e-1,
                2.827386520764219e-1,
                -1.082702427768024e-4,
            ),
            Vector3::new(
                -5.189853346265090e-3,
                -1.654674749332120e-2,
                5.062030407932107e-7,
            ),
            GM_SUN,
        )
        .unwrap();

        let elements = KeplerianElements::from_state(&earth).unwrap();
        assert_relative_eq!(elements.semi_major_axis, 0.989691616066969, epsilon = 1e-12);
        assert_relative_eq!(elements.eccentricity, 0.013727223824604121, epsilon = 1e-12);
        assert_relative_eq!(elements.inclination, 0.00011385273635434903, epsilon = 1e-12);
        assert_relative_eq!(
            elements.ascending_node_longitude,
            4.1491778854462,
            epsilon = 1e-11
        );
        assert_relative_eq!(
            elements.periapsis_argument,
            3.5634902226050307,
            epsilon = 1e-11
        );
        assert_relative_eq!(elements.true_anomaly, 1.4217260482696232, epsilon = 1e-11);
        assert_relative_eq!(elements.mean_anomaly, 1.3946183714661262, epsilon = 1e-11);
    }

    #[test]
    fn test_mean_anomaly_wraps_past_apoapsis() {
        let mars = OrbitalState::new(
            Vector3::new(
                -3.914741740463327e-1,
                -1.436094702371459e0,
                -2.047823201895446e-2,
            ),
            Vector3::new(
                1.401859610775295e-2,
                -2.508557862682466e-3,
                -3.971649629870528e-4,
            ),
            GM_SUN,
        )
        .unwrap();

        let elements = KeplerianElements::from_state(&mars).unwrap();
        // the signed eccentric anomaly is negative here; the mean anomaly
        // comes back reduced to [0, 2π)
        assert_relative_eq!(elements.mean_anomaly, 5.020082249834461, epsilon = 1e-11);
    }
}
