use approx::assert_abs_diff_eq;
use nalgebra::Vector3;
use twobody::constants::GM_SUN;
use twobody::orbital_state::OrbitalState;

/// Heliocentric Earth state (JPL Horizons vectors, AU and AU/day).
pub fn earth() -> OrbitalState {
    OrbitalState::new(
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
    .unwrap()
}

/// Heliocentric Mars state at the same epoch.
pub fn mars() -> OrbitalState {
    OrbitalState::new(
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
    .unwrap()
}

pub fn assert_vec_close(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    assert_abs_diff_eq!(actual[0], expected[0], epsilon = epsilon);
    assert_abs_diff_eq!(actual[1], expected[1], epsilon = epsilon);
    assert_abs_diff_eq!(actual[2], expected[2], epsilon = epsilon);
}
