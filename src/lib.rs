pub mod constants;
pub mod kepler;
pub mod keplerian_element;
pub mod lambert;
pub mod orbital_state;
pub mod ref_system;
mod stumpff;
pub mod time;
pub mod transfer_window;
pub mod twobody_errors;
