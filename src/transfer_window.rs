//! # Transfer-window scanning
//!
//! Grid search over candidate transfer times: for each cell the target is
//! propagated to its arrival position, a Lambert problem is solved against it,
//! and the velocity increments relative to the departure and target bodies are
//! recorded. A minimum-departure-speed reduction over the grid picks the
//! cheapest launch opportunity.
//!
//! Grid cells whose Lambert solve (or target propagation) fails are skipped
//! and logged at debug level — a missing cell is a property of that geometry,
//! not of the scan. Each cell is independent of every other, so callers
//! needing throughput can partition the time range and merge the per-range
//! minima.

use itertools::Itertools;
use log::debug;

use crate::lambert::{LambertSolution, TransferDirection, TransferProblem};
use crate::orbital_state::OrbitalState;
use crate::twobody_errors::TwoBodyError;

/// Validated parameters of a window scan.
///
/// `t_min`/`t_max`/`step` are transfer times in the states' time unit; the
/// grid runs from `t_min` to at most `t_max` inclusive in `step` increments.
#[derive(Debug, Clone)]
pub struct WindowScanParams {
    t_min: f64,
    t_max: f64,
    step: f64,
    direction: TransferDirection,
}

impl WindowScanParams {
    /// Validate and build scan parameters.
    ///
    /// Return
    /// ----------
    /// * `TwoBodyError::InvalidScanParams` when the range is empty, the step
    ///   is non-positive or the earliest transfer time is non-positive
    pub fn new(
        t_min: f64,
        t_max: f64,
        step: f64,
        direction: TransferDirection,
    ) -> Result<Self, TwoBodyError> {
        if t_min <= 0.0 {
            return Err(TwoBodyError::InvalidScanParams(format!(
                "earliest transfer time must be positive, got {t_min}"
            )));
        }
        if t_max < t_min {
            return Err(TwoBodyError::InvalidScanParams(format!(
                "empty time range [{t_min}, {t_max}]"
            )));
        }
        if step <= 0.0 {
            return Err(TwoBodyError::InvalidScanParams(format!(
                "step must be positive, got {step}"
            )));
        }
        Ok(Self {
            t_min,
            t_max,
            step,
            direction,
        })
    }

    fn grid(&self) -> impl Iterator<Item = f64> + '_ {
        let cells = ((self.t_max - self.t_min) / self.step).floor() as usize;
        (0..=cells).map(move |i| self.t_min + i as f64 * self.step)
    }
}

/// One feasible cell of a window scan.
#[derive(Debug, Clone)]
pub struct TransferOpportunity {
    /// Transfer time of this grid cell.
    pub transfer_time: f64,
    /// The Lambert velocities of the transfer arc.
    pub solution: LambertSolution,
    /// Speed relative to the departure body at departure.
    pub departure_speed: f64,
    /// Speed relative to the target body at arrival.
    pub arrival_speed: f64,
}

/// Sweep the transfer-time grid from `departure`'s current position to
/// `target`'s propagated position.
///
/// Arguments
/// ---------------
/// * `departure`: state of the departure body at the departure epoch
/// * `target`: state of the target body at the same epoch
/// * `params`: validated grid description
///
/// Return
/// ----------
/// * the feasible opportunities, in grid order (infeasible cells are skipped)
/// * `TwoBodyError::MismatchedGravParameter` when the two states do not share
///   an orbital regime
pub fn scan(
    departure: &OrbitalState,
    target: &OrbitalState,
    params: &WindowScanParams,
) -> Result<Vec<TransferOpportunity>, TwoBodyError> {
    if departure.gm() != target.gm() {
        return Err(TwoBodyError::MismatchedGravParameter(
            departure.gm(),
            target.gm(),
        ));
    }
    let gm = departure.gm();

    let mut opportunities = Vec::new();
    for transfer_time in params.grid() {
        let arrival = match target.state_at_time(transfer_time) {
            Ok(state) => state,
            Err(err) => {
                debug!("skipping transfer time {transfer_time}: target propagation failed ({err})");
                continue;
            }
        };

        let problem = TransferProblem::new(
            departure.position(),
            arrival.position(),
            transfer_time,
            params.direction,
        );
        let solution = match problem.solve(gm) {
            Ok(solution) => solution,
            Err(err) => {
                debug!("skipping transfer time {transfer_time}: {err}");
                continue;
            }
        };

        let departure_speed = (solution.v_departure - departure.velocity()).norm();
        let arrival_speed = (solution.v_arrival - arrival.velocity()).norm();
        opportunities.push(TransferOpportunity {
            transfer_time,
            solution,
            departure_speed,
            arrival_speed,
        });
    }

    Ok(opportunities)
}

/// Minimum-reduction over a scan result: the opportunity with the smallest
/// departure speed, or `None` for an empty scan.
pub fn best_opportunity(opportunities: &[TransferOpportunity]) -> Option<&TransferOpportunity> {
    opportunities
        .iter()
        .position_min_by(|a, b| a.departure_speed.total_cmp(&b.departure_speed))
        .map(|index| &opportunities[index])
}

#[cfg(test)]
mod transfer_window_test {
    use super::*;
    use crate::constants::{GM_EARTH, GM_SUN};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn earth() -> OrbitalState {
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

    fn mars() -> OrbitalState {
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

    #[test]
    fn test_earth_mars_window() {
        let params = WindowScanParams::new(30.0, 500.0, 1.0, TransferDirection::Auto).unwrap();
        let opportunities = scan(&earth(), &mars(), &params).unwrap();
        // every cell of this geometry is feasible
        assert_eq!(opportunities.len(), 471);

        let best = best_opportunity(&opportunities).unwrap();
        assert_eq!(best.transfer_time, 239.0);
        assert_relative_eq!(best.departure_speed, 0.005020166261614981, epsilon = 1e-9);
        assert_relative_eq!(best.arrival_speed, 0.0025151589780843535, epsilon = 1e-9);
    }

    #[test]
    fn test_single_cell_fixture() {
        let params = WindowScanParams::new(210.0, 210.0, 1.0, TransferDirection::Auto).unwrap();
        let opportunities = scan(&earth(), &mars(), &params).unwrap();
        assert_eq!(opportunities.len(), 1);
        assert_relative_eq!(
            opportunities[0].departure_speed,
            0.00523519779552033,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            opportunities[0].arrival_speed,
            0.0032316077711784454,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_rejects_mismatched_regimes() {
        let mars = mars();
        let target = OrbitalState::new(mars.position(), mars.velocity(), GM_EARTH).unwrap();
        let params = WindowScanParams::new(30.0, 40.0, 1.0, TransferDirection::Auto).unwrap();
        assert!(matches!(
            scan(&earth(), &target, &params),
            Err(TwoBodyError::MismatchedGravParameter(_, _))
        ));
    }

    #[test]
    fn test_params_validation() {
        assert!(WindowScanParams::new(0.0, 10.0, 1.0, TransferDirection::Auto).is_err());
        assert!(WindowScanParams::new(10.0, 5.0, 1.0, TransferDirection::Auto).is_err());
        assert!(WindowScanParams::new(10.0, 20.0, 0.0, TransferDirection::Auto).is_err());
    }

    #[test]
    fn test_empty_scan_has_no_best() {
        assert!(best_opportunity(&[]).is_none());
    }
}
