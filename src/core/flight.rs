//! Two-phase flight path: the shell rides the barrel, leaves the muzzle, and
//! falls until it drops below ground.
//!
//! Positions come from the closed forms in [`kinematics`], so advancing is
//! exact for any step size. Steps only matter for finding the instant a phase
//! boundary is crossed; that instant is refined by bisection and the rest of
//! the step is evaluated from the new phase's own clock.

use super::constants::CROSSING_BISECTION_STEPS;
use super::kinematics::{self, axial_displacement};
use super::params::LaunchParameters;
use super::state::{KinematicSample, Landing, Phase};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightPath {
    params: LaunchParameters,
    phase: Phase,
    /// Local clock of the current phase.
    phase_time_s: f32,
    /// Flight time at which the current phase began.
    phase_entry_s: f32,
    sample: KinematicSample,
}

/// Reported by [`FlightPath::advance`] whenever the phase changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
    /// Flight time of the crossing.
    pub at_s: f32,
}

/// Finds the time in `[lo, hi]` where `crossed` flips from false to true.
/// Assumes `crossed(hi)` holds; returns the earliest bracket end that does.
fn bisect_crossing(mut lo: f32, mut hi: f32, crossed: impl Fn(f32) -> bool) -> f32 {
    for _ in 0..CROSSING_BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if crossed(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}

impl FlightPath {
    /// Starts a flight with the shell at the breech. Parameters are frozen for
    /// the life of the path.
    pub fn launch(params: LaunchParameters) -> Self {
        let phase = if params.can_launch() {
            Phase::InBarrel
        } else {
            Phase::Idle
        };
        Self {
            params,
            phase,
            phase_time_s: 0.0,
            phase_entry_s: 0.0,
            sample: kinematics::sample_phase(&params, phase, 0.0),
        }
    }

    pub fn params(&self) -> &LaunchParameters {
        &self.params
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sample(&self) -> KinematicSample {
        self.sample
    }

    pub fn flight_time_s(&self) -> f32 {
        self.phase_entry_s + self.phase_time_s
    }

    pub fn phase_entry_s(&self) -> f32 {
        self.phase_entry_s
    }

    pub fn is_flying(&self) -> bool {
        self.phase.is_flying()
    }

    /// Advances the path by `dt` seconds of flight time. At most two phase
    /// changes can happen in one call (muzzle exit, then touchdown); the last
    /// one is returned.
    pub fn advance(&mut self, dt: f32) -> Option<PhaseChange> {
        if dt <= 0.0 || !self.is_flying() {
            return None;
        }
        let mut change = None;
        let mut remaining = dt;
        while remaining > 0.0 && self.is_flying() {
            let (used, next) = self.advance_within_phase(remaining);
            remaining -= used;
            if let Some(next) = next {
                change = Some(self.enter(next));
            } else {
                break;
            }
        }
        change
    }

    /// Moves the local clock forward by up to `dt`. Returns how much time was
    /// consumed and the phase to switch to if a boundary was crossed.
    fn advance_within_phase(&mut self, dt: f32) -> (f32, Option<Phase>) {
        let params = self.params;
        let start = self.phase_time_s;
        let end = start + dt;
        match self.phase {
            Phase::InBarrel => {
                let length = params.barrel_length_m;
                let displacement = |t: f32| {
                    axial_displacement(&params, kinematics::sample_in_barrel(&params, t).position)
                };
                // Displacement rises until the apex and falls after it, so each
                // crossing is searched on its own monotonic side.
                let apex = kinematics::barrel_apex_time(&params);
                let rising_end = end.min(apex.max(start));
                if displacement(rising_end) >= length {
                    let t = bisect_crossing(start, rising_end, |t| displacement(t) >= length);
                    self.settle(kinematics::sample_in_barrel(&params, t), t);
                    (t - start, Some(Phase::FreeFlight))
                } else if displacement(end) < 0.0 {
                    let t = bisect_crossing(start.max(apex), end, |t| displacement(t) < 0.0);
                    self.settle(kinematics::sample_in_barrel(&params, t), t);
                    (t - start, Some(Phase::Landed(Landing::BackSlip)))
                } else {
                    self.settle(kinematics::sample_in_barrel(&params, end), end);
                    (dt, None)
                }
            }
            Phase::FreeFlight => {
                let ground = params.ground_level_m;
                let height = |t: f32| kinematics::sample_free_flight(&params, t).position.y;
                if height(end) < ground {
                    let t = bisect_crossing(start, end, |t| height(t) < ground);
                    self.settle(kinematics::sample_free_flight(&params, t), t);
                    (t - start, Some(Phase::Landed(Landing::Ground)))
                } else {
                    self.settle(kinematics::sample_free_flight(&params, end), end);
                    (dt, None)
                }
            }
            Phase::Idle | Phase::Landed(_) => (dt, None),
        }
    }

    fn settle(&mut self, sample: KinematicSample, phase_time_s: f32) {
        self.sample = sample;
        self.phase_time_s = phase_time_s;
    }

    /// Switches phase and restarts the local clock. Landed keeps the last
    /// sample so the renderer still sees the impact velocity.
    fn enter(&mut self, next: Phase) -> PhaseChange {
        let at_s = self.flight_time_s();
        let from = self.phase;
        self.phase = next;
        self.phase_entry_s = at_s;
        self.phase_time_s = 0.0;
        if next == Phase::FreeFlight {
            self.sample = kinematics::sample_free_flight(&self.params, 0.0);
        }
        PhaseChange { from, to: next, at_s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{FIXED_STEP_S, GRAVITY_MPS2};
    use macroquad::math::vec2;
    use std::f32::consts::FRAC_PI_4;

    fn assert_close(actual: f32, expected: f32, tolerance: f32) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn scenario() -> LaunchParameters {
        LaunchParameters {
            origin: vec2(0.0, 1.0),
            angle_rad: FRAC_PI_4,
            muzzle_speed_mps: 30.0,
            barrel_length_m: 5.0,
            ..LaunchParameters::default()
        }
    }

    #[test]
    fn launch_starts_exactly_at_origin() {
        let path = FlightPath::launch(scenario());
        assert_eq!(path.phase(), Phase::InBarrel);
        assert_eq!(path.sample().position, vec2(0.0, 1.0));
        assert_eq!(path.flight_time_s(), 0.0);
    }

    #[test]
    fn launch_without_speed_stays_idle() {
        let mut path = FlightPath::launch(LaunchParameters {
            muzzle_speed_mps: 0.0,
            ..scenario()
        });
        assert_eq!(path.phase(), Phase::Idle);
        assert_eq!(path.advance(1.0), None);
        assert_eq!(path.sample().position, vec2(0.0, 1.0));
    }

    #[test]
    fn exits_barrel_at_closed_form_exit_time() {
        let params = scenario();
        let t_exit = kinematics::time_to_exit(&params).expect("shell should exit");
        let mut path = FlightPath::launch(params);

        let change = path.advance(0.5).expect("phase should change");
        assert_eq!(change.from, Phase::InBarrel);
        assert_eq!(change.to, Phase::FreeFlight);
        assert_close(change.at_s, t_exit, 1e-4);
        assert_eq!(path.phase(), Phase::FreeFlight);
        assert_close(path.phase_entry_s(), t_exit, 1e-4);
        assert_close(path.flight_time_s(), 0.5, 1e-4);

        let expected = kinematics::sample_free_flight(&params, 0.5 - t_exit);
        assert_close(path.sample().position.x, expected.position.x, 1e-3);
        assert_close(path.sample().position.y, expected.position.y, 1e-3);
    }

    #[test]
    fn barrel_displacement_never_decreases_before_exit() {
        let params = scenario();
        let mut path = FlightPath::launch(params);
        let mut last = 0.0;
        while path.phase() == Phase::InBarrel {
            path.advance(FIXED_STEP_S / 4.0);
            if path.phase() != Phase::InBarrel {
                break;
            }
            let d = axial_displacement(&params, path.sample().position);
            assert!(d >= last, "displacement went from {last} to {d}");
            assert!(d <= params.barrel_length_m);
            last = d;
        }
        assert_eq!(path.phase(), Phase::FreeFlight);
    }

    #[test]
    fn lands_on_ground_and_freezes() {
        let params = scenario();
        let mut path = FlightPath::launch(params);
        let mut landing = None;
        for _ in 0..2000 {
            if let Some(change) = path.advance(FIXED_STEP_S) {
                landing = Some(change);
            }
            if !path.is_flying() {
                break;
            }
        }
        let landing = landing.expect("shell should land");
        assert_eq!(landing.to, Phase::Landed(Landing::Ground));
        assert_close(path.sample().position.y, params.ground_level_m, 1e-2);
        assert!(path.sample().velocity.y < 0.0);
        assert_eq!(path.sample().acceleration, vec2(0.0, -GRAVITY_MPS2));

        let frozen = path.sample();
        assert_eq!(path.advance(1.0), None);
        assert_eq!(path.sample(), frozen);
    }

    #[test]
    fn one_large_step_can_exit_and_land() {
        let mut path = FlightPath::launch(scenario());
        let change = path.advance(30.0).expect("phase should change");
        assert_eq!(change.from, Phase::FreeFlight);
        assert_eq!(change.to, Phase::Landed(Landing::Ground));
    }

    #[test]
    fn stalled_shell_slips_back_out_of_the_breech() {
        let params = LaunchParameters {
            angle_rad: 0.0,
            muzzle_speed_mps: 5.0,
            barrel_length_m: 5.0,
            ..scenario()
        };
        let mut path = FlightPath::launch(params);
        let change = path.advance(5.0).expect("phase should change");

        assert_eq!(change.to, Phase::Landed(Landing::BackSlip));
        // Comes back through the breech after 2*v0/g.
        assert_close(change.at_s, 2.0 * 5.0 / GRAVITY_MPS2, 1e-3);
        assert_close(axial_displacement(&params, path.sample().position), 0.0, 1e-3);
    }
}
