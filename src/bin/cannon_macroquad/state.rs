use cannon_sim::core::controller::FlightController;
use cannon_sim::core::kinematics::exit_speed;
use cannon_sim::core::params::LaunchParameters;
use cannon_sim::core::state::{Landing, Phase, ProjectileState};
use macroquad::prelude::*;

use crate::constants::TRAIL_CAPACITY;

pub(crate) struct AppRuntime {
    /// Slider values. The controller decides when they take effect.
    pub(crate) params: LaunchParameters,
    pub(crate) controller: FlightController,
    pub(crate) trail: Vec<Vec2>,
    pub(crate) show_preview: bool,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new() -> Self {
        let params = LaunchParameters::default();
        Self {
            params,
            controller: FlightController::new(params),
            trail: Vec::with_capacity(TRAIL_CAPACITY),
            show_preview: true,
            status_line: "Ready".to_string(),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.controller.reset();
        self.trail.clear();
        self.status_line = "Reset".to_string();
    }

    /// Records the frame's snapshot in the trail and status line.
    pub(crate) fn after_step(&mut self, projectile: ProjectileState) {
        if let Some(change) = self.controller.last_transition() {
            self.status_line = match change.to {
                Phase::InBarrel => {
                    self.trail.clear();
                    "Shot launched".to_string()
                }
                Phase::FreeFlight => format!(
                    "Left the muzzle at {:.2} m/s after {:.3} s",
                    exit_speed(self.controller.active_params()),
                    change.at_s
                ),
                Phase::Landed(Landing::Ground) => format!(
                    "Landed at x={:.2} m after {:.2} s",
                    projectile.position.x, change.at_s
                ),
                Phase::Landed(Landing::BackSlip) => {
                    "Shell stalled and slid back out of the barrel".to_string()
                }
                Phase::Idle => "Ready".to_string(),
            };
        }

        // The landing frame is included so the trail ends on the ground.
        let moved = projectile.phase.is_flying() || self.controller.last_transition().is_some();
        if moved && self.trail.len() < TRAIL_CAPACITY {
            self.trail.push(projectile.position);
        }
    }
}
