//! Per-frame driver for a single cannon.
//!
//! The UI hands over its current parameters, the frame time, and whether the
//! launch button went down this frame. The controller decides whether the
//! edit is allowed, advances the active flight in fixed sub-steps, and keeps
//! the predicted arc in sync with the accepted parameters.

use macroquad::math::Vec2;

use super::constants::{
    FIXED_STEP_S, MAX_FRAME_DT_S, MAX_SUBSTEPS_PER_FRAME, TRAJECTORY_SAMPLE_INTERVAL_S,
};
use super::flight::{FlightPath, PhaseChange};
use super::kinematics;
use super::params::LaunchParameters;
use super::state::{Landing, Phase, ProjectileState};
use super::trajectory::{SamplingConfig, Trajectory};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightConfig {
    pub fixed_step_s: f32,
    pub max_frame_dt_s: f32,
    pub sampling: SamplingConfig,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            fixed_step_s: FIXED_STEP_S,
            max_frame_dt_s: MAX_FRAME_DT_S,
            sampling: SamplingConfig::default(),
        }
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl FlightConfig {
    /// Replaces unusable timing values with the defaults. The sub-step is
    /// floored so one frame never needs more than `MAX_SUBSTEPS_PER_FRAME`
    /// iterations.
    pub fn sanitized(self) -> Self {
        let max_frame_dt_s = positive_or(self.max_frame_dt_s, MAX_FRAME_DT_S);
        let fixed_step_s = positive_or(self.fixed_step_s, FIXED_STEP_S)
            .max(max_frame_dt_s / MAX_SUBSTEPS_PER_FRAME);
        Self {
            fixed_step_s,
            max_frame_dt_s,
            sampling: SamplingConfig {
                interval_s: positive_or(self.sampling.interval_s, TRAJECTORY_SAMPLE_INTERVAL_S),
                ..self.sampling
            },
        }
    }
}

pub struct FlightController {
    config: FlightConfig,
    params: LaunchParameters,
    clock_s: f32,
    launch_time_s: f32,
    path: Option<FlightPath>,
    state: ProjectileState,
    prediction: Trajectory,
    transition: Option<PhaseChange>,
}

fn sanitize_frame_dt(delta_time_s: f32, max_frame_dt_s: f32) -> f32 {
    if delta_time_s.is_finite() {
        delta_time_s.clamp(0.0, max_frame_dt_s)
    } else {
        0.0
    }
}

impl FlightController {
    pub fn new(params: LaunchParameters) -> Self {
        Self::with_config(params, FlightConfig::default())
    }

    pub fn with_config(params: LaunchParameters, config: FlightConfig) -> Self {
        let config = config.sanitized();
        let params = params.clamped();
        let mut prediction = Trajectory::with_capacity(config.sampling.max_samples);
        prediction.resample(&params, config.sampling.interval_s);
        Self {
            config,
            params,
            clock_s: 0.0,
            launch_time_s: 0.0,
            path: None,
            state: ProjectileState::idle(params.origin),
            prediction,
            transition: None,
        }
    }

    /// Runs one frame and returns the projectile snapshot to draw.
    pub fn step(
        &mut self,
        params: &LaunchParameters,
        delta_time_s: f32,
        launch_requested: bool,
    ) -> ProjectileState {
        self.transition = None;
        let params = params.clamped();
        // Playback rate stays live during flight; it does not alter the path.
        self.params.time_scale = params.time_scale;

        if self.accepts_edits() {
            self.accept(params);
            if launch_requested {
                self.launch();
                return self.state;
            }
        }

        let frame_dt = sanitize_frame_dt(
            delta_time_s * self.params.time_scale,
            self.config.max_frame_dt_s,
        );
        self.clock_s += frame_dt;
        self.advance(frame_dt);
        self.state
    }

    /// Drops any flight in progress and parks the shell back at the breech.
    pub fn reset(&mut self) {
        self.path = None;
        self.transition = None;
        self.state = ProjectileState::idle(self.params.origin);
    }

    pub fn state(&self) -> &ProjectileState {
        &self.state
    }

    pub fn prediction(&self) -> &Trajectory {
        &self.prediction
    }

    /// Parameters of the current (or last) flight.
    pub fn active_params(&self) -> &LaunchParameters {
        &self.params
    }

    pub fn accepts_edits(&self) -> bool {
        self.state.phase.accepts_edits()
    }

    pub fn clock_s(&self) -> f32 {
        self.clock_s
    }

    /// Phase change produced by the most recent `step`, if any.
    pub fn last_transition(&self) -> Option<PhaseChange> {
        self.transition
    }

    /// Cannon body velocity once the shell has left the muzzle.
    pub fn recoil_velocity(&self) -> Vec2 {
        match (&self.path, self.state.phase) {
            (Some(path), Phase::FreeFlight | Phase::Landed(Landing::Ground)) => {
                kinematics::recoil_velocity(path.params())
            }
            _ => Vec2::ZERO,
        }
    }

    fn accept(&mut self, params: LaunchParameters) {
        if !params.same_flight(&self.params) {
            self.prediction
                .resample(&params, self.config.sampling.interval_s);
        }
        self.params = params;
        if self.state.phase == Phase::Idle {
            self.state = ProjectileState::idle(params.origin);
        }
    }

    fn launch(&mut self) {
        if !self.params.can_launch() {
            return;
        }
        let path = FlightPath::launch(self.params);
        self.transition = Some(PhaseChange {
            from: self.state.phase,
            to: path.phase(),
            at_s: 0.0,
        });
        self.launch_time_s = self.clock_s;
        self.state = self.snapshot(&path);
        self.path = Some(path);
    }

    fn advance(&mut self, frame_dt: f32) {
        let Some(mut path) = self.path else {
            return;
        };
        if !path.is_flying() {
            return;
        }

        let mut remaining = frame_dt;
        while remaining > 0.0 && path.is_flying() {
            let dt = remaining.min(self.config.fixed_step_s);
            remaining -= dt;
            if let Some(change) = path.advance(dt) {
                self.transition = Some(change);
            }
        }

        self.state = self.snapshot(&path);
        self.path = Some(path);
    }

    fn snapshot(&self, path: &FlightPath) -> ProjectileState {
        let sample = path.sample();
        ProjectileState {
            position: sample.position,
            velocity: sample.velocity,
            acceleration: sample.acceleration,
            phase: path.phase(),
            launch_time_s: self.launch_time_s,
            phase_entry_time_s: path.phase_entry_s(),
            flight_time_s: path.flight_time_s(),
        }
    }
}
