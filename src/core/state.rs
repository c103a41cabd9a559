use macroquad::math::Vec2;

/// How a flight ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    /// Dropped below ground level in free flight.
    Ground,
    /// Slid back out of the breech before reaching the muzzle.
    BackSlip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InBarrel,
    FreeFlight,
    Landed(Landing),
}

impl Phase {
    pub fn is_flying(self) -> bool {
        matches!(self, Phase::InBarrel | Phase::FreeFlight)
    }

    /// Parameters may only change while the projectile is at rest.
    pub fn accepts_edits(self) -> bool {
        !self.is_flying()
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::InBarrel => "In barrel",
            Phase::FreeFlight => "Free flight",
            Phase::Landed(Landing::Ground) => "Landed",
            Phase::Landed(Landing::BackSlip) => "Stalled in barrel",
        }
    }
}

/// Position, velocity and acceleration at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicSample {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

impl KinematicSample {
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Snapshot handed to the renderer once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub phase: Phase,
    /// Controller clock when the current flight was launched.
    pub launch_time_s: f32,
    /// Flight-relative time at which `phase` began.
    pub phase_entry_time_s: f32,
    /// Flight-relative time of this sample.
    pub flight_time_s: f32,
}

impl ProjectileState {
    pub fn idle(origin: Vec2) -> Self {
        Self {
            position: origin,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            phase: Phase::Idle,
            launch_time_s: 0.0,
            phase_entry_time_s: 0.0,
            flight_time_s: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn sample(&self) -> KinematicSample {
        KinematicSample {
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec2;

    #[test]
    fn only_resting_phases_accept_edits() {
        assert!(Phase::Idle.accepts_edits());
        assert!(Phase::Landed(Landing::Ground).accepts_edits());
        assert!(Phase::Landed(Landing::BackSlip).accepts_edits());
        assert!(!Phase::InBarrel.accepts_edits());
        assert!(!Phase::FreeFlight.accepts_edits());
    }

    #[test]
    fn speed_is_velocity_magnitude() {
        let sample = KinematicSample {
            velocity: vec2(3.0, -4.0),
            ..KinematicSample::default()
        };
        assert_eq!(sample.speed(), 5.0);
    }

    #[test]
    fn idle_state_rests_at_origin() {
        let state = ProjectileState::idle(vec2(-15.0, 2.0));
        assert_eq!(state.position, vec2(-15.0, 2.0));
        assert_eq!(state.speed(), 0.0);
        assert_eq!(state.phase, Phase::Idle);
    }
}
