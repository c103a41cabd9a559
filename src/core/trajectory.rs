use macroquad::math::Vec2;

use super::constants::{MAX_TRAJECTORY_SAMPLES, TRAJECTORY_SAMPLE_INTERVAL_S};
use super::flight::FlightPath;
use super::params::LaunchParameters;
use super::state::{Landing, Phase};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingConfig {
    pub interval_s: f32,
    pub max_samples: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_s: TRAJECTORY_SAMPLE_INTERVAL_S,
            max_samples: MAX_TRAJECTORY_SAMPLES,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrajectoryOutcome {
    Landed(Landing),
    /// Sample cap reached before the shell came down.
    Truncated,
    /// Nothing to predict: the cannon has no muzzle speed.
    NoMotion,
}

/// Predicted flight path, ordered from the breech to the landing point.
///
/// The buffer never grows past `max_samples`; [`Trajectory::resample`] clears
/// and refills it in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    points: Vec<Vec2>,
    max_samples: usize,
    flight_time_s: f32,
    exit_index: Option<usize>,
    outcome: TrajectoryOutcome,
}

impl Trajectory {
    pub fn with_capacity(max_samples: usize) -> Self {
        let max_samples = max_samples.max(2);
        Self {
            points: Vec::with_capacity(max_samples),
            max_samples,
            flight_time_s: 0.0,
            exit_index: None,
            outcome: TrajectoryOutcome::NoMotion,
        }
    }

    pub fn resample(&mut self, params: &LaunchParameters, interval_s: f32) {
        self.points.clear();
        self.flight_time_s = 0.0;
        self.exit_index = None;

        let mut path = FlightPath::launch(*params);
        self.points.push(path.sample().position);
        if !path.is_flying() || !interval_s.is_finite() || interval_s <= 0.0 {
            self.outcome = TrajectoryOutcome::NoMotion;
            return;
        }

        self.outcome = TrajectoryOutcome::Truncated;
        while self.points.len() < self.max_samples {
            path.advance(interval_s);
            let left_barrel = matches!(
                path.phase(),
                Phase::FreeFlight | Phase::Landed(Landing::Ground)
            );
            if self.exit_index.is_none() && left_barrel {
                self.exit_index = Some(self.points.len());
            }
            self.points.push(path.sample().position);
            if let Phase::Landed(landing) = path.phase() {
                self.outcome = TrajectoryOutcome::Landed(landing);
                break;
            }
        }
        self.flight_time_s = path.flight_time_s();
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    pub fn outcome(&self) -> TrajectoryOutcome {
        self.outcome
    }

    pub fn flight_time_s(&self) -> f32 {
        self.flight_time_s
    }

    /// Index of the first sample taken after the shell left the barrel.
    pub fn exit_index(&self) -> Option<usize> {
        self.exit_index
    }

    pub fn landing_point(&self) -> Option<Vec2> {
        match self.outcome {
            TrajectoryOutcome::Landed(Landing::Ground) => self.points.last().copied(),
            _ => None,
        }
    }

    /// Horizontal distance from the first sample to the last.
    pub fn range_m(&self) -> f32 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.x - first.x,
            _ => 0.0,
        }
    }

    /// Highest sample height, in world coordinates.
    pub fn apex_m(&self) -> f32 {
        self.points
            .iter()
            .map(|p| p.y)
            .reduce(f32::max)
            .unwrap_or(0.0)
    }
}

pub fn sample_trajectory(params: &LaunchParameters, config: &SamplingConfig) -> Trajectory {
    let mut trajectory = Trajectory::with_capacity(config.max_samples);
    trajectory.resample(params, config.interval_s);
    trajectory
}
