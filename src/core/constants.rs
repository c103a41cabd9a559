use std::ops::RangeInclusive;

pub const GRAVITY_MPS2: f32 = 9.80665;

pub const FIXED_STEP_S: f32 = 1.0 / 240.0;
pub const MAX_FRAME_DT_S: f32 = 0.10;
pub const MAX_SUBSTEPS_PER_FRAME: f32 = 1024.0;
pub const CROSSING_BISECTION_STEPS: usize = 32;

pub const TRAJECTORY_SAMPLE_INTERVAL_S: f32 = 1.0 / 60.0;
pub const MAX_TRAJECTORY_SAMPLES: usize = 2048;

// Slider bounds; `LaunchParameters::clamped` uses the same ranges.
pub const ANGLE_RANGE_RAD: RangeInclusive<f32> = 0.0..=std::f32::consts::FRAC_PI_2;
pub const MUZZLE_SPEED_RANGE_MPS: RangeInclusive<f32> = 0.0..=120.0;
pub const BARREL_LENGTH_RANGE_M: RangeInclusive<f32> = 0.5..=20.0;
pub const ORIGIN_HEIGHT_RANGE_M: RangeInclusive<f32> = 0.0..=15.0;
pub const MASS_RANGE_KG: RangeInclusive<f32> = 0.1..=5000.0;
pub const TIME_SCALE_RANGE: RangeInclusive<f32> = 0.0..=5.0;
