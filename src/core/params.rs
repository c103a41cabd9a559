use std::ops::RangeInclusive;

use macroquad::math::{Vec2, vec2};

use super::constants::{
    ANGLE_RANGE_RAD, BARREL_LENGTH_RANGE_M, MASS_RANGE_KG, MUZZLE_SPEED_RANGE_MPS,
    TIME_SCALE_RANGE,
};

/// Cannon settings edited by the UI between flights.
///
/// The controller copies these at launch and ignores edits until the
/// projectile is back at rest, so one flight always follows one set of
/// parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchParameters {
    /// Barrel pivot in world meters (+X right, +Y up).
    pub origin: Vec2,
    pub angle_rad: f32,
    pub muzzle_speed_mps: f32,
    pub barrel_length_m: f32,
    pub projectile_mass_kg: f32,
    pub cannon_mass_kg: f32,
    pub time_scale: f32,
    pub ground_level_m: f32,
}

impl Default for LaunchParameters {
    fn default() -> Self {
        Self {
            origin: vec2(-15.0, 0.0),
            angle_rad: std::f32::consts::FRAC_PI_4,
            muzzle_speed_mps: 20.0,
            barrel_length_m: 5.0,
            projectile_mass_kg: 5.0,
            cannon_mass_kg: 500.0,
            time_scale: 1.0,
            ground_level_m: 0.0,
        }
    }
}

fn clamp_finite(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        *range.start()
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

impl LaunchParameters {
    /// Pulls every field into its slider range. Non-finite values fall back
    /// to the bottom of the range, which for speed means "no motion".
    pub fn clamped(self) -> Self {
        let ground_level_m = finite_or(self.ground_level_m, 0.0);
        let origin = vec2(
            finite_or(self.origin.x, 0.0),
            finite_or(self.origin.y, ground_level_m).max(ground_level_m),
        );
        Self {
            origin,
            angle_rad: clamp_finite(self.angle_rad, &ANGLE_RANGE_RAD),
            muzzle_speed_mps: clamp_finite(self.muzzle_speed_mps, &MUZZLE_SPEED_RANGE_MPS),
            barrel_length_m: clamp_finite(self.barrel_length_m, &BARREL_LENGTH_RANGE_M),
            projectile_mass_kg: clamp_finite(self.projectile_mass_kg, &MASS_RANGE_KG),
            cannon_mass_kg: clamp_finite(self.cannon_mass_kg, &MASS_RANGE_KG),
            time_scale: clamp_finite(self.time_scale, &TIME_SCALE_RANGE),
            ground_level_m,
        }
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_rad.to_degrees()
    }

    pub fn with_angle_deg(mut self, angle_deg: f32) -> Self {
        self.angle_rad = angle_deg.to_radians();
        self
    }

    /// True when a launch would produce any motion at all.
    pub fn can_launch(&self) -> bool {
        self.muzzle_speed_mps > 0.0
    }

    /// Compares everything that shapes the flight path. `time_scale` only
    /// changes playback rate, so it is left out.
    pub fn same_flight(&self, other: &Self) -> bool {
        Self {
            time_scale: other.time_scale,
            ..*self
        } == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values_to_slider_bounds() {
        let params = LaunchParameters {
            angle_rad: 3.0,
            muzzle_speed_mps: -4.0,
            barrel_length_m: 500.0,
            time_scale: 12.0,
            ..LaunchParameters::default()
        }
        .clamped();

        assert_eq!(params.angle_rad, std::f32::consts::FRAC_PI_2);
        assert_eq!(params.muzzle_speed_mps, 0.0);
        assert_eq!(params.barrel_length_m, *BARREL_LENGTH_RANGE_M.end());
        assert_eq!(params.time_scale, *TIME_SCALE_RANGE.end());
    }

    #[test]
    fn non_finite_inputs_degrade_to_no_motion() {
        let params = LaunchParameters {
            muzzle_speed_mps: f32::NAN,
            origin: vec2(f32::INFINITY, f32::NAN),
            ..LaunchParameters::default()
        }
        .clamped();

        assert!(!params.can_launch());
        assert_eq!(params.origin, vec2(0.0, 0.0));
    }

    #[test]
    fn origin_is_kept_above_ground() {
        let params = LaunchParameters {
            origin: vec2(2.0, -3.0),
            ground_level_m: 1.0,
            ..LaunchParameters::default()
        }
        .clamped();

        assert_eq!(params.origin, vec2(2.0, 1.0));
    }

    #[test]
    fn time_scale_does_not_change_the_flight() {
        let base = LaunchParameters::default();
        let faster = LaunchParameters {
            time_scale: 3.0,
            ..base
        };
        let steeper = base.with_angle_deg(60.0);

        assert!(base.same_flight(&faster));
        assert!(!base.same_flight(&steeper));
    }
}
