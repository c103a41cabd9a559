use macroquad::math::{Vec2, vec2};

use super::constants::GRAVITY_MPS2;
use super::params::LaunchParameters;
use super::state::{KinematicSample, Phase};

pub fn barrel_axis(angle_rad: f32) -> Vec2 {
    vec2(angle_rad.cos(), angle_rad.sin())
}

/// `p(t) = p0 + v0*t + a*t^2/2`, `v(t) = v0 + a*t`.
pub fn constant_acceleration(p0: Vec2, v0: Vec2, a: Vec2, time_s: f32) -> KinematicSample {
    KinematicSample {
        position: p0 + (v0 * time_s) + (a * (0.5 * time_s * time_s)),
        velocity: v0 + (a * time_s),
        acceleration: a,
    }
}

/// Signed acceleration along the barrel axis while the shell is still inside.
pub fn axial_acceleration() -> f32 {
    -GRAVITY_MPS2
}

pub fn barrel_acceleration(params: &LaunchParameters) -> Vec2 {
    barrel_axis(params.angle_rad) * axial_acceleration()
}

pub fn exit_speed_squared(params: &LaunchParameters) -> f32 {
    let v0 = params.muzzle_speed_mps;
    (v0 * v0) + (2.0 * axial_acceleration() * params.barrel_length_m)
}

/// Speed at the muzzle; zero when the shell cannot reach it.
pub fn exit_speed(params: &LaunchParameters) -> f32 {
    exit_speed_squared(params).max(0.0).sqrt()
}

pub fn exit_point(params: &LaunchParameters) -> Vec2 {
    params.origin + (barrel_axis(params.angle_rad) * params.barrel_length_m)
}

pub fn axial_displacement(params: &LaunchParameters, position: Vec2) -> f32 {
    (position - params.origin).dot(barrel_axis(params.angle_rad))
}

/// Phase-local time at which the shell reaches the muzzle, or `None` if it
/// stalls first.
pub fn time_to_exit(params: &LaunchParameters) -> Option<f32> {
    if !params.can_launch() || exit_speed_squared(params) < 0.0 {
        return None;
    }
    Some((params.muzzle_speed_mps - exit_speed(params)) / -axial_acceleration())
}

/// Phase-local time at which the shell would stop moving forward along the
/// barrel if the barrel were endless.
pub fn barrel_apex_time(params: &LaunchParameters) -> f32 {
    params.muzzle_speed_mps.max(0.0) / -axial_acceleration()
}

pub fn sample_in_barrel(params: &LaunchParameters, time_s: f32) -> KinematicSample {
    if !params.can_launch() {
        return KinematicSample::at_rest(params.origin);
    }
    let axis = barrel_axis(params.angle_rad);
    constant_acceleration(
        params.origin,
        axis * params.muzzle_speed_mps,
        barrel_acceleration(params),
        time_s,
    )
}

pub fn sample_free_flight(params: &LaunchParameters, time_s: f32) -> KinematicSample {
    let axis = barrel_axis(params.angle_rad);
    constant_acceleration(
        exit_point(params),
        axis * exit_speed(params),
        vec2(0.0, -GRAVITY_MPS2),
        time_s,
    )
}

/// Evaluates `phase` at its local time. Resting phases sit at the origin.
pub fn sample_phase(params: &LaunchParameters, phase: Phase, time_s: f32) -> KinematicSample {
    match phase {
        Phase::InBarrel => sample_in_barrel(params, time_s),
        Phase::FreeFlight => sample_free_flight(params, time_s),
        Phase::Idle | Phase::Landed(_) => KinematicSample::at_rest(params.origin),
    }
}

/// Velocity handed to the cannon body when the shell leaves the muzzle.
pub fn recoil_velocity(params: &LaunchParameters) -> Vec2 {
    if params.cannon_mass_kg <= 0.0 {
        return Vec2::ZERO;
    }
    let ratio = params.projectile_mass_kg / params.cannon_mass_kg;
    barrel_axis(params.angle_rad) * (-ratio * exit_speed(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn assert_close(actual: f32, expected: f32, tolerance: f32) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn scenario() -> LaunchParameters {
        LaunchParameters {
            origin: vec2(0.0, 0.0),
            angle_rad: FRAC_PI_4,
            muzzle_speed_mps: 30.0,
            barrel_length_m: 5.0,
            ..LaunchParameters::default()
        }
    }

    #[test]
    fn computes_exit_speed_for_forty_five_degrees() {
        let params = scenario();
        assert_close(exit_speed_squared(&params), 801.9335, 1e-2);
        assert_close(exit_speed(&params), 28.3189, 1e-3);
    }

    #[test]
    fn exit_point_lies_one_barrel_length_along_the_axis() {
        let params = LaunchParameters {
            origin: vec2(-15.0, 2.0),
            ..scenario()
        };
        let exit = exit_point(&params);
        assert_close(exit.x, -15.0 + 3.5355, 1e-3);
        assert_close(exit.y, 2.0 + 3.5355, 1e-3);
        assert_close(axial_displacement(&params, exit), 5.0, 1e-4);
    }

    #[test]
    fn exit_speed_obeys_work_energy_relation() {
        for angle_deg in [0.0f32, 10.0, 30.0, 45.0, 60.0, 90.0] {
            for speed in [10.0f32, 25.0, 60.0, 120.0] {
                for length in [0.5f32, 2.0, 5.0] {
                    let params = LaunchParameters {
                        muzzle_speed_mps: speed,
                        barrel_length_m: length,
                        ..scenario()
                    }
                    .with_angle_deg(angle_deg);
                    let v_exit = exit_speed(&params);
                    assert!(v_exit >= 0.0);
                    let expected = speed * speed + 2.0 * axial_acceleration() * length;
                    if expected > 0.0 {
                        assert_close(v_exit * v_exit, expected, expected * 1e-5);
                    } else {
                        assert_eq!(v_exit, 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn barrel_sample_reaches_muzzle_at_exit_time_with_exit_speed() {
        let params = scenario();
        let t_exit = time_to_exit(&params).expect("shell should leave the barrel");
        let sample = sample_in_barrel(&params, t_exit);

        assert_close(axial_displacement(&params, sample.position), 5.0, 1e-3);
        assert_close(sample.speed(), exit_speed(&params), 1e-3);
        assert_eq!(sample.acceleration, barrel_acceleration(&params));
    }

    #[test]
    fn free_flight_starts_at_muzzle_and_falls_at_g() {
        let params = scenario();
        let start = sample_free_flight(&params, 0.0);
        assert_eq!(start.position, exit_point(&params));
        assert_close(start.speed(), exit_speed(&params), 1e-4);

        let later = sample_free_flight(&params, 1.0);
        assert_eq!(later.acceleration, vec2(0.0, -GRAVITY_MPS2));
        assert_close(later.velocity.x, start.velocity.x, 1e-5);
        assert_close(later.velocity.y, start.velocity.y - GRAVITY_MPS2, 1e-4);
    }

    #[test]
    fn zero_muzzle_speed_never_moves() {
        let params = LaunchParameters {
            muzzle_speed_mps: 0.0,
            ..scenario()
        };
        for t in [0.0f32, 0.5, 3.0, 100.0] {
            let sample = sample_in_barrel(&params, t);
            assert_eq!(sample.position, params.origin);
            assert_eq!(axial_displacement(&params, sample.position), 0.0);
        }
        assert_eq!(time_to_exit(&params), None);
    }

    #[test]
    fn horizontal_barrel_matches_one_dimensional_kinematics() {
        let params = LaunchParameters {
            angle_rad: 0.0,
            muzzle_speed_mps: 20.0,
            barrel_length_m: 5.0,
            ..scenario()
        };
        assert_eq!(barrel_acceleration(&params), vec2(-GRAVITY_MPS2, 0.0));

        let t = 0.2;
        let sample = sample_in_barrel(&params, t);
        assert_close(sample.position.x, 20.0 * t - 0.5 * GRAVITY_MPS2 * t * t, 1e-5);
        assert_eq!(sample.position.y, 0.0);
        assert_close(
            exit_speed(&params),
            (400.0 - 2.0 * GRAVITY_MPS2 * 5.0).sqrt(),
            1e-4,
        );
    }

    #[test]
    fn horizontal_barrel_stalls_when_too_long() {
        let params = LaunchParameters {
            angle_rad: 0.0,
            muzzle_speed_mps: 5.0,
            barrel_length_m: 5.0,
            ..scenario()
        };
        assert!(exit_speed_squared(&params) < 0.0);
        assert_eq!(exit_speed(&params), 0.0);
        assert_eq!(time_to_exit(&params), None);
    }

    #[test]
    fn resting_phases_sample_the_origin() {
        let params = scenario();
        let idle = sample_phase(&params, Phase::Idle, 4.0);
        assert_eq!(idle, KinematicSample::at_rest(params.origin));
    }

    #[test]
    fn recoil_opposes_the_barrel_and_scales_with_mass_ratio() {
        let params = LaunchParameters {
            projectile_mass_kg: 5.0,
            cannon_mass_kg: 500.0,
            ..scenario()
        };
        let recoil = recoil_velocity(&params);
        assert_close(recoil.length(), exit_speed(&params) * 0.01, 1e-4);
        assert!(recoil.x < 0.0 && recoil.y < 0.0);
    }
}
