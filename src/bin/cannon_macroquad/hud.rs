use cannon_sim::core::state::ProjectileState;
use cannon_sim::core::trajectory::{Trajectory, TrajectoryOutcome};
use cannon_sim::core::viewport::Viewport;
use macroquad::prelude::*;

use crate::constants::{CONTROLS_Y, LEFT_MARGIN, TITLE_Y};
use crate::render::draw_ui_text;
use crate::state::AppRuntime;

pub(crate) fn draw_hud(
    state: &AppRuntime,
    viewport: &Viewport,
    screen_h: f32,
    font: Option<&Font>,
) {
    draw_header_block(font);
    draw_status_block(state, screen_h, font);
    if state.show_preview && state.controller.accepts_edits() {
        draw_range_label(state.controller.prediction(), viewport, font);
    }
}

fn draw_header_block(font: Option<&Font>) {
    let header_color = Color::from_rgba(30, 30, 35, 255);
    draw_ui_text(
        "Cannon - Barrel and Free Flight",
        LEFT_MARGIN,
        TITLE_Y,
        30,
        header_color,
        font,
    );
    draw_ui_text(
        "Controls: sliders set the cannon while the shell is at rest | Space launch | R reset",
        LEFT_MARGIN,
        CONTROLS_Y,
        20,
        DARKGRAY,
        font,
    );
}

fn format_vec(v: Vec2) -> String {
    format!("({:.2}, {:.2})", v.x, v.y)
}

fn draw_status_block(state: &AppRuntime, screen_h: f32, font: Option<&Font>) {
    let header_color = Color::from_rgba(30, 30, 35, 255);
    let projectile: &ProjectileState = state.controller.state();
    let params = state.controller.active_params();
    let prediction = state.controller.prediction();
    let recoil = state.controller.recoil_velocity();

    draw_ui_text(
        &format!(
            "Angle: {:.1} deg | Muzzle: {:.1} m/s | Barrel: {:.1} m | Height: {:.1} m | Speed x{:.2}",
            params.angle_deg(),
            params.muzzle_speed_mps,
            params.barrel_length_m,
            params.origin.y,
            params.time_scale
        ),
        LEFT_MARGIN,
        screen_h - 100.0,
        22,
        header_color,
        font,
    );
    draw_ui_text(
        &format!(
            "State: {} | t = {:.2} s | p = {} m | v = {} m/s | a = {} m/s^2 | |v| = {:.2} m/s",
            projectile.phase.label(),
            projectile.flight_time_s,
            format_vec(projectile.position),
            format_vec(projectile.velocity),
            format_vec(projectile.acceleration),
            projectile.speed()
        ),
        LEFT_MARGIN,
        screen_h - 70.0,
        20,
        BLUE,
        font,
    );
    draw_ui_text(
        &format!(
            "Prediction -> {} | range {:.2} m, apex {:.2} m, flight {:.2} s | recoil {:.3} m/s | {}",
            outcome_text(prediction.outcome()),
            prediction.range_m(),
            prediction.apex_m(),
            prediction.flight_time_s(),
            recoil.length(),
            state.status_line
        ),
        LEFT_MARGIN,
        screen_h - 40.0,
        18,
        DARKGRAY,
        font,
    );
}

fn outcome_text(outcome: TrajectoryOutcome) -> &'static str {
    match outcome {
        TrajectoryOutcome::Landed(_) => "lands",
        TrajectoryOutcome::Truncated => "leaves the preview",
        TrajectoryOutcome::NoMotion => "no motion",
    }
}

fn draw_range_label(prediction: &Trajectory, viewport: &Viewport, font: Option<&Font>) {
    let Some(landing) = prediction.landing_point() else {
        return;
    };
    let label = format!("{:.2} m", prediction.range_m());
    let size = measure_text(&label, font, 18, 1.0);
    let p = viewport.to_pixels(landing);
    draw_ui_text(
        &label,
        p.x - (size.width * 0.5),
        p.y - 14.0,
        18,
        DARKGRAY,
        font,
    );
}
