use cannon_sim::core::kinematics::exit_point;
use cannon_sim::core::params::LaunchParameters;
use cannon_sim::core::viewport::Viewport;
use macroquad::prelude::*;

use crate::constants::{
    BARREL_COLOR, BARREL_THICKNESS_PX, GROUND_COLOR, GROUND_EXTENT_M, PIVOT_RADIUS_PX,
    PROJECTILE_RADIUS_PX, VELOCITY_ARROW_PX_PER_MPS, VELOCITY_COLOR,
};

const TICK_SPACING_M: f32 = 5.0;

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_ground(viewport: &Viewport, ground_level_m: f32) {
    let left = viewport.to_pixels(vec2(-GROUND_EXTENT_M, ground_level_m));
    let right = viewport.to_pixels(vec2(GROUND_EXTENT_M, ground_level_m));
    draw_line(left.x, left.y, right.x, right.y, 2.0, GROUND_COLOR);
}

pub(crate) fn draw_distance_ticks(
    viewport: &Viewport,
    display: Vec2,
    ground_level_m: f32,
    font: Option<&Font>,
) {
    let label_color = Color::from_rgba(105, 113, 124, 255);
    let (min_x, max_x) = viewport.visible_x_range(display);
    let first = (min_x / TICK_SPACING_M).ceil() as i32;
    let last = (max_x / TICK_SPACING_M).floor() as i32;

    for i in first..=last {
        let value = i as f32 * TICK_SPACING_M;
        let p = viewport.to_pixels(vec2(value, ground_level_m));
        draw_line(p.x, p.y, p.x, p.y + 6.0, 1.0, label_color);
        let label = format!("{value:.0}");
        let size = measure_text(&label, font, 16, 1.0);
        draw_ui_text(
            &label,
            p.x - (size.width * 0.5),
            p.y + 22.0,
            16,
            label_color,
            font,
        );
    }
}

pub(crate) fn draw_cannon(viewport: &Viewport, params: &LaunchParameters) {
    let pivot = viewport.to_pixels(params.origin);
    let muzzle = viewport.to_pixels(exit_point(params));
    draw_line(
        pivot.x,
        pivot.y,
        muzzle.x,
        muzzle.y,
        BARREL_THICKNESS_PX,
        BARREL_COLOR,
    );
    draw_circle(pivot.x, pivot.y, PIVOT_RADIUS_PX, BARREL_COLOR);
    draw_circle_lines(pivot.x, pivot.y, PIVOT_RADIUS_PX, 2.0, DARKGRAY);
}

pub(crate) fn draw_path(points: &[Vec2], viewport: &Viewport, thickness: f32, color: Color) {
    if points.len() < 2 {
        return;
    }
    let mut prev = viewport.to_pixels(points[0]);
    for point in points.iter().skip(1).copied() {
        let cur = viewport.to_pixels(point);
        draw_line(prev.x, prev.y, cur.x, cur.y, thickness, color);
        prev = cur;
    }
}

pub(crate) fn draw_projectile(viewport: &Viewport, position: Vec2, velocity: Vec2) {
    let p = viewport.to_pixels(position);
    // Screen Y points down.
    let tip = p + vec2(velocity.x, -velocity.y) * VELOCITY_ARROW_PX_PER_MPS;
    if velocity.length_squared() > 1e-6 {
        draw_line(p.x, p.y, tip.x, tip.y, 2.0, VELOCITY_COLOR);
    }
    draw_circle(p.x, p.y, PROJECTILE_RADIUS_PX, RED);
    draw_circle_lines(p.x, p.y, PROJECTILE_RADIUS_PX, 2.0, MAROON);
}
