use std::ops::{Range, RangeInclusive};

use cannon_sim::core::constants::{
    ANGLE_RANGE_RAD, BARREL_LENGTH_RANGE_M, MUZZLE_SPEED_RANGE_MPS, ORIGIN_HEIGHT_RANGE_M,
    TIME_SCALE_RANGE,
};
use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use crate::state::AppRuntime;

const PROJECTILE_MASS_SLIDER_KG: Range<f32> = 0.1..50.0;
const CANNON_MASS_SLIDER_KG: Range<f32> = 10.0..5000.0;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) launch: bool,
    pub(crate) reset: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            launch: self.launch || other.launch,
            reset: self.reset || other.reset,
        }
    }
}

fn slider_range(range: &RangeInclusive<f32>) -> Range<f32> {
    *range.start()..*range.end()
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        launch: is_key_pressed(KeyCode::Space),
        reset: is_key_pressed(KeyCode::R),
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let locked = !state.controller.accepts_edits();
    let phase = state.controller.state().phase;
    let mut edited = state.params;
    let mut angle_deg = edited.angle_deg();
    let angle_range_deg = ANGLE_RANGE_RAD.start().to_degrees()..ANGLE_RANGE_RAD.end().to_degrees();

    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), vec2(18.0, 120.0), vec2(360.0, 330.0))
        .label("Cannon")
        .ui(&mut *root_ui(), |ui| {
            ui.slider(hash!(), "Angle (deg)", angle_range_deg.clone(), &mut angle_deg);
            ui.slider(
                hash!(),
                "Muzzle speed (m/s)",
                slider_range(&MUZZLE_SPEED_RANGE_MPS),
                &mut edited.muzzle_speed_mps,
            );
            ui.slider(
                hash!(),
                "Barrel length (m)",
                slider_range(&BARREL_LENGTH_RANGE_M),
                &mut edited.barrel_length_m,
            );
            ui.slider(
                hash!(),
                "Pivot height (m)",
                slider_range(&ORIGIN_HEIGHT_RANGE_M),
                &mut edited.origin.y,
            );
            ui.slider(
                hash!(),
                "Shell mass (kg)",
                PROJECTILE_MASS_SLIDER_KG,
                &mut edited.projectile_mass_kg,
            );
            ui.slider(
                hash!(),
                "Cannon mass (kg)",
                CANNON_MASS_SLIDER_KG,
                &mut edited.cannon_mass_kg,
            );
            ui.slider(
                hash!(),
                "Time scale",
                slider_range(&TIME_SCALE_RANGE),
                &mut edited.time_scale,
            );
            ui.separator();
            if ui.button(None, "Launch (Space)") {
                actions.launch = true;
            }
            if ui.button(None, "Reset (R)") {
                actions.reset = true;
            }
            if ui.button(None, "Toggle Preview") {
                state.show_preview = !state.show_preview;
            }
            ui.label(None, &format!("Flight state: {}", phase.label()));
            if locked {
                ui.label(None, "Cannon locked until the shell is down");
            }
        });

    if locked {
        state.params.time_scale = edited.time_scale;
    } else {
        state.params = edited.with_angle_deg(angle_deg);
    }

    actions
}
