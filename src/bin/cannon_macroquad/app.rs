use cannon_sim::core::viewport::{VISIBLE_WIDTH_M, Viewport};
use macroquad::prelude::*;

use crate::constants::{
    INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, MSAA_SAMPLES, PREVIEW_COLOR, SKY_COLOR,
    TRAIL_COLOR, UI_FONT_PATH,
};
use crate::controls::{draw_control_panel, hotkey_actions};
use crate::hud::draw_hud;
use crate::render::{draw_cannon, draw_distance_ticks, draw_ground, draw_path, draw_projectile};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Cannon".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            println!("Could not load '{UI_FONT_PATH}': {err}. Falling back to default font.");
            None
        }
    };

    let mut state = AppRuntime::new();

    loop {
        let frame_dt = get_frame_time();
        let display = vec2(screen_width(), screen_height());

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        if actions.reset {
            state.reset();
        }

        let projectile = state
            .controller
            .step(&state.params, frame_dt, actions.launch);
        state.after_step(projectile);

        let viewport = Viewport::fit(display, VISIBLE_WIDTH_M);
        let params = *state.controller.active_params();

        clear_background(SKY_COLOR);
        draw_ground(&viewport, params.ground_level_m);
        draw_distance_ticks(&viewport, display, params.ground_level_m, ui_font.as_ref());

        if state.show_preview && state.controller.accepts_edits() {
            draw_path(
                state.controller.prediction().points(),
                &viewport,
                2.0,
                PREVIEW_COLOR,
            );
        }
        draw_path(&state.trail, &viewport, 3.0, TRAIL_COLOR);
        draw_cannon(&viewport, &params);
        draw_projectile(&viewport, projectile.position, projectile.velocity);

        draw_hud(&state, &viewport, display.y, ui_font.as_ref());

        next_frame().await;
    }
}
