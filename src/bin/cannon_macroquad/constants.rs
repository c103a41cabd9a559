use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1600;
pub const INITIAL_WINDOW_HEIGHT: i32 = 900;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const LEFT_MARGIN: f32 = 400.0;
pub const TITLE_Y: f32 = 46.0;
pub const CONTROLS_Y: f32 = 80.0;

pub const GROUND_EXTENT_M: f32 = 200.0;
pub const BARREL_THICKNESS_PX: f32 = 10.0;
pub const PIVOT_RADIUS_PX: f32 = 14.0;
pub const PROJECTILE_RADIUS_PX: f32 = 7.0;
/// Pixels drawn per m/s of velocity for the velocity arrow.
pub const VELOCITY_ARROW_PX_PER_MPS: f32 = 3.0;
pub const TRAIL_CAPACITY: usize = 4096;

pub const SKY_COLOR: Color = Color::new(0.98, 0.98, 0.99, 1.0);
pub const GROUND_COLOR: Color = Color::new(0.35, 0.38, 0.42, 1.0);
pub const BARREL_COLOR: Color = Color::new(0.20, 0.22, 0.26, 1.0);
pub const PREVIEW_COLOR: Color = Color::new(0.30, 0.55, 0.96, 0.55);
pub const TRAIL_COLOR: Color = Color::new(0.21, 0.48, 0.96, 1.0);
pub const VELOCITY_COLOR: Color = Color::new(0.10, 0.60, 0.30, 1.0);
