use macroquad::math::{Vec2, vec2};

/// Meters of world shown across the full display width.
pub const VISIBLE_WIDTH_M: f32 = 50.0;

/// Affine map between world meters (+Y up) and screen pixels (+Y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub origin_px: Vec2,
    pub scale: Vec2,
}

impl Viewport {
    /// World origin sits halfway across and three quarters down the display,
    /// with a uniform scale whose Y component is flipped.
    pub fn fit(display_px: Vec2, visible_width_m: f32) -> Self {
        let width = display_px.x.max(1.0);
        let height = display_px.y.max(1.0);
        let pixels_per_meter = width / visible_width_m.max(1e-3);
        Self {
            origin_px: vec2(width * 0.5, height - (height * 0.25)),
            scale: vec2(pixels_per_meter, -pixels_per_meter),
        }
    }

    pub fn to_pixels(&self, world_m: Vec2) -> Vec2 {
        (world_m * self.scale) + self.origin_px
    }

    pub fn to_world(&self, pixel: Vec2) -> Vec2 {
        (pixel - self.origin_px) / self.scale
    }

    pub fn pixels_per_meter(&self) -> f32 {
        self.scale.x.abs()
    }

    /// Horizontal world extent currently on screen.
    pub fn visible_x_range(&self, display_px: Vec2) -> (f32, f32) {
        let left = self.to_world(vec2(0.0, 0.0)).x;
        let right = self.to_world(vec2(display_px.x, 0.0)).x;
        (left, right)
    }
}
