//! 2D drawing surface
//!
//! Games draw through the `Surface` trait: a browser 2D canvas on wasm32, a
//! command recorder everywhere else.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use shapes::{draw_paddle, draw_snake};

use glam::Vec2;

/// sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS hex form, e.g. `#9ae2ff`
    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Rgb;

    pub const SNAKE_BODY: Rgb = Rgb(0x9a, 0xe2, 0xff);
    pub const FOOD: Rgb = Rgb(0xa7, 0x8b, 0xfa);
    pub const PADDLE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const BALL: Rgb = Rgb(0xff, 0xff, 0xff);
}

/// Pixel surface owned by the runtime while a game is active
pub trait Surface {
    /// Pixel width and height
    fn size(&self) -> (u32, u32);

    /// Clear to transparent
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
}
