//! Micro Arcade - Snake and Paddle on one canvas
//!
//! Core modules:
//! - `sim`: Game rules (snake grid stepping, paddle/ball physics, input table)
//! - `renderer`: Drawing surface abstraction and per-game draw routines
//! - `runtime`: Mode dispatch and the frame loop contract
//! - `platform`: Host abstraction (browser DOM, headless)
//! - `settings`: Data-driven tuning loaded from JSON

pub mod error;
pub mod platform;
pub mod renderer;
pub mod runtime;
pub mod settings;
pub mod sim;

pub use error::ArcadeError;
pub use runtime::{FrameTicket, GameRuntime, Mode};
pub use settings::ArcadeConfig;

/// Game configuration constants
pub mod consts {
    /// Snake cell size in pixels
    pub const GRID_SIZE: u32 = 20;
    /// Snake simulation interval (ms between steps)
    pub const SNAKE_TICK_MS: f64 = 160.0;
    /// Points for eating food
    pub const FOOD_POINTS: u32 = 10;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 6.0;
    /// Distance from the bottom edge to the paddle's top
    pub const PADDLE_INSET: f32 = 20.0;
    /// Pixels per frame while an arrow key is held
    pub const PADDLE_SPEED: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    pub const BALL_START_VX: f32 = 2.0;
    pub const BALL_START_VY: f32 = 1.6;
    /// Ball reflects once it passes this close to a wall
    pub const WALL_MARGIN: f32 = 5.0;
    /// Ball is checked against the paddle once below `H - PADDLE_LINE`
    pub const PADDLE_LINE: f32 = 10.0;

    pub const WALL_POINTS: u32 = 1;
    pub const PADDLE_POINTS: u32 = 5;

    /// Default DOM element ids
    pub const CANVAS_ID: &str = "game-canvas";
    pub const SCORE_ID: &str = "game-score";
}

/// Text shown in the score readout
#[inline]
pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}
