//! Arcade tuning and host wiring
//!
//! Every field has a default, so a config JSON only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ArcadeError;

/// Arcade configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    // === Snake ===
    /// Cell size in pixels
    pub grid_size: u32,
    /// Milliseconds between snake steps
    pub tick_interval_ms: f64,
    /// Points per food eaten
    pub food_points: u32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle and the bottom edge
    pub paddle_inset: f32,
    /// Pixels per frame
    pub paddle_speed: f32,
    pub ball_radius: f32,
    /// Ball velocity at the start of a round (pixels per frame)
    pub ball_velocity: (f32, f32),
    pub wall_margin: f32,
    pub paddle_line: f32,
    pub wall_points: u32,
    pub paddle_points: u32,

    // === Host ===
    pub canvas_id: String,
    pub score_id: String,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            tick_interval_ms: SNAKE_TICK_MS,
            food_points: FOOD_POINTS,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            paddle_speed: PADDLE_SPEED,
            ball_radius: BALL_RADIUS,
            ball_velocity: (BALL_START_VX, BALL_START_VY),
            wall_margin: WALL_MARGIN,
            paddle_line: PADDLE_LINE,
            wall_points: WALL_POINTS,
            paddle_points: PADDLE_POINTS,

            canvas_id: CANVAS_ID.to_string(),
            score_id: SCORE_ID.to_string(),
        }
    }
}

impl ArcadeConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ArcadeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse optional JSON, logging and falling back to defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(config)) => {
                log::info!("Loaded arcade config");
                config
            }
            Some(Err(err)) => {
                log::warn!("Ignoring arcade config: {}", err);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ArcadeError> {
        if self.grid_size == 0 {
            return Err(ArcadeError::InvalidConfig("grid_size must be positive"));
        }
        if !(self.tick_interval_ms > 0.0) {
            return Err(ArcadeError::InvalidConfig("tick_interval_ms must be positive"));
        }
        if !(self.paddle_width > 0.0) {
            return Err(ArcadeError::InvalidConfig("paddle_width must be positive"));
        }
        if self.paddle_speed < 0.0 || self.ball_radius < 0.0 {
            return Err(ArcadeError::InvalidConfig("paddle_speed and ball_radius must not be negative"));
        }
        Ok(())
    }
}
