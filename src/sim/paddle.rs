//! Paddle: continuous per-frame simulation
//!
//! Unlike snake, the ball moves once per displayed frame, so game speed
//! follows the refresh rate. A missed ball restarts the round.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::{InputState, KEY_LEFT, KEY_RIGHT};
use crate::settings::ArcadeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// What happened during a paddle frame (several can fire at once)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaddleEvents {
    /// Reflected off the left or right wall
    pub side_wall: bool,
    pub top_wall: bool,
    pub paddle_hit: bool,
    /// Ball got past the paddle; round reset
    pub missed: bool,
}

impl PaddleEvents {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddleState {
    /// Left edge of the paddle
    pub x: f32,
    /// Top edge of the paddle (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub ball: Ball,
    pub ball_radius: f32,
    pub score: u32,
    /// Surface size
    pub bounds: Vec2,
    #[serde(skip)]
    tuning: PaddleTuning,
}

/// Per-round constants copied out of the config
#[derive(Debug, Clone, Copy, Default)]
struct PaddleTuning {
    speed: f32,
    inset: f32,
    start_vel: Vec2,
    wall_margin: f32,
    paddle_line: f32,
    wall_points: u32,
    paddle_points: u32,
}

impl PaddleState {
    pub fn new(width: u32, height: u32, config: &ArcadeConfig) -> Self {
        let tuning = PaddleTuning {
            speed: config.paddle_speed,
            inset: config.paddle_inset,
            start_vel: Vec2::new(config.ball_velocity.0, config.ball_velocity.1),
            wall_margin: config.wall_margin,
            paddle_line: config.paddle_line,
            wall_points: config.wall_points,
            paddle_points: config.paddle_points,
        };
        let mut state = Self {
            x: 0.0,
            y: 0.0,
            width: config.paddle_width,
            height: config.paddle_height,
            ball: Ball {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
            },
            ball_radius: config.ball_radius,
            score: 0,
            bounds: Vec2::new(width as f32, height as f32),
            tuning,
        };
        state.reset();
        state
    }

    /// Center the paddle, serve the ball from the middle, zero the score
    pub fn reset(&mut self) {
        let Vec2 { x: w, y: h } = self.bounds;
        self.x = w / 2.0 - self.width / 2.0;
        self.y = h - self.tuning.inset;
        self.ball = Ball {
            pos: Vec2::new(w / 2.0, h / 2.0),
            vel: self.tuning.start_vel,
        };
        self.score = 0;
    }

    /// Clamp to `[0, W - width]`; a paddle wider than the surface sits at 0
    fn clamp_paddle(&mut self) {
        self.x = self.x.min(self.bounds.x - self.width).max(0.0);
    }

    /// Advance one frame
    pub fn step(&mut self, input: &InputState) -> PaddleEvents {
        let mut events = PaddleEvents::default();
        let Vec2 { x: w, y: h } = self.bounds;
        let margin = self.tuning.wall_margin;

        if input.is_held(KEY_LEFT) {
            self.x -= self.tuning.speed;
        }
        if input.is_held(KEY_RIGHT) {
            self.x += self.tuning.speed;
        }
        self.clamp_paddle();

        self.ball.pos += self.ball.vel;

        if self.ball.pos.x < margin || self.ball.pos.x > w - margin {
            self.ball.vel.x = -self.ball.vel.x;
            self.score += self.tuning.wall_points;
            events.side_wall = true;
        }
        if self.ball.pos.y < margin {
            self.ball.vel.y = -self.ball.vel.y;
            self.score += self.tuning.wall_points;
            events.top_wall = true;
        }

        if self.ball.pos.y > h - self.tuning.paddle_line {
            // Strictly inside the paddle span; touching an end misses
            if self.ball.pos.x > self.x && self.ball.pos.x < self.x + self.width {
                self.ball.vel.y = -self.ball.vel.y;
                self.score += self.tuning.paddle_points;
                events.paddle_hit = true;
            } else {
                log::debug!("Paddle missed with score {}", self.score);
                self.reset();
                events.missed = true;
            }
        }

        events
    }
}
