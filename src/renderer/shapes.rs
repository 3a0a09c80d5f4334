//! Per-game draw routines

use super::{Surface, colors};
use crate::sim::{PaddleState, SnakeState};

/// Body cells then food, each a `grid - 1` square so a 1px grid line shows
pub fn draw_snake(surface: &mut dyn Surface, state: &SnakeState) {
    surface.clear();

    let grid = state.grid_size as f32;
    let side = grid - 1.0;
    for cell in &state.body {
        surface.fill_rect(cell.x as f32 * grid, cell.y as f32 * grid, side, side, colors::SNAKE_BODY);
    }
    surface.fill_rect(
        state.food.x as f32 * grid,
        state.food.y as f32 * grid,
        side,
        side,
        colors::FOOD,
    );
}

/// Paddle bar and ball
pub fn draw_paddle(surface: &mut dyn Surface, state: &PaddleState) {
    surface.clear();
    surface.fill_rect(state.x, state.y, state.width, state.height, colors::PADDLE);
    surface.fill_circle(state.ball.pos, state.ball_radius, colors::BALL);
}
