//! Snake: fixed-step grid simulation
//!
//! The snake steps every `tick_interval_ms` of frame time regardless of the
//! display refresh rate. Hitting a wall or itself resets the round in place;
//! there is no game-over phase.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::input::{KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP};
use super::rng::RandomSource;
use crate::settings::ArcadeConfig;

/// Grid cell (may be out of bounds transiently while checking a move)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Starting body, head first
pub const INITIAL_BODY: [Cell; 3] = [Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)];

/// Heading on the grid (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Unit vector; exactly one axis is non-zero
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Arrow key names as reported by `KeyboardEvent.key`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            KEY_UP => Some(Direction::Up),
            KEY_DOWN => Some(Direction::Down),
            KEY_LEFT => Some(Direction::Left),
            KEY_RIGHT => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Outcome of a single snake step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeEvent {
    /// Moved one cell, length unchanged
    Moved,
    /// Ate the food and grew by one cell
    Ate,
    /// Hit a wall or itself; state reinitialized
    Reset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeState {
    /// Head first
    pub body: VecDeque<Cell>,
    pub direction: Direction,
    pub food: Cell,
    pub score: u32,
    pub grid_size: u32,
    pub tick_interval_ms: f64,
    pub food_points: u32,
    /// Grid bounds: valid cells are `[0, cols) x [0, rows)`
    pub cols: i32,
    pub rows: i32,
    /// Frame timestamp of the last step (unset until the first frame after a reset)
    #[serde(skip)]
    last_tick: Option<f64>,
}

impl SnakeState {
    /// Fresh round on a `width` x `height` pixel surface
    pub fn new(width: u32, height: u32, config: &ArcadeConfig, rng: &mut dyn RandomSource) -> Self {
        let grid_size = config.grid_size.max(1);
        // A partial trailing cell still counts as playable
        let cols = width.div_ceil(grid_size) as i32;
        let rows = height.div_ceil(grid_size) as i32;

        let mut state = Self {
            body: VecDeque::new(),
            direction: Direction::Right,
            food: Cell::new(0, 0),
            score: 0,
            grid_size,
            tick_interval_ms: config.tick_interval_ms,
            food_points: config.food_points,
            cols,
            rows,
            last_tick: None,
        };
        state.reset(rng);
        state
    }

    /// Reinitialize body, heading, food and score in place
    pub fn reset(&mut self, rng: &mut dyn RandomSource) {
        self.body = INITIAL_BODY.iter().copied().collect();
        self.direction = Direction::Right;
        self.score = 0;
        self.last_tick = None;
        self.place_food(rng);
    }

    pub fn head(&self) -> Cell {
        self.body.front().copied().unwrap_or(INITIAL_BODY[0])
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.cols && cell.y < self.rows
    }

    /// Change heading unless it would reverse into the neck.
    /// Returns whether the heading was accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance the fixed-step clock to frame time `now`, stepping at most once
    pub fn advance(&mut self, now: f64, rng: &mut dyn RandomSource) -> Option<SnakeEvent> {
        let last = *self.last_tick.get_or_insert(now);
        if now - last < self.tick_interval_ms {
            return None;
        }
        let event = self.step(rng);
        // Measured from this frame even when the step reset the round
        self.last_tick = Some(now);
        Some(event)
    }

    /// One simulation step
    pub fn step(&mut self, rng: &mut dyn RandomSource) -> SnakeEvent {
        let head = self.head().offset(self.direction);

        if !self.in_bounds(head) || self.body.contains(&head) {
            log::debug!("Snake collided at ({}, {}) with score {}", head.x, head.y, self.score);
            self.reset(rng);
            return SnakeEvent::Reset;
        }

        self.body.push_front(head);
        if head == self.food {
            self.score += self.food_points;
            self.place_food(rng);
            SnakeEvent::Ate
        } else {
            self.body.pop_back();
            SnakeEvent::Moved
        }
    }

    /// Uniform over the whole grid. Occupied cells are not excluded, so food
    /// can land under the body.
    fn place_food(&mut self, rng: &mut dyn RandomSource) {
        let x = rng.below(self.cols.max(1) as u32) as i32;
        let y = rng.below(self.rows.max(1) as u32) as i32;
        self.food = Cell::new(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, seeded};
    use proptest::prelude::*;

    /// 400x400 surface with food parked in the far corner
    fn corner_food_snake() -> (SnakeState, ScriptedRandom) {
        let mut rng = ScriptedRandom::new(vec![19]);
        let state = SnakeState::new(400, 400, &ArcadeConfig::default(), &mut rng);
        (state, rng)
    }

    fn body(state: &SnakeState) -> Vec<(i32, i32)> {
        state.body.iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn test_initial_state() {
        let (state, _) = corner_food_snake();
        assert_eq!(state.cols, 20);
        assert_eq!(state.rows, 20);
        assert_eq!(body(&state), vec![(5, 5), (4, 5), (3, 5)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.food, Cell::new(19, 19));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_step_without_input_moves_right() {
        let (mut state, mut rng) = corner_food_snake();
        assert_eq!(state.step(&mut rng), SnakeEvent::Moved);
        assert_eq!(body(&state), vec![(6, 5), (5, 5), (4, 5)]);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_partial_cells_are_playable() {
        let mut rng = seeded(1);
        let state = SnakeState::new(410, 395, &ArcadeConfig::default(), &mut rng);
        assert_eq!(state.cols, 21);
        assert_eq!(state.rows, 20);
    }

    #[test]
    fn test_reverse_is_rejected() {
        let (mut state, _) = corner_food_snake();
        assert!(!state.steer(Direction::Left));
        assert_eq!(state.direction, Direction::Right);
        assert!(state.steer(Direction::Up));
        assert!(!state.steer(Direction::Down));
        assert_eq!(state.direction, Direction::Up);
    }

    #[test]
    fn test_last_key_before_tick_wins() {
        let (mut state, mut rng) = corner_food_snake();
        state.steer(Direction::Up);
        state.steer(Direction::Right);
        state.steer(Direction::Down);
        state.step(&mut rng);
        assert_eq!(state.head(), Cell::new(5, 6));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut rng = ScriptedRandom::new(vec![6, 5, 0, 0]);
        let mut state = SnakeState::new(400, 400, &ArcadeConfig::default(), &mut rng);
        assert_eq!(state.food, Cell::new(6, 5));

        assert_eq!(state.step(&mut rng), SnakeEvent::Ate);
        assert_eq!(state.score, 10);
        assert_eq!(body(&state), vec![(6, 5), (5, 5), (4, 5), (3, 5)]);
        assert_eq!(state.food, Cell::new(0, 0));
    }

    #[test]
    fn test_food_may_land_on_body() {
        let mut rng = ScriptedRandom::new(vec![4, 5]);
        let state = SnakeState::new(400, 400, &ArcadeConfig::default(), &mut rng);
        assert!(state.body.contains(&state.food));
    }

    #[test]
    fn test_wall_collision_resets() {
        let (mut state, mut rng) = corner_food_snake();
        state.steer(Direction::Up);
        for _ in 0..5 {
            assert_eq!(state.step(&mut rng), SnakeEvent::Moved);
        }
        assert_eq!(state.head(), Cell::new(5, 0));
        assert_eq!(state.step(&mut rng), SnakeEvent::Reset);
        assert_eq!(body(&state), vec![(5, 5), (4, 5), (3, 5)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_self_collision_resets() {
        let (mut state, mut rng) = corner_food_snake();
        state.score = 30;
        // Five-cell body curled so the head's next move lands on it
        state.body = [(5, 5), (5, 6), (6, 6), (6, 5), (6, 4)]
            .iter()
            .map(|&(x, y)| Cell::new(x, y))
            .collect();
        state.direction = Direction::Right;
        assert_eq!(state.step(&mut rng), SnakeEvent::Reset);
        assert_eq!(state.body.len(), 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_fixed_step_pacing() {
        let (mut state, mut rng) = corner_food_snake();
        // First frame only arms the clock
        assert_eq!(state.advance(1000.0, &mut rng), None);
        assert_eq!(state.advance(1016.0, &mut rng), None);
        assert_eq!(state.advance(1159.9, &mut rng), None);
        assert_eq!(state.advance(1160.0, &mut rng), Some(SnakeEvent::Moved));
        assert_eq!(state.head(), Cell::new(6, 5));
        // Interval is measured from the step frame, no catch-up
        assert_eq!(state.advance(1400.0, &mut rng), Some(SnakeEvent::Moved));
        assert_eq!(state.advance(1500.0, &mut rng), None);
        assert_eq!(state.head(), Cell::new(7, 5));
    }

    #[test]
    fn test_collision_reset_keeps_step_cadence() {
        let (mut state, mut rng) = corner_food_snake();
        state.direction = Direction::Up;
        state.body = [(5, 0), (5, 1), (5, 2)].iter().map(|&(x, y)| Cell::new(x, y)).collect();
        state.advance(1000.0, &mut rng);
        assert_eq!(state.advance(1200.0, &mut rng), Some(SnakeEvent::Reset));
        // One interval after the reset frame, not after the frame following it
        assert_eq!(state.advance(1359.0, &mut rng), None);
        assert_eq!(state.advance(1360.0, &mut rng), Some(SnakeEvent::Moved));
        assert_eq!(state.head(), Cell::new(6, 5));
    }

    #[test]
    fn test_explicit_reset_rearms_on_next_frame() {
        let (mut state, mut rng) = corner_food_snake();
        state.advance(0.0, &mut rng);
        assert_eq!(state.advance(160.0, &mut rng), Some(SnakeEvent::Moved));
        state.reset(&mut rng);
        // First frame after a fresh round only arms the clock
        assert_eq!(state.advance(5000.0, &mut rng), None);
        assert_eq!(state.advance(5160.0, &mut rng), Some(SnakeEvent::Moved));
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_step_invariants(seed in any::<u64>(), turns in prop::collection::vec(direction_strategy(), 1..200)) {
            let mut rng = seeded(seed);
            let mut state = SnakeState::new(400, 400, &ArcadeConfig::default(), &mut rng);

            for turn in turns {
                let before_head = state.head();
                let before_len = state.body.len();
                let before_score = state.score;
                let accepted = state.steer(turn);

                match state.step(&mut rng) {
                    SnakeEvent::Moved => {
                        prop_assert_eq!(state.body.len(), before_len);
                        prop_assert_eq!(state.score, before_score);
                        prop_assert_eq!(state.head(), before_head.offset(state.direction));
                    }
                    SnakeEvent::Ate => {
                        prop_assert_eq!(state.body.len(), before_len + 1);
                        prop_assert_eq!(state.score, before_score + 10);
                        prop_assert_eq!(state.head(), before_head.offset(state.direction));
                    }
                    SnakeEvent::Reset => {
                        prop_assert_eq!(state.body.len(), 3);
                        prop_assert_eq!(state.score, 0);
                    }
                }
                if accepted && state.head() != INITIAL_BODY[0] {
                    prop_assert_eq!(state.direction, turn);
                }

                let mut seen = std::collections::HashSet::new();
                prop_assert!(state.body.iter().all(|c| seen.insert(*c)));
                prop_assert!(state.body.iter().all(|c| state.in_bounds(*c)));
            }
        }
    }
}
