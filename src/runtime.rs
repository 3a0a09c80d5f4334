//! Game runtime: mode dispatch and the frame loop
//!
//! The runtime never schedules frames itself. `start` and `on_frame` hand back
//! a `FrameTicket` when the caller should request another frame, and only the
//! most recent ticket is honored. After `stop`, any frame still queued by the
//! host is therefore a no-op.

use std::fmt;
use std::str::FromStr;

use rand_pcg::Pcg32;

use crate::error::ArcadeError;
use crate::platform::Host;
use crate::renderer::{Surface, draw_paddle, draw_snake};
use crate::score_text;
use crate::settings::ArcadeConfig;
use crate::sim::{Direction, InputState, PaddleState, RandomSource, SnakeEvent, SnakeState, seeded};

/// Which game is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Snake,
    Paddle,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Snake => "snake",
            Mode::Paddle => "paddle",
        }
    }
}

impl FromStr for Mode {
    type Err = ArcadeError;

    /// `pong` is the name the page's buttons use for paddle
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snake" => Ok(Mode::Snake),
            "paddle" | "pong" => Ok(Mode::Paddle),
            other => Err(ArcadeError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the live game; exactly one at a time
#[derive(Debug, Clone)]
pub enum ActiveGame {
    Snake(SnakeState),
    Paddle(PaddleState),
}

impl ActiveGame {
    pub fn mode(&self) -> Mode {
        match self {
            ActiveGame::Snake(_) => Mode::Snake,
            ActiveGame::Paddle(_) => Mode::Paddle,
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            ActiveGame::Snake(state) => state.score,
            ActiveGame::Paddle(state) => state.score,
        }
    }
}

/// Identifies one requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket(u64);

pub struct GameRuntime<H: Host, R: RandomSource = Pcg32> {
    host: H,
    rng: R,
    config: ArcadeConfig,
    surface: Option<H::Surface>,
    /// Survives stop/start
    input: InputState,
    game: Option<ActiveGame>,
    last_ticket: u64,
    /// Ticket of the frame callback currently in flight
    pending: Option<FrameTicket>,
    /// Collisions/misses since the current game started
    rounds_lost: u32,
}

impl<H: Host> GameRuntime<H> {
    pub fn new(host: H, config: ArcadeConfig, seed: u64) -> Self {
        Self::with_rng(host, config, seeded(seed))
    }
}

impl<H: Host, R: RandomSource> GameRuntime<H, R> {
    pub fn with_rng(host: H, config: ArcadeConfig, rng: R) -> Self {
        Self {
            host,
            rng,
            config,
            surface: None,
            input: InputState::new(),
            game: None,
            last_ticket: 0,
            pending: None,
            rounds_lost: 0,
        }
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn game(&self) -> Option<&ActiveGame> {
        self.game.as_ref()
    }

    /// `None` when stopped
    pub fn mode(&self) -> Option<Mode> {
        self.game.as_ref().map(ActiveGame::mode)
    }

    /// Rounds that ended in a collision or miss since the last `start`
    pub fn rounds_lost(&self) -> u32 {
        self.rounds_lost
    }

    /// Whether a frame callback is in flight
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Start (or restart) a game. Never fails: a missing surface or unknown
    /// mode is logged and ignored.
    ///
    /// Returns a ticket when the caller must request the first frame.
    pub fn start(&mut self, mode: &str) -> Option<FrameTicket> {
        match self.try_start(mode) {
            Ok(ticket) => ticket,
            Err(err) => {
                log::debug!("Ignoring start({:?}): {}", mode, err);
                None
            }
        }
    }

    /// Like `start`, but reports why nothing happened
    pub fn try_start(&mut self, mode: &str) -> Result<Option<FrameTicket>, ArcadeError> {
        let mode: Mode = mode.parse()?;
        let surface = self
            .host
            .acquire_surface()
            .ok_or(ArcadeError::SurfaceUnavailable)?;
        let (width, height) = surface.size();
        if width == 0 || height == 0 {
            return Err(ArcadeError::SurfaceUnavailable);
        }

        let game = match mode {
            Mode::Snake => ActiveGame::Snake(SnakeState::new(width, height, &self.config, &mut self.rng)),
            Mode::Paddle => ActiveGame::Paddle(PaddleState::new(width, height, &self.config)),
        };
        self.host.show_score(&score_text(game.score()));
        self.surface = Some(surface);
        self.game = Some(game);
        self.rounds_lost = 0;
        log::info!("Started {} on {}x{} surface", mode, width, height);

        if self.pending.is_some() {
            // The running loop picks up the new state on its next frame
            return Ok(None);
        }
        Ok(Some(self.issue_ticket()))
    }

    /// Stop the loop and discard game state. Safe to call when stopped.
    pub fn stop(&mut self) {
        self.pending = None;
        self.surface = None;
        if let Some(game) = self.game.take() {
            log::info!("Stopped {} at score {}", game.mode(), game.score());
        }
    }

    /// Frame callback. Steps and draws the active game, publishes the score,
    /// and returns the ticket for the next frame. Stale tickets do nothing.
    pub fn on_frame(&mut self, ticket: FrameTicket, now: f64) -> Option<FrameTicket> {
        if self.pending != Some(ticket) {
            return None;
        }
        self.pending = None;

        let (Some(game), Some(surface)) = (self.game.as_mut(), self.surface.as_mut()) else {
            return None;
        };
        match game {
            ActiveGame::Snake(state) => {
                match state.advance(now, &mut self.rng) {
                    Some(SnakeEvent::Reset) => self.rounds_lost += 1,
                    Some(SnakeEvent::Ate) => log::trace!("Snake ate, score {}", state.score),
                    _ => {}
                }
                draw_snake(surface, state);
            }
            ActiveGame::Paddle(state) => {
                let events = state.step(&self.input);
                if events.missed {
                    self.rounds_lost += 1;
                } else if events.paddle_hit {
                    log::trace!("Paddle hit, score {}", state.score);
                }
                draw_paddle(surface, state);
            }
        }
        let score = game.score();
        self.host.show_score(&score_text(score));

        Some(self.issue_ticket())
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
        if let Some(ActiveGame::Snake(state)) = self.game.as_mut() {
            if let Some(direction) = Direction::from_key(key) {
                state.steer(direction);
            }
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    fn issue_ticket(&mut self) -> FrameTicket {
        self.last_ticket += 1;
        let ticket = FrameTicket(self.last_ticket);
        self.pending = Some(ticket);
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessHost;
    use crate::renderer::DrawCommand;
    use crate::sim::{Cell, ScriptedRandom};
    use crate::sim::input::{KEY_RIGHT, KEY_UP};

    fn runtime() -> GameRuntime<HeadlessHost, ScriptedRandom> {
        GameRuntime::with_rng(
            HeadlessHost::new(400, 400),
            ArcadeConfig::default(),
            ScriptedRandom::new(vec![19]),
        )
    }

    fn snake(rt: &GameRuntime<HeadlessHost, ScriptedRandom>) -> &SnakeState {
        match rt.game() {
            Some(ActiveGame::Snake(state)) => state,
            other => panic!("expected snake, got {:?}", other),
        }
    }

    fn paddle(rt: &GameRuntime<HeadlessHost, ScriptedRandom>) -> &PaddleState {
        match rt.game() {
            Some(ActiveGame::Paddle(state)) => state,
            other => panic!("expected paddle, got {:?}", other),
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("snake".parse::<Mode>().unwrap(), Mode::Snake);
        assert_eq!("paddle".parse::<Mode>().unwrap(), Mode::Paddle);
        assert_eq!("pong".parse::<Mode>().unwrap(), Mode::Paddle);
        assert!(matches!("tetris".parse::<Mode>(), Err(ArcadeError::UnknownMode(m)) if m == "tetris"));
    }

    #[test]
    fn test_start_snake() {
        let mut rt = runtime();
        let ticket = rt.start("snake");
        assert!(ticket.is_some());
        assert!(rt.is_running());
        assert_eq!(rt.mode(), Some(Mode::Snake));
        assert_eq!(rt.host().score_text(), "Score: 0");
        assert_eq!(snake(&rt).body.len(), 3);
    }

    #[test]
    fn test_missing_surface_is_silent() {
        let mut rt = GameRuntime::new(HeadlessHost::unmounted(400, 400), ArcadeConfig::default(), 1);
        assert!(rt.start("snake").is_none());
        assert!(matches!(rt.try_start("snake"), Err(ArcadeError::SurfaceUnavailable)));
        assert_eq!(rt.mode(), None);
        assert!(!rt.is_running());
        assert_eq!(rt.host().score_updates(), 0);

        // Mounting later makes start work
        rt.host_mut().set_available(true);
        assert!(rt.start("snake").is_some());
    }

    #[test]
    fn test_zero_sized_surface_rejected() {
        let mut rt = GameRuntime::new(HeadlessHost::new(0, 400), ArcadeConfig::default(), 1);
        assert!(matches!(rt.try_start("paddle"), Err(ArcadeError::SurfaceUnavailable)));
        assert_eq!(rt.mode(), None);
    }

    #[test]
    fn test_unknown_mode_keeps_current_game() {
        let mut rt = runtime();
        let ticket = rt.start("paddle").unwrap();
        assert!(rt.start("tetris").is_none());
        assert_eq!(rt.mode(), Some(Mode::Paddle));
        assert!(rt.on_frame(ticket, 16.0).is_some());

        let mut idle = runtime();
        assert!(idle.start("tetris").is_none());
        assert!(!idle.is_running());
    }

    #[test]
    fn test_restart_same_mode_resets() {
        let mut rt = runtime();
        let mut ticket = rt.start("snake").unwrap();
        for i in 0..10 {
            ticket = rt.on_frame(ticket, i as f64 * 200.0).unwrap();
        }
        assert_ne!(snake(&rt).head(), Cell::new(5, 5));

        // Loop already running: no new ticket, old one stays valid
        assert!(rt.start("snake").is_none());
        let state = snake(&rt);
        assert_eq!(state.body.len(), 3);
        assert_eq!(state.head(), Cell::new(5, 5));
        assert_eq!(state.score, 0);
        assert!(rt.on_frame(ticket, 5000.0).is_some());
    }

    #[test]
    fn test_switch_mode_while_running() {
        let mut rt = runtime();
        let ticket = rt.start("snake").unwrap();
        let ticket = rt.on_frame(ticket, 0.0).unwrap();
        assert!(rt.start("pong").is_none());
        assert_eq!(rt.mode(), Some(Mode::Paddle));

        rt.on_frame(ticket, 16.0).unwrap();
        let last = rt.host().commands();
        assert!(matches!(last.last(), Some(DrawCommand::Circle { .. })));
    }

    #[test]
    fn test_stop_halts_draws_and_score_updates() {
        let mut rt = runtime();
        let first = rt.start("snake").unwrap();
        let second = rt.on_frame(first, 0.0).unwrap();
        let draws = rt.host().draw_count();
        let updates = rt.host().score_updates();
        assert!(draws > 0);

        rt.stop();
        assert_eq!(rt.mode(), None);
        assert!(!rt.is_running());

        assert!(rt.on_frame(second, 16.0).is_none());
        assert_eq!(rt.host().draw_count(), draws);
        assert_eq!(rt.host().score_updates(), updates);

        // Stopping twice is harmless
        rt.stop();
    }

    #[test]
    fn test_stale_ticket_after_restart() {
        let mut rt = runtime();
        let old = rt.start("snake").unwrap();
        rt.stop();
        let new = rt.start("snake").unwrap();
        assert_ne!(old, new);

        let draws = rt.host().draw_count();
        assert!(rt.on_frame(old, 16.0).is_none());
        assert_eq!(rt.host().draw_count(), draws);
        assert!(rt.on_frame(new, 16.0).is_some());
    }

    #[test]
    fn test_snake_frames_follow_interval() {
        let mut rt = runtime();
        let mut ticket = rt.start("snake").unwrap();
        for t in [1000.0, 1016.0, 1032.0] {
            ticket = rt.on_frame(ticket, t).unwrap();
        }
        // Redrawn every frame but not moved yet
        assert_eq!(snake(&rt).head(), Cell::new(5, 5));
        let clears = rt
            .host()
            .commands()
            .iter()
            .filter(|c| **c == DrawCommand::Clear)
            .count();
        assert_eq!(clears, 3);

        rt.on_frame(ticket, 1160.0).unwrap();
        let body: Vec<Cell> = snake(&rt).body.iter().copied().collect();
        assert_eq!(body, vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]);
        assert_eq!(rt.host().score_text(), "Score: 0");
    }

    #[test]
    fn test_rounds_lost_counts_collisions_and_misses() {
        let mut rt = runtime();
        let mut ticket = rt.start("snake").unwrap();
        // Heading right from (5,5) on a 20-column grid: the 15th step hits the wall
        for i in 0..=15 {
            ticket = rt.on_frame(ticket, i as f64 * 160.0).unwrap();
        }
        assert_eq!(rt.rounds_lost(), 1);
        assert_eq!(snake(&rt).head(), Cell::new(5, 5));

        // A fresh start clears the count
        rt.start("paddle");
        assert_eq!(rt.rounds_lost(), 0);
        let mut frames = 0;
        while rt.rounds_lost() == 0 && frames < 1000 {
            ticket = rt.on_frame(ticket, 5000.0 + frames as f64 * 16.0).unwrap();
            frames += 1;
        }
        assert_eq!(rt.rounds_lost(), 1);
        assert_eq!(paddle(&rt).score, 0);
    }

    #[test]
    fn test_snake_steers_on_key_down() {
        let mut rt = runtime();
        let ticket = rt.start("snake").unwrap();
        rt.key_down(KEY_UP);
        assert_eq!(snake(&rt).direction, Direction::Up);

        let ticket = rt.on_frame(ticket, 0.0).unwrap();
        rt.on_frame(ticket, 160.0).unwrap();
        assert_eq!(snake(&rt).head(), Cell::new(5, 4));
    }

    #[test]
    fn test_paddle_reads_held_keys() {
        let mut rt = runtime();
        let ticket = rt.start("paddle").unwrap();
        rt.key_down(KEY_RIGHT);
        let ticket = rt.on_frame(ticket, 0.0).unwrap();
        assert_eq!(paddle(&rt).x, 165.0);

        rt.key_up(KEY_RIGHT);
        rt.on_frame(ticket, 16.0).unwrap();
        assert_eq!(paddle(&rt).x, 165.0);
    }

    #[test]
    fn test_input_survives_restart() {
        let mut rt = runtime();
        rt.key_down(KEY_RIGHT);
        rt.start("paddle");
        rt.stop();
        let ticket = rt.start("paddle").unwrap();
        assert!(rt.input().is_held(KEY_RIGHT));
        rt.on_frame(ticket, 0.0).unwrap();
        assert_eq!(paddle(&rt).x, 165.0);
    }
}
