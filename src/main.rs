//! Micro Arcade entry point
//!
//! On the web this boots the browser driver. Natively it runs both games
//! headless for a few seconds of simulated frames and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    micro_arcade::platform::web::boot();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// ~60 Hz display
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 1000.0 / 60.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use micro_arcade::ArcadeConfig;

    env_logger::init();
    log::info!("Micro Arcade (native) starting...");

    // Usage: micro-arcade [config.json] [seed]
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match ArcadeConfig::from_json(&json) {
                Ok(config) => config,
                Err(err) => {
                    log::error!("{}: {}", path, err);
                    return std::process::ExitCode::FAILURE;
                }
            },
            Err(err) => {
                log::error!("Failed to read {}: {}", path, err);
                return std::process::ExitCode::FAILURE;
            }
        },
        None => ArcadeConfig::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    demo::run_snake(&config, seed, 1800);
    demo::run_paddle(&config, seed, 1800);
    std::process::ExitCode::SUCCESS
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use micro_arcade::platform::HeadlessHost;
    use micro_arcade::runtime::ActiveGame;
    use micro_arcade::sim::Direction;
    use micro_arcade::sim::input::{KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP};
    use micro_arcade::{ArcadeConfig, GameRuntime};

    use super::FRAME_MS;

    type Runtime = GameRuntime<HeadlessHost>;

    fn drive(rt: &mut Runtime, mode: &str, frames: u32, mut before_frame: impl FnMut(&mut Runtime)) {
        let Some(mut ticket) = rt.start(mode) else {
            log::error!("Could not start {}", mode);
            return;
        };
        for frame in 0..frames {
            before_frame(rt);
            match rt.on_frame(ticket, frame as f64 * FRAME_MS) {
                Some(next) => ticket = next,
                None => break,
            }
        }
    }

    fn report(rt: &Runtime) {
        log::info!(
            "{} draw calls, {} score updates, {} rounds lost, last readout {:?}",
            rt.host().draw_count(),
            rt.host().score_updates(),
            rt.rounds_lost(),
            rt.host().score_text()
        );
        let snapshot = match rt.game() {
            Some(ActiveGame::Snake(state)) => serde_json::to_string(state),
            Some(ActiveGame::Paddle(state)) => serde_json::to_string(state),
            None => return,
        };
        match snapshot {
            Ok(json) => log::debug!("Final state: {}", json),
            Err(err) => log::warn!("Could not serialize state: {}", err),
        }
    }

    /// Snake chasing its food along the grid
    pub fn run_snake(config: &ArcadeConfig, seed: u64, frames: u32) {
        let mut rt = Runtime::new(HeadlessHost::new(400, 400), config.clone(), seed);
        drive(&mut rt, "snake", frames, |rt| {
            let Some(ActiveGame::Snake(state)) = rt.game() else {
                return;
            };
            let (head, food) = (state.head(), state.food);
            let wanted = if food.x > head.x {
                Direction::Right
            } else if food.x < head.x {
                Direction::Left
            } else if food.y > head.y {
                Direction::Down
            } else {
                Direction::Up
            };
            let key = match wanted {
                Direction::Up => KEY_UP,
                Direction::Down => KEY_DOWN,
                Direction::Left => KEY_LEFT,
                Direction::Right => KEY_RIGHT,
            };
            rt.key_down(key);
            rt.key_up(key);
        });
        log::info!("Snake finished with score {}", rt.game().map_or(0, ActiveGame::score));
        report(&rt);
        rt.stop();
    }

    /// Paddle tracking the ball
    pub fn run_paddle(config: &ArcadeConfig, seed: u64, frames: u32) {
        let mut rt = Runtime::new(HeadlessHost::new(400, 300), config.clone(), seed);
        drive(&mut rt, "paddle", frames, |rt| {
            let Some(ActiveGame::Paddle(state)) = rt.game() else {
                return;
            };
            let center = state.x + state.width / 2.0;
            let ball_x = state.ball.pos.x;
            rt.key_up(KEY_LEFT);
            rt.key_up(KEY_RIGHT);
            if ball_x < center - 4.0 {
                rt.key_down(KEY_LEFT);
            } else if ball_x > center + 4.0 {
                rt.key_down(KEY_RIGHT);
            }
        });
        log::info!("Paddle finished with score {}", rt.game().map_or(0, ActiveGame::score));
        report(&rt);
        rt.stop();
    }
}
