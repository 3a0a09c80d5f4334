//! Game simulation module
//!
//! All gameplay rules live here. Nothing in this module draws or talks to the
//! browser:
//! - Snake steps on a fixed interval of frame time
//! - Paddle steps once per frame
//! - Randomness comes in through `RandomSource`

pub mod input;
pub mod paddle;
pub mod rng;
pub mod snake;

pub use input::InputState;
pub use paddle::{Ball, PaddleEvents, PaddleState};
#[cfg(test)]
pub use rng::ScriptedRandom;
pub use rng::{RandomSource, seeded};
pub use snake::{Cell, Direction, INITIAL_BODY, SnakeEvent, SnakeState};
