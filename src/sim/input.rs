//! Held-key table
//!
//! Written by key handlers between frames, read by the paddle step.

use std::collections::HashMap;

pub const KEY_UP: &str = "ArrowUp";
pub const KEY_DOWN: &str = "ArrowDown";
pub const KEY_LEFT: &str = "ArrowLeft";
pub const KEY_RIGHT: &str = "ArrowRight";

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.set(key, true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.set(key, false);
    }

    /// Unknown keys read as released
    pub fn is_held(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    fn set(&mut self, key: &str, held: bool) {
        match self.held.get_mut(key) {
            Some(flag) => *flag = held,
            None => {
                self.held.insert(key.to_string(), held);
            }
        }
    }
}
