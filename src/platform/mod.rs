//! Platform abstraction layer
//!
//! The runtime only needs two things from the page it lives in:
//! - A drawing surface (which may not exist yet)
//! - Somewhere to show the score text

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::HeadlessHost;

use crate::renderer::Surface;

pub trait Host {
    type Surface: Surface;

    /// Fresh handle to the drawing surface, or `None` if it is not mounted
    fn acquire_surface(&mut self) -> Option<Self::Surface>;

    /// Replace the score readout text
    fn show_score(&mut self, text: &str);
}
