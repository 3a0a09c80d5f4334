//! In-memory host for native runs and tests

use super::Host;
use crate::renderer::recording::DrawLog;
use crate::renderer::{DrawCommand, RecordingSurface};

#[derive(Debug)]
pub struct HeadlessHost {
    width: u32,
    height: u32,
    /// Whether the "canvas" is mounted
    available: bool,
    log: DrawLog,
    score_text: String,
    score_updates: usize,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            available: true,
            log: DrawLog::default(),
            score_text: String::new(),
            score_updates: 0,
        }
    }

    /// Host whose surface has not been mounted yet
    pub fn unmounted(width: u32, height: u32) -> Self {
        Self {
            available: false,
            ..Self::new(width, height)
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Every draw call made on any surface this host handed out
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.log.borrow().clone()
    }

    pub fn draw_count(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    pub fn score_updates(&self) -> usize {
        self.score_updates
    }
}

impl Host for HeadlessHost {
    type Surface = RecordingSurface;

    fn acquire_surface(&mut self) -> Option<RecordingSurface> {
        self.available
            .then(|| RecordingSurface::with_log(self.width, self.height, self.log.clone()))
    }

    fn show_score(&mut self, text: &str) {
        self.score_text.clear();
        self.score_text.push_str(text);
        self.score_updates += 1;
    }
}
