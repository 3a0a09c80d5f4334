//! Surface that records draw calls instead of rasterizing
//!
//! The command log is shared, so a host can keep a handle to it after the
//! runtime takes ownership of the surface.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use super::{Rgb, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect { x: f32, y: f32, w: f32, h: f32, color: Rgb },
    Circle { center: Vec2, radius: f32, color: Rgb },
}

pub type DrawLog = Rc<RefCell<Vec<DrawCommand>>>;

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    log: DrawLog,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_log(width, height, DrawLog::default())
    }

    pub fn with_log(width: u32, height: u32, log: DrawLog) -> Self {
        Self { width, height, log }
    }

    pub fn log(&self) -> DrawLog {
        self.log.clone()
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.log.borrow().clone()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.log.borrow_mut().push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.log.borrow_mut().push(DrawCommand::Rect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.log
            .borrow_mut()
            .push(DrawCommand::Circle { center, radius, color });
    }
}
