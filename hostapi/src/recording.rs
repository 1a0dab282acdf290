//! Command-recording drawing surface for testing.
//!
//! `RecordingSurface` keeps every [`DrawCommand`] in call order and tracks
//! the surface size the way a canvas would, so `fill_all` and guests that
//! read back dimensions behave normally.

use crate::canvas::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::traits::DrawingSurface;
use crate::types::DrawCommand;

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            commands: Vec::new(),
        }
    }

    /// Commands recorded since creation or the last `take_commands`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::SetFillStyle(style.to_string()));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.commands.push(DrawCommand::SetStrokeStyle(style.to_string()));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h });
    }

    fn fill_all(&mut self) {
        self.commands.push(DrawCommand::FillAll);
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commands.push(DrawCommand::DrawLine { x1, y1, x2, y2 });
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
