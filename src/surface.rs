//! The drawing operations the particle field needs from a 2D raster target.

use crate::color::Color;

pub trait DrawingSurface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_disk(&mut self, center: [f64; 2], radius: f64, color: &Color);
    fn line(&mut self, from: [f64; 2], to: [f64; 2], width: f64, color: &Color);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Disk {
        center: [f64; 2],
        radius: f64,
        color: Color,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        width: f64,
        color: Color,
    },
}

/// Keeps every draw call in order instead of rasterizing it. Lets the field
/// run without a browser.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn disks(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disk { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_disk(&mut self, center: [f64; 2], radius: f64, color: &Color) {
        self.commands.push(DrawCommand::Disk {
            center,
            radius,
            color: *color,
        });
    }

    fn line(&mut self, from: [f64; 2], to: [f64; 2], width: f64, color: &Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color: *color,
        });
    }
}

