//! Tool selection and brush settings for a drawing region.

use crate::stroke::Rgba;
use serde::{Deserialize, Serialize};

/// Default pen width in pixels.
pub const PEN_SIZE: f64 = 4.0;

/// Paint-over eraser width on the small drawing canvas.
pub const CANVAS_ERASER_WIDTH: f64 = 20.0;

/// Paint-over eraser width on the whiteboard.
pub const BOARD_ERASER_WIDTH: f64 = 50.0;

/// True-delete eraser radius on the PDF annotation overlay.
pub const OVERLAY_ERASE_RADIUS: f64 = 20.0;

/// Radius of the dashed eraser cursor circle hosts may display.
pub const ERASER_CURSOR_RADIUS: f64 = 25.0;

/// Palette offered on the drawing canvas.
pub const CANVAS_PALETTE: [Rgba; 4] = [
    Rgba::BLACK,
    Rgba::rgb(0xEF, 0x44, 0x44),
    Rgba::rgb(0x22, 0xC5, 0x5E),
    Rgba::rgb(0x3B, 0x82, 0xF6),
];

/// Palette offered on the whiteboard (black and red only).
pub const BOARD_PALETTE: [Rgba; 2] = [Rgba::BLACK, Rgba::rgb(0xEF, 0x44, 0x44)];

/// Palette offered on the annotation overlay (correction red and blue).
pub const OVERLAY_PALETTE: [Rgba; 2] = [Rgba::rgb(0xEF, 0x44, 0x44), Rgba::rgb(0x3B, 0x82, 0xF6)];

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
}

/// Pen color and width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub color: Rgba,
    pub size: f64,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            size: PEN_SIZE,
        }
    }
}

impl Brush {
    pub fn new(color: Rgba, size: f64) -> Self {
        Self { color, size }
    }
}

/// Per-region tool state: the active tool, the brush, and whether the
/// region runs in "simple" mode (single color, reduced toolbar).
#[derive(Debug, Clone, Default)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub brush: Brush,
    pub simple: bool,
}

impl ToolSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn simple() -> Self {
        Self {
            simple: true,
            ..Self::default()
        }
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    /// Pick a pen color. Ignored in simple mode, which is always black.
    pub fn set_color(&mut self, color: Rgba) {
        if !self.simple {
            self.brush.color = color;
        }
    }

    /// The brush the capture state machine should draw with, with the
    /// simple-mode color restriction applied.
    pub fn effective_brush(&self) -> Brush {
        if self.simple {
            Brush {
                color: Rgba::BLACK,
                size: self.brush.size,
            }
        } else {
            self.brush
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brush() {
        let brush = Brush::default();
        assert_eq!(brush.color, Rgba::BLACK);
        assert_eq!(brush.size, PEN_SIZE);
    }

    #[test]
    fn test_simple_mode_forces_black() {
        let mut settings = ToolSettings::simple();
        settings.set_color(Rgba::rgb(0xEF, 0x44, 0x44));
        assert_eq!(settings.effective_brush().color, Rgba::BLACK);

        let mut full = ToolSettings::new();
        full.set_color(Rgba::rgb(0xEF, 0x44, 0x44));
        assert_eq!(full.effective_brush().color, Rgba::rgb(0xEF, 0x44, 0x44));
    }
}
