//! Inkslate Render Library
//!
//! Turns surfaces into drawable vector paths. Two algorithms exist; each
//! surface type uses exactly one: the drawing canvas and whiteboard stroke
//! a midpoint-smoothed centerline, the annotation overlay fills a
//! pressure-variable outline. The renderer is a pure function of the
//! committed and in-progress stroke lists.

pub mod centerline;
pub mod outline;

use inkslate_core::{Stroke, Surface};
use kurbo::BezPath;
use peniko::Color;

/// Path construction algorithm for a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeAlgorithm {
    /// Constant-width stroked centerline with round caps and joins.
    #[default]
    Centerline,
    /// Pressure-variable closed outline, filled.
    PressureOutline,
}

/// How a path should be painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    Fill,
    Stroke { width: f64 },
}

/// One drawable path with its paint.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub path: BezPath,
    pub color: Color,
    pub style: PaintStyle,
}

/// Build the draw command for one stroke, if it produces any geometry.
pub fn stroke_command(stroke: &Stroke, algorithm: StrokeAlgorithm) -> Option<DrawCommand> {
    match algorithm {
        StrokeAlgorithm::Centerline => {
            let path = centerline::path(&stroke.points)?;
            Some(DrawCommand {
                path,
                color: stroke.color.into(),
                style: PaintStyle::Stroke {
                    width: stroke.size,
                },
            })
        }
        StrokeAlgorithm::PressureOutline => {
            let path = outline::path(&stroke.points, stroke.size)?;
            Some(DrawCommand {
                path,
                color: stroke.color.into(),
                style: PaintStyle::Fill,
            })
        }
    }
}

/// Render a surface: every committed stroke in commit order (later strokes
/// on top), then the in-progress stroke. A true-delete eraser gesture has
/// no visual of its own and is skipped.
pub fn render_surface(surface: &Surface, algorithm: StrokeAlgorithm) -> Vec<DrawCommand> {
    let mut commands: Vec<DrawCommand> = surface
        .strokes()
        .iter()
        .filter_map(|stroke| stroke_command(stroke, algorithm))
        .collect();

    if let Some(current) = surface.in_progress() {
        let invisible = current.is_eraser && current.color.is_transparent();
        if !invisible {
            commands.extend(stroke_command(current, algorithm));
        }
    }

    commands
}
