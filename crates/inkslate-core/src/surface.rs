//! One independently drawable surface: capture state machine, committed
//! stroke history, undo/redo and eraser semantics.

use crate::stroke::{Rgba, Stroke, StrokePoint};
use crate::tools::{
    Brush, CANVAS_ERASER_WIDTH, BOARD_ERASER_WIDTH, OVERLAY_ERASE_RADIUS, ToolKind,
};
use serde::{Deserialize, Serialize};

/// How the eraser tool behaves on a surface. Fixed at construction;
/// the two policies give different undo semantics, so a surface never
/// mixes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EraserPolicy {
    /// The eraser commits a wide background-colored stroke. Underlying
    /// strokes stay in history and undo removes the cover stroke.
    PaintOver { background: Rgba, width: f64 },
    /// Erasing structurally removes any committed stroke with a sample
    /// within `radius` of the pointer, incrementally during the gesture.
    TrueDelete { radius: f64 },
}

/// A drawable region with its own stroke history.
///
/// Capture is a two-state machine: idle (no in-progress stroke) and
/// capturing. Pointer-down starts a stroke, pointer-move extends it,
/// pointer-up or pointer-leave commits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    committed: Vec<Stroke>,
    #[serde(skip)]
    redo_stack: Vec<Stroke>,
    #[serde(skip)]
    in_progress: Option<Stroke>,
    eraser_policy: EraserPolicy,
}

impl Default for Surface {
    fn default() -> Self {
        Self::drawing_canvas()
    }
}

impl Surface {
    pub fn new(eraser_policy: EraserPolicy) -> Self {
        Self {
            committed: Vec::new(),
            redo_stack: Vec::new(),
            in_progress: None,
            eraser_policy,
        }
    }

    /// Small inline drawing canvas: paint-over eraser on white, 20px.
    pub fn drawing_canvas() -> Self {
        Self::new(EraserPolicy::PaintOver {
            background: Rgba::WHITE,
            width: CANVAS_ERASER_WIDTH,
        })
    }

    /// Whiteboard page: paint-over eraser on white, 50px.
    pub fn whiteboard_page() -> Self {
        Self::new(EraserPolicy::PaintOver {
            background: Rgba::WHITE,
            width: BOARD_ERASER_WIDTH,
        })
    }

    /// PDF annotation overlay: true-delete eraser, 20px radius.
    pub fn annotation_overlay() -> Self {
        Self::new(EraserPolicy::TrueDelete {
            radius: OVERLAY_ERASE_RADIUS,
        })
    }

    pub fn eraser_policy(&self) -> EraserPolicy {
        self.eraser_policy
    }

    /// Begin capturing a stroke at `point`.
    ///
    /// Clears the redo stack immediately: any new edit invalidates redo
    /// history. If a previous gesture was never released (device glitch),
    /// the dangling stroke is force-committed first so it is not lost.
    pub fn start(&mut self, point: StrokePoint, brush: &Brush, tool: ToolKind) {
        if self.in_progress.is_some() {
            log::warn!("pointer-down while capturing; committing dangling stroke");
            self.commit();
        }
        self.redo_stack.clear();

        let point = point.sanitized();
        let stroke = match tool {
            ToolKind::Pen => Stroke::pen(point, brush.color, brush.size),
            ToolKind::Eraser => match self.eraser_policy {
                EraserPolicy::PaintOver { background, width } => {
                    Stroke::eraser(point, background, width)
                }
                EraserPolicy::TrueDelete { radius } => {
                    Stroke::eraser(point, Rgba::TRANSPARENT, radius)
                }
            },
        };
        self.in_progress = Some(stroke);
    }

    /// Append a point to the in-progress stroke. No-op when idle.
    ///
    /// In true-delete eraser mode this also filters committed strokes
    /// around the pointer, so deletion happens live during the gesture.
    pub fn extend(&mut self, point: StrokePoint) {
        let Some(stroke) = self.in_progress.as_mut() else {
            return;
        };
        let point = point.sanitized();
        stroke.push_point(point);

        if stroke.is_eraser {
            if let EraserPolicy::TrueDelete { radius } = self.eraser_policy {
                self.committed
                    .retain(|s| !s.any_point_within(&point, radius));
            }
        }
    }

    /// Finish the gesture (pointer-up, or pointer leaving the region).
    ///
    /// A pen or paint-over eraser stroke with at least two points joins
    /// the committed history; a single-point stroke renders nothing and is
    /// dropped. A true-delete eraser stroke is always discarded, its work
    /// already happened during `extend`. Returns whether a stroke was
    /// committed.
    pub fn commit(&mut self) -> bool {
        let Some(stroke) = self.in_progress.take() else {
            return false;
        };
        if stroke.is_eraser && matches!(self.eraser_policy, EraserPolicy::TrueDelete { .. }) {
            return false;
        }
        if stroke.len() < 2 {
            return false;
        }
        self.committed.push(stroke);
        true
    }

    pub fn is_capturing(&self) -> bool {
        self.in_progress.is_some()
    }

    pub fn in_progress(&self) -> Option<&Stroke> {
        self.in_progress.as_ref()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Replace the committed history, e.g. with preloaded strokes.
    /// Redo history does not survive a reload.
    pub fn set_strokes(&mut self, strokes: Vec<Stroke>) {
        self.committed = strokes;
        self.redo_stack.clear();
    }

    /// Move the most recent stroke onto the redo stack.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(stroke) = self.committed.pop() {
            self.redo_stack.push(stroke);
            true
        } else {
            false
        }
    }

    /// Restore the most recently undone stroke.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(stroke) = self.redo_stack.pop() {
            self.committed.push(stroke);
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop all committed strokes and redo history. Unconditional;
    /// confirmation prompts belong to the caller.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.redo_stack.clear();
    }
}
