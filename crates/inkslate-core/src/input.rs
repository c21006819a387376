//! Pointer event routing for a drawing region.
//!
//! The only concurrency control in the engine lives here: a surface
//! captures the pointer id that started a gesture and ignores every other
//! pointer until release, mirroring DOM `setPointerCapture`. Without this
//! a second simultaneous touch would corrupt the in-progress stroke.

use crate::stroke::StrokePoint;
use crate::surface::Surface;
use crate::tools::ToolSettings;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Platform pointer identifier (mouse, finger, or pen contact).
pub type PointerId = u64;

/// Pointer events as delivered by the host UI, in client coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        pressure: Option<f64>,
        pointer: PointerId,
    },
    Move {
        position: Point,
        pressure: Option<f64>,
        pointer: PointerId,
    },
    Up {
        pointer: PointerId,
    },
    /// The pointer left the drawing region. Treated exactly like `Up` so
    /// a stroke is never left dangling.
    Leave {
        pointer: PointerId,
    },
}

/// Convert a client-coordinate position to a surface-local point.
///
/// The mapping is a plain subtraction of the region origin, 1:1 device
/// pixels. A detached or unmeasured region reports a non-finite origin;
/// that degenerates to the origin point rather than failing.
pub fn to_surface_point(position: Point, origin: Point, pressure: Option<f64>) -> StrokePoint {
    let p = StrokePoint {
        x: position.x - origin.x,
        y: position.y - origin.y,
        pressure,
    };
    p.sanitized()
}

/// Routes pointer events into one surface's capture state machine while
/// holding exclusive capture of the initiating pointer.
#[derive(Debug, Clone, Default)]
pub struct PointerRouter {
    /// Origin of the drawing region in client coordinates.
    pub origin: Point,
    active: Option<PointerId>,
}

impl PointerRouter {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            active: None,
        }
    }

    /// The pointer currently captured, if a gesture is in flight.
    pub fn captured(&self) -> Option<PointerId> {
        self.active
    }

    /// Feed one event through to the surface. Returns true when the event
    /// was consumed; events from non-captured pointers are dropped.
    pub fn route(
        &mut self,
        surface: &mut Surface,
        settings: &ToolSettings,
        event: PointerEvent,
    ) -> bool {
        match event {
            PointerEvent::Down {
                position,
                pressure,
                pointer,
            } => {
                if self.active.is_some() {
                    // A second concurrent contact; the first keeps capture.
                    return false;
                }
                self.active = Some(pointer);
                let point = to_surface_point(position, self.origin, pressure);
                surface.start(point, &settings.effective_brush(), settings.tool);
                true
            }
            PointerEvent::Move {
                position,
                pressure,
                pointer,
            } => {
                if self.active != Some(pointer) {
                    return false;
                }
                surface.extend(to_surface_point(position, self.origin, pressure));
                true
            }
            PointerEvent::Up { pointer } | PointerEvent::Leave { pointer } => {
                if self.active != Some(pointer) {
                    return false;
                }
                self.active = None;
                surface.commit();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    fn down(pointer: PointerId, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            pressure: Some(0.5),
            pointer,
        }
    }

    fn mv(pointer: PointerId, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
            pressure: Some(0.5),
            pointer,
        }
    }

    #[test]
    fn test_full_gesture() {
        let mut surface = Surface::whiteboard_page();
        let mut router = PointerRouter::new(Point::new(100.0, 50.0));
        let settings = ToolSettings::new();

        assert!(router.route(&mut surface, &settings, down(1, 100.0, 50.0)));
        assert!(router.route(&mut surface, &settings, mv(1, 110.0, 50.0)));
        assert!(router.route(&mut surface, &settings, mv(1, 110.0, 60.0)));
        assert!(router.route(&mut surface, &settings, PointerEvent::Up { pointer: 1 }));

        assert_eq!(surface.strokes().len(), 1);
        // Local coordinates: client minus origin.
        assert_eq!(surface.strokes()[0].points[0], StrokePoint::with_pressure(0.0, 0.0, 0.5));
        assert_eq!(surface.strokes()[0].points[2], StrokePoint::with_pressure(10.0, 10.0, 0.5));
        assert!(router.captured().is_none());
    }

    #[test]
    fn test_second_pointer_is_ignored_while_captured() {
        let mut surface = Surface::whiteboard_page();
        let mut router = PointerRouter::default();
        let settings = ToolSettings::new();

        router.route(&mut surface, &settings, down(1, 0.0, 0.0));
        // A second finger touches mid-gesture.
        assert!(!router.route(&mut surface, &settings, down(2, 500.0, 500.0)));
        assert!(!router.route(&mut surface, &settings, mv(2, 510.0, 500.0)));
        assert!(!router.route(&mut surface, &settings, PointerEvent::Up { pointer: 2 }));
        assert_eq!(router.captured(), Some(1));

        router.route(&mut surface, &settings, mv(1, 10.0, 10.0));
        router.route(&mut surface, &settings, PointerEvent::Up { pointer: 1 });

        assert_eq!(surface.strokes().len(), 1);
        assert_eq!(surface.strokes()[0].len(), 2);
    }

    #[test]
    fn test_leave_commits_like_up() {
        let mut surface = Surface::whiteboard_page();
        let mut router = PointerRouter::default();
        let settings = ToolSettings::new();

        router.route(&mut surface, &settings, down(7, 0.0, 0.0));
        router.route(&mut surface, &settings, mv(7, 10.0, 0.0));
        assert!(router.route(&mut surface, &settings, PointerEvent::Leave { pointer: 7 }));

        assert_eq!(surface.strokes().len(), 1);
        assert!(!surface.is_capturing());
    }

    #[test]
    fn test_eraser_tool_routes_policy_stroke() {
        let mut surface = Surface::drawing_canvas();
        let mut router = PointerRouter::default();
        let mut settings = ToolSettings::new();
        settings.set_tool(ToolKind::Eraser);

        router.route(&mut surface, &settings, down(1, 0.0, 0.0));
        router.route(&mut surface, &settings, mv(1, 5.0, 5.0));
        router.route(&mut surface, &settings, PointerEvent::Up { pointer: 1 });

        let stroke = &surface.strokes()[0];
        assert!(stroke.is_eraser);
        assert_eq!(stroke.size, crate::tools::CANVAS_ERASER_WIDTH);
    }

    #[test]
    fn test_nonfinite_origin_degenerates_to_origin_point() {
        let p = to_surface_point(Point::new(10.0, 10.0), Point::new(f64::NAN, f64::NAN), None);
        assert_eq!(p, StrokePoint::new(0.0, 0.0));
    }
}
