//! Midpoint-smoothed centerline path.
//!
//! Used by the drawing canvas and the whiteboard: the path starts at the
//! first sample, draws a quadratic through each interior sample ending at
//! the midpoint to its successor, and closes with a straight segment to
//! the last sample. Stroked at constant width with round caps and joins.

use inkslate_core::StrokePoint;
use kurbo::{BezPath, Point};

/// Build the centerline path for a point sequence.
/// Fewer than two points renders nothing.
pub fn path(points: &[StrokePoint]) -> Option<BezPath> {
    if points.len() < 2 {
        return None;
    }

    let mut path = BezPath::new();
    path.move_to(Point::from(points[0]));

    for i in 1..points.len() - 1 {
        let current = Point::from(points[i]);
        let next = Point::from(points[i + 1]);
        let mid = current.midpoint(next);
        path.quad_to(current, mid);
    }

    let last = Point::from(points[points.len() - 1]);
    path.line_to(last);

    Some(path)
}
