//! Pressure-variable outline path.
//!
//! Used by the annotation overlay: the point sequence becomes a closed
//! filled ribbon whose half-width follows recorded pressure. The input is
//! streamlined toward the previous sample, radii are thinned by pressure,
//! positions are smoothed against their neighbors, and both ends get round
//! caps. Fixed tuning constants, no calibration.

use inkslate_core::StrokePoint;
use kurbo::{BezPath, Point, Vec2};

/// How strongly pressure narrows the ribbon.
pub const THINNING: f64 = 0.5;
/// Neighbor-averaging weight applied to interior points.
pub const SMOOTHING: f64 = 0.5;
/// Pull of each raw sample toward the previous accepted sample.
pub const STREAMLINE: f64 = 0.5;

/// Pressure assumed when the device reports none.
const DEFAULT_PRESSURE: f64 = 0.5;
/// Samples closer than this collapse into one; runs of identical points
/// must not produce degenerate directions.
const MIN_SAMPLE_DISTANCE: f64 = 0.01;
/// Points per round end cap.
const CAP_SEGMENTS: usize = 8;

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Compute the closed outline polygon for a point sequence.
/// Fewer than two distinct samples yields an empty outline.
pub fn outline(points: &[StrokePoint], size: f64) -> Vec<Point> {
    if points.len() < 2 {
        return Vec::new();
    }
    let half = size.max(1.0) / 2.0;

    // Streamline: each sample is pulled toward the previous accepted one,
    // and near-duplicates collapse.
    let mut centers: Vec<Point> = Vec::with_capacity(points.len());
    let mut pressures: Vec<f64> = Vec::with_capacity(points.len());
    for raw in points {
        let p = Point::new(raw.x, raw.y);
        let pressure = raw.pressure.unwrap_or(DEFAULT_PRESSURE).clamp(0.0, 1.0);
        match centers.last() {
            None => {
                centers.push(p);
                pressures.push(pressure);
            }
            Some(&prev) => {
                let streamlined = prev.lerp(p, 1.0 - STREAMLINE);
                if streamlined.distance(prev) >= MIN_SAMPLE_DISTANCE {
                    centers.push(streamlined);
                    pressures.push(pressure);
                }
            }
        }
    }
    if centers.len() < 2 {
        return Vec::new();
    }

    // Smooth interior positions against their neighbors.
    if centers.len() > 2 {
        let snapshot = centers.clone();
        for i in 1..snapshot.len() - 1 {
            let mid = snapshot[i - 1].midpoint(snapshot[i + 1]);
            centers[i] = snapshot[i].lerp(mid, SMOOTHING);
        }
    }

    // Pressure-thinned radius per sample.
    let radii: Vec<f64> = pressures
        .iter()
        .map(|&p| half * lerp(1.0 - THINNING, 1.0, p))
        .collect();

    // Forward direction per sample; a zero-length tail reuses the last
    // valid direction.
    let n = centers.len();
    let mut dirs: Vec<Vec2> = Vec::with_capacity(n);
    for i in 0..n {
        let d = if i < n - 1 {
            centers[i + 1] - centers[i]
        } else {
            centers[i] - centers[i - 1]
        };
        if d.hypot() >= MIN_SAMPLE_DISTANCE {
            dirs.push(d / d.hypot());
        } else {
            dirs.push(dirs.last().copied().unwrap_or(Vec2::new(1.0, 0.0)));
        }
    }

    let perp = |dir: Vec2| Vec2::new(-dir.y, dir.x);

    // Left edge forward, round end cap, right edge backward, round start
    // cap; winding stays consistent for a plain fill.
    let mut out: Vec<Point> = Vec::with_capacity(2 * n + 2 * CAP_SEGMENTS);
    for i in 0..n {
        out.push(centers[i] + perp(dirs[i]) * radii[i]);
    }
    let end = centers[n - 1];
    let end_vec = perp(dirs[n - 1]) * radii[n - 1];
    for step in 1..CAP_SEGMENTS {
        let angle = -std::f64::consts::PI * step as f64 / CAP_SEGMENTS as f64;
        out.push(end + rotate(end_vec, angle));
    }
    for i in (0..n).rev() {
        out.push(centers[i] - perp(dirs[i]) * radii[i]);
    }
    let start = centers[0];
    let start_vec = -perp(dirs[0]) * radii[0];
    for step in 1..CAP_SEGMENTS {
        let angle = -std::f64::consts::PI * step as f64 / CAP_SEGMENTS as f64;
        out.push(start + rotate(start_vec, angle));
    }

    out
}

/// Build the filled outline path for a point sequence.
/// An empty outline renders nothing.
pub fn path(points: &[StrokePoint], size: f64) -> Option<BezPath> {
    let out = outline(points, size);
    if out.len() < 3 {
        return None;
    }

    // Quadratics through successive midpoints keep the polygon smooth.
    let n = out.len();
    let mut path = BezPath::new();
    path.move_to(out[0]);
    for i in 1..n {
        let next = out[(i + 1) % n];
        path.quad_to(out[i], out[i].midpoint(next));
    }
    path.close_path();
    Some(path)
}
