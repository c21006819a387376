//! Stroke and point model shared by every drawable surface.

use peniko::Color;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Serializable RGBA color, persisted as a CSS-style hex string
/// (`"#rrggbb"`, `"#rrggbbaa"` when translucent, or `"transparent"`).
/// This matches the color strings the board has always persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse a hex color string. Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`
    /// and `transparent`; anything unrecognized falls back to black so a
    /// corrupted field never takes the surface down.
    pub fn parse(color: &str) -> Self {
        let color = color.trim();
        if color.eq_ignore_ascii_case("transparent") {
            return Self::TRANSPARENT;
        }

        if let Some(hex) = color.strip_prefix('#') {
            match hex.len() {
                3 => {
                    // #rgb -> #rrggbb
                    let r = u8::from_str_radix(&hex[0..1], 16).unwrap_or(0) * 17;
                    let g = u8::from_str_radix(&hex[1..2], 16).unwrap_or(0) * 17;
                    let b = u8::from_str_radix(&hex[2..3], 16).unwrap_or(0) * 17;
                    return Self::rgb(r, g, b);
                }
                6 => {
                    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                    return Self::rgb(r, g, b);
                }
                8 => {
                    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                    let a = u8::from_str_radix(&hex[6..8], 16).unwrap_or(255);
                    return Self::new(r, g, b, a);
                }
                _ => {}
            }
        }

        Self::BLACK
    }

    /// Format as the canonical persisted string.
    pub fn to_hex(&self) -> String {
        if self.a == 0 {
            "transparent".to_string()
        } else if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

struct RgbaVisitor;

impl<'de> Visitor<'de> for RgbaVisitor {
    type Value = Rgba;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a hex color string like \"#rrggbb\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Rgba, E> {
        Ok(Rgba::parse(v))
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(RgbaVisitor)
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A single pointer sample in surface-local pixel coordinates.
///
/// Coordinates come straight from the pointer event minus the surface
/// origin; no DPI or zoom correction is applied. Pressure is the raw
/// device value when the hardware reports one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: None,
        }
    }

    pub fn with_pressure(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            x,
            y,
            pressure: Some(pressure),
        }
    }

    /// Replace non-finite coordinates with the origin. A degenerate point
    /// is preferable to poisoning downstream geometry with NaN.
    pub fn sanitized(self) -> Self {
        Self {
            x: if self.x.is_finite() { self.x } else { 0.0 },
            y: if self.y.is_finite() { self.y } else { 0.0 },
            pressure: self.pressure.filter(|p| p.is_finite()),
        }
    }

    pub fn distance_to(&self, other: &StrokePoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<StrokePoint> for kurbo::Point {
    fn from(p: StrokePoint) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}

/// One continuous drawn gesture, from pointer-down to pointer-up.
///
/// Serialized field names match the board's historical JSON shape so old
/// persisted drawings keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    /// Ordered pointer samples.
    pub points: Vec<StrokePoint>,
    /// Stroke color (background color for paint-over eraser strokes).
    pub color: Rgba,
    /// Stroke width in pixels.
    pub size: f64,
    /// Whether this gesture was made with the eraser tool.
    pub is_eraser: bool,
}

impl Stroke {
    /// Start a pen stroke at a single point.
    pub fn pen(start: StrokePoint, color: Rgba, size: f64) -> Self {
        Self {
            points: vec![start],
            color,
            size,
            is_eraser: false,
        }
    }

    /// Start an eraser stroke at a single point.
    pub fn eraser(start: StrokePoint, color: Rgba, size: f64) -> Self {
        Self {
            points: vec![start],
            color,
            size,
            is_eraser: true,
        }
    }

    pub fn push_point(&mut self, point: StrokePoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether any stored sample lies within `radius` of `point`.
    /// This is the eraser hit-test: O(points), fine at classroom scale.
    pub fn any_point_within(&self, point: &StrokePoint, radius: f64) -> bool {
        self.points.iter().any(|p| p.distance_to(point) < radius)
    }
}

/// Distance from a point to a line segment (a -> b).
pub fn point_to_segment_dist(point: kurbo::Point, a: kurbo::Point, b: kurbo::Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = kurbo::Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(Rgba::parse("#EF4444"), Rgba::rgb(0xEF, 0x44, 0x44));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(Rgba::parse("#f00"), Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_parse_transparent() {
        assert!(Rgba::parse("transparent").is_transparent());
    }

    #[test]
    fn test_parse_garbage_falls_back_to_black() {
        assert_eq!(Rgba::parse("not-a-color"), Rgba::BLACK);
        assert_eq!(Rgba::parse("#zz0011"), Rgba::rgb(0, 0, 0x11));
    }

    #[test]
    fn test_color_hex_round_trip() {
        for color in [
            Rgba::BLACK,
            Rgba::WHITE,
            Rgba::TRANSPARENT,
            Rgba::rgb(0x3B, 0x82, 0xF6),
            Rgba::new(0x22, 0xC5, 0x5E, 0x80),
        ] {
            assert_eq!(Rgba::parse(&color.to_hex()), color);
        }
    }

    #[test]
    fn test_point_sanitized() {
        let p = StrokePoint::with_pressure(f64::NAN, f64::INFINITY, f64::NAN).sanitized();
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
        assert!(p.pressure.is_none());

        let ok = StrokePoint::with_pressure(3.0, 4.0, 0.5).sanitized();
        assert_eq!(ok, StrokePoint::with_pressure(3.0, 4.0, 0.5));
    }

    #[test]
    fn test_stroke_json_shape() {
        let stroke = Stroke::pen(StrokePoint::new(1.0, 2.0), Rgba::rgb(0xEF, 0x44, 0x44), 4.0);
        let json = serde_json::to_string(&stroke).unwrap();
        assert!(json.contains("\"isEraser\":false"));
        assert!(json.contains("\"#ef4444\""));
        assert!(!json.contains("pressure"));
    }

    #[test]
    fn test_eraser_hit_test() {
        let mut stroke = Stroke::pen(StrokePoint::new(10.0, 10.0), Rgba::BLACK, 4.0);
        stroke.push_point(StrokePoint::new(100.0, 100.0));

        assert!(stroke.any_point_within(&StrokePoint::new(12.0, 10.0), 20.0));
        assert!(!stroke.any_point_within(&StrokePoint::new(1000.0, 1000.0), 20.0));
    }

    #[test]
    fn test_point_to_segment_dist() {
        let a = kurbo::Point::new(0.0, 0.0);
        let b = kurbo::Point::new(100.0, 0.0);
        assert!((point_to_segment_dist(kurbo::Point::new(50.0, 10.0), a, b) - 10.0).abs() < 1e-9);
        // Degenerate segment
        assert!((point_to_segment_dist(kurbo::Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-9);
    }
}
