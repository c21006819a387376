//! Stroke list to persisted string and back.
//!
//! An empty stroke list serializes to the empty string, not `"[]"`; the
//! sentinel tells the consumer the surface was explicitly cleared.
//! Malformed input on load soft-fails to an empty list so a bad persisted
//! value can never take the surface down.

use crate::stroke::Stroke;

/// Encode an ordered stroke list as stable JSON.
///
/// Only an empty list may produce the empty-string sentinel; an encode
/// failure is an error, never a sentinel that would overwrite the
/// persisted drawing with "cleared".
pub fn serialize_strokes(strokes: &[Stroke]) -> Result<String, serde_json::Error> {
    if strokes.is_empty() {
        return Ok(String::new());
    }
    serde_json::to_string(strokes)
}

/// Decode a persisted stroke list. Empty or malformed input yields an
/// empty list.
pub fn deserialize_strokes(data: &str) -> Vec<Stroke> {
    if data.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(data) {
        Ok(strokes) => strokes,
        Err(e) => {
            log::warn!("failed to parse persisted drawing data: {e}");
            Vec::new()
        }
    }
}
