//! Per-page annotation surfaces for the document overlay.
//!
//! The overlay does not own pagination: the document viewer supplies the
//! current page number and the map creates surfaces lazily on first use.
//! Overlay surfaces use the true-delete eraser policy.

use crate::stroke::Stroke;
use crate::surface::Surface;
use std::collections::HashMap;

/// Map from 1-based page number to that page's annotation surface.
#[derive(Debug, Clone, Default)]
pub struct AnnotationMap {
    pages: HashMap<u32, Surface>,
}

impl AnnotationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The surface for `page`, created empty on first access.
    pub fn surface_mut(&mut self, page: u32) -> &mut Surface {
        self.pages
            .entry(page)
            .or_insert_with(Surface::annotation_overlay)
    }

    /// Committed strokes for `page`; empty when the page was never drawn on.
    pub fn strokes(&self, page: u32) -> &[Stroke] {
        self.pages.get(&page).map(|s| s.strokes()).unwrap_or(&[])
    }

    pub fn surface(&self, page: u32) -> Option<&Surface> {
        self.pages.get(&page)
    }

    /// Undo the last annotation on `page`. No-op for untouched pages.
    pub fn undo(&mut self, page: u32) -> bool {
        self.pages.get_mut(&page).is_some_and(Surface::undo)
    }

    /// Pages that currently carry annotations.
    pub fn annotated_pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages
            .iter()
            .filter(|(_, s)| !s.is_empty())
            .map(|(page, _)| *page)
    }

    /// Drop every annotation, e.g. when a new document is opened.
    pub fn clear_all(&mut self) {
        self.pages.clear();
    }
}
