//! Ordered collection of whiteboard pages, each an independent surface.

use crate::surface::Surface;
use serde::{Deserialize, Deserializer, Serialize};

/// Multi-page store for the whiteboard. Always holds at least one page,
/// and `current` is always a valid index.
#[derive(Debug, Clone, Serialize)]
pub struct PageStore {
    pages: Vec<Surface>,
    current: usize,
}

/// Persisted values come from outside the invariant boundary: an empty
/// page list gets a fresh page and an out-of-range index is clamped, so
/// a corrupted store can never make `current()` panic.
impl<'de> Deserialize<'de> for PageStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            pages: Vec<Surface>,
            #[serde(default)]
            current: usize,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut pages = raw.pages;
        if pages.is_empty() {
            log::warn!("persisted page store had no pages; restoring one");
            pages.push(Surface::whiteboard_page());
        }
        let current = if raw.current < pages.len() {
            raw.current
        } else {
            log::warn!(
                "persisted page index {} out of range for {} pages; clamping",
                raw.current,
                pages.len()
            );
            pages.len() - 1
        };
        Ok(Self { pages, current })
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PageStore {
    /// Create a store with a single empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![Surface::whiteboard_page()],
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false while the ≥1-page invariant holds; paired with `len`.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The active surface that capture, render and history operate on.
    pub fn current(&self) -> &Surface {
        &self.pages[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Surface {
        &mut self.pages[self.current]
    }

    pub fn page(&self, index: usize) -> Option<&Surface> {
        self.pages.get(index)
    }

    /// Append a new empty page and make it current.
    pub fn add_page(&mut self) {
        self.pages.push(Surface::whiteboard_page());
        self.current = self.pages.len() - 1;
    }

    /// Remove the page at `index`.
    ///
    /// The sole remaining page is never removed; its content is cleared
    /// instead. The current index stays at the same visual position where
    /// possible, clamped to the new length. Returns false for an
    /// out-of-range index.
    pub fn remove_page(&mut self, index: usize) -> bool {
        if index >= self.pages.len() {
            return false;
        }
        if self.pages.len() == 1 {
            self.pages[0].clear();
            return true;
        }
        self.pages.remove(index);
        if self.current >= self.pages.len() {
            self.current = self.pages.len() - 1;
        } else if index < self.current {
            self.current -= 1;
        }
        true
    }

    /// Switch the active page. Returns false for an invalid index.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.pages.len() {
            self.current = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokePoint;
    use crate::tools::{Brush, ToolKind};

    fn draw_on_current(store: &mut PageStore) {
        let surface = store.current_mut();
        surface.start(StrokePoint::new(0.0, 0.0), &Brush::default(), ToolKind::Pen);
        surface.extend(StrokePoint::new(10.0, 10.0));
        surface.commit();
    }

    #[test]
    fn test_new_store_has_one_empty_page() {
        let store = PageStore::new();
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
        assert_eq!(store.current_index(), 0);
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_deserialize_clamps_out_of_range_index() {
        let mut store = PageStore::new();
        store.add_page();
        let mut json: serde_json::Value = serde_json::to_value(&store).unwrap();
        json["current"] = serde_json::json!(99);

        let restored: PageStore = serde_json::from_value(json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.current_index(), 1);
        // Must not panic on a corrupted index.
        assert!(restored.current().is_empty());
    }

    #[test]
    fn test_deserialize_empty_page_list_restores_one() {
        let restored: PageStore = serde_json::from_str(r#"{"pages":[],"current":3}"#).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.current_index(), 0);
        assert!(restored.current().is_empty());
    }

    #[test]
    fn test_add_page_becomes_current() {
        let mut store = PageStore::new();
        draw_on_current(&mut store);

        store.add_page();
        assert_eq!(store.len(), 2);
        assert_eq!(store.current_index(), 1);
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_remove_only_page_clears_instead() {
        let mut store = PageStore::new();
        draw_on_current(&mut store);
        assert!(!store.current().is_empty());

        assert!(store.remove_page(0));
        assert_eq!(store.len(), 1);
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_remove_page_adjusts_current() {
        let mut store = PageStore::new();
        store.add_page();
        store.add_page(); // three pages, current = 2

        // Removing a page before the current one shifts it left.
        store.remove_page(0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.current_index(), 1);

        // Removing the last page while current clamps to the new end.
        store.remove_page(1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.current_index(), 0);
    }

    #[test]
    fn test_remove_page_after_current_keeps_position() {
        let mut store = PageStore::new();
        store.add_page();
        store.add_page();
        store.set_current(0);

        store.remove_page(2);
        assert_eq!(store.current_index(), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_set_current_validates_index() {
        let mut store = PageStore::new();
        store.add_page();
        assert!(store.set_current(0));
        assert!(!store.set_current(5));
        assert_eq!(store.current_index(), 0);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = PageStore::new();
        assert!(!store.remove_page(3));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_pages_have_independent_histories() {
        let mut store = PageStore::new();
        draw_on_current(&mut store);
        store.add_page();
        draw_on_current(&mut store);
        draw_on_current(&mut store);

        assert_eq!(store.page(0).unwrap().strokes().len(), 1);
        assert_eq!(store.page(1).unwrap().strokes().len(), 2);

        store.current_mut().undo();
        assert_eq!(store.page(0).unwrap().strokes().len(), 1);
        assert_eq!(store.page(1).unwrap().strokes().len(), 1);
    }
}
