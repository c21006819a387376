//! Debounced persistence of a surface's stroke list.
//!
//! Every mutation reschedules a fixed-delay write; only after the quiet
//! period elapses does the serialized string hit storage and the host's
//! update callback. This keeps a fast draw gesture from writing on every
//! pointer sample.

use super::{Storage, StorageResult};
use crate::serialize::{deserialize_strokes, serialize_strokes};
use crate::stroke::Stroke;
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default quiet period before a change is persisted.
pub const DEBOUNCE_DELAY_MS: u64 = 500;

/// Cancel-and-reschedule delay primitive.
///
/// `note()` arms (or re-arms) the deadline; `poll()` reports and consumes
/// expiry. Host event loops call `poll()` on their tick.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_DELAY_MS))
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record a change: the deadline moves to now + delay, cancelling any
    /// earlier pending deadline.
    pub fn note(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Drop the pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per elapsed deadline.
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Persists one surface's serialized strokes under a fixed key, debounced,
/// and notifies an optional host callback with the serialized string.
pub struct DebouncedSaver<S: Storage> {
    storage: Arc<S>,
    key: String,
    debouncer: Debouncer,
    pending: Option<String>,
    on_update: Option<Box<dyn FnMut(&str)>>,
}

impl<S: Storage> DebouncedSaver<S> {
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            debouncer: Debouncer::default(),
            pending: None,
            on_update: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    /// Register the host callback invoked after each debounced write.
    pub fn set_on_update(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_update = Some(Box::new(callback));
    }

    /// Record the surface's current strokes; the write happens later.
    /// An encode failure is logged and leaves any earlier pending value
    /// in place rather than persisting a spurious "cleared" state.
    pub fn note_change(&mut self, strokes: &[Stroke]) {
        match serialize_strokes(strokes) {
            Ok(data) => {
                self.pending = Some(data);
                self.debouncer.note();
            }
            Err(e) => {
                log::error!("failed to serialize {} strokes: {e}", strokes.len());
            }
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.pending.is_some()
    }

    /// Write the pending value if the quiet period has elapsed.
    /// Returns true if a write was performed.
    pub async fn flush_due(&mut self) -> StorageResult<bool> {
        if !self.debouncer.poll() {
            return Ok(false);
        }
        self.write_pending().await
    }

    /// Write the pending value immediately, e.g. on shutdown.
    pub async fn flush_now(&mut self) -> StorageResult<bool> {
        self.debouncer.cancel();
        self.write_pending().await
    }

    async fn write_pending(&mut self) -> StorageResult<bool> {
        let Some(data) = self.pending.take() else {
            return Ok(false);
        };
        self.storage.save(&self.key, &data).await?;
        log::debug!("persisted {} bytes under '{}'", data.len(), self.key);
        if let Some(callback) = self.on_update.as_mut() {
            callback(&data);
        }
        Ok(true)
    }

    /// Load the persisted stroke list. A missing key or malformed value
    /// yields an empty list.
    pub async fn load(&self) -> Vec<Stroke> {
        match self.storage.load(&self.key).await {
            Ok(data) => deserialize_strokes(&data),
            Err(_) => Vec::new(),
        }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}
