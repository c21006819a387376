//! Inkslate Core Library
//!
//! Platform-agnostic stroke capture, history and persistence for the
//! inkslate classroom presentation board. Surfaces (drawing canvas,
//! whiteboard pages, PDF annotation overlays) share one capture state
//! machine and stroke model; rendering lives in `inkslate-render`.

pub mod annotations;
pub mod input;
pub mod pages;
pub mod serialize;
pub mod storage;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use annotations::AnnotationMap;
pub use input::{PointerEvent, PointerId, PointerRouter};
pub use pages::PageStore;
pub use serialize::{deserialize_strokes, serialize_strokes};
pub use stroke::{Rgba, Stroke, StrokePoint};
pub use surface::{EraserPolicy, Surface};
pub use tools::{Brush, ToolKind, ToolSettings};
