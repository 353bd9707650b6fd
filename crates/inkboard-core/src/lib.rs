//! Inkboard Core Library
//!
//! Editing engine for a whiteboard: freehand strokes, shapes, selection,
//! bounded undo/redo and a pannable background page. Rendering is left to
//! the host, which feeds pointer events in and draws from [`CanvasState`].

pub mod background;
pub mod canvas;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod tools;

pub use background::{BackgroundPage, BackgroundStore};
pub use canvas::{BackgroundState, Canvas, CanvasState};
pub use config::EngineConfig;
pub use document::CanvasDocument;
pub use error::{EngineError, EngineResult};
pub use history::{History, Snapshot};
pub use input::{HitTarget, Modifiers, PointerEvent};
pub use selection::SelectionManager;
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeKind, Stroke, StrokeId, Transform};
pub use tools::{DrawingAttributes, Tool};
