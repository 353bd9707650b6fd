//! Pointer events reported by the rendering layer.

use crate::shapes::{ShapeId, StrokeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Whether a click should add to the selection instead of replacing it.
    pub fn is_multi_select(&self) -> bool {
        self.shift || self.ctrl
    }
}

/// What the renderer found under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    /// Empty canvas (or the background page).
    #[default]
    Nothing,
    Shape(ShapeId),
    Stroke(StrokeId),
}

impl HitTarget {
    pub fn is_nothing(&self) -> bool {
        matches!(self, HitTarget::Nothing)
    }
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, hit: HitTarget },
    Move { position: Point },
    Up,
}
