//! Tool system for the whiteboard.

mod gesture;

pub use gesture::{Effect, Gesture, GestureContext};

use crate::error::EngineError;
use crate::input::PointerEvent;
use crate::shapes::{DrawMode, SerializableColor, StrokePoint};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand ink.
    #[default]
    Pen,
    /// Freehand erase strokes.
    Eraser,
    /// Click, marquee and background drag.
    Select,
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Select => "select",
        }
    }

    /// Draw mode for freehand tools, `None` for select.
    pub fn draw_mode(self) -> Option<DrawMode> {
        match self {
            Tool::Pen => Some(DrawMode::Ink),
            Tool::Eraser => Some(DrawMode::Erase),
            Tool::Select => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pen" => Ok(Tool::Pen),
            "eraser" => Ok(Tool::Eraser),
            "select" => Ok(Tool::Select),
            other => Err(EngineError::InvalidTool(other.to_string())),
        }
    }
}

/// Color and width applied to new strokes and shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawingAttributes {
    pub color: SerializableColor,
    pub width: f64,
}

impl Default for DrawingAttributes {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            width: 2.0,
        }
    }
}

impl DrawingAttributes {
    /// Styled stroke point for `mode`. Erase points are always white.
    pub fn point(&self, position: Point, mode: DrawMode) -> StrokePoint {
        let color = match mode {
            DrawMode::Ink => self.color,
            DrawMode::Erase => SerializableColor::white(),
        };
        StrokePoint::new(position, color, self.width, mode)
    }
}

/// Manages the current tool, its gesture and drawing attributes.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    current_tool: Tool,
    /// Gesture in progress.
    gesture: Gesture,
    /// Attributes for new content.
    pub attributes: DrawingAttributes,
}

impl ToolManager {
    pub fn new(attributes: DrawingAttributes) -> Self {
        Self {
            attributes,
            ..Default::default()
        }
    }

    pub fn current_tool(&self) -> Tool {
        self.current_tool
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Switch tools. An in-progress gesture is abandoned; returns whether one was.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        self.current_tool = tool;
        self.cancel()
    }

    /// Abandon the current gesture. Returns whether one was in progress.
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.gesture.is_idle();
        if was_active {
            log::debug!("Cancelling {} gesture", self.gesture.name());
        }
        self.gesture = Gesture::Idle;
        was_active
    }

    /// Feed a pointer event through the gesture state machine.
    pub fn handle(&mut self, event: PointerEvent, ctx: &GestureContext<'_>) -> Vec<Effect> {
        let gesture = std::mem::take(&mut self.gesture);
        let (next, effects) = gesture.handle(event, self.current_tool, &self.attributes, ctx);
        self.gesture = next;
        effects
    }
}
