//! Shape definitions for the whiteboard.

mod image;
mod radial;
mod rectangle;
mod stroke;
mod text;

pub use image::Image;
pub use radial::{Radial, RadialKind};
pub use rectangle::Rectangle;
pub use stroke::{DrawMode, Stroke, StrokeId, StrokePoint};
pub use text::Text;

use crate::error::{EngineError, EngineResult};
use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a CSS-style color: `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`.
    pub fn from_hex(color: &str) -> EngineResult<Self> {
        let color = color.trim();
        if color.eq_ignore_ascii_case("transparent") {
            return Ok(Self::transparent());
        }
        let invalid = || EngineError::InvalidColor(color.to_string());
        let hex = color.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Ok(Self::new(r, g, b, 255))
            }
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color (transparent for outline-only content such as text boxes).
    pub fill_color: SerializableColor,
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
}

impl ShapeStyle {
    /// Style for a toolbar shape: filled with the brush color, black outline.
    pub fn filled(fill: SerializableColor) -> Self {
        Self {
            fill_color: fill,
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
        }
    }

    /// Style for outline-only content.
    pub fn outlined(stroke: SerializableColor, stroke_width: f64) -> Self {
        Self {
            fill_color: SerializableColor::transparent(),
            stroke_color: stroke,
            stroke_width,
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color, or `None` when fully transparent.
    pub fn fill(&self) -> Option<Color> {
        (self.fill_color.a > 0).then(|| self.fill_color.into())
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::filled(SerializableColor::black())
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Type tag for shapes, validated at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Star,
    Arrow,
    Text,
    Image,
}

impl ShapeKind {
    /// Whether this kind is sized by a single radius.
    pub fn is_radial(self) -> bool {
        matches!(self, Self::Circle | Self::Triangle | Self::Star | Self::Arrow)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Star => "star",
            Self::Arrow => "arrow",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "triangle" => Ok(Self::Triangle),
            "star" => Ok(Self::Star),
            "arrow" => Ok(Self::Arrow),
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            other => Err(EngineError::InvalidShapeType(other.to_string())),
        }
    }
}

/// Final geometry reported by the renderer when a transform gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl Transform {
    pub fn new(x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation,
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the type tag.
    fn kind(&self) -> ShapeKind;

    /// Get the stored origin (top-left for boxes, center for radial shapes).
    fn position(&self) -> Point;

    /// Overwrite the stored origin.
    fn set_position(&mut self, position: Point);

    /// Rotation in degrees about the stored origin.
    fn rotation(&self) -> f64;

    /// Get the axis-aligned bounding box, ignoring rotation.
    fn bounds(&self) -> Rect;

    /// Get the outline path for rendering, rotated about the stored origin.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Apply the final geometry of a transform gesture.
    fn apply_transform(&mut self, transform: &Transform);
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Radial(Radial),
    Text(Text),
    Image(Image),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Radial(s) => s.id(),
            Shape::Text(s) => s.id(),
            Shape::Image(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(s) => s.kind(),
            Shape::Radial(s) => s.kind(),
            Shape::Text(s) => s.kind(),
            Shape::Image(s) => s.kind(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.position(),
            Shape::Radial(s) => s.position(),
            Shape::Text(s) => s.position(),
            Shape::Image(s) => s.position(),
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Rectangle(s) => s.set_position(position),
            Shape::Radial(s) => s.set_position(position),
            Shape::Text(s) => s.set_position(position),
            Shape::Image(s) => s.set_position(position),
        }
    }

    pub fn rotation(&self) -> f64 {
        match self {
            Shape::Rectangle(s) => s.rotation(),
            Shape::Radial(s) => s.rotation(),
            Shape::Text(s) => s.rotation(),
            Shape::Image(s) => s.rotation(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Radial(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Image(s) => s.bounds(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.to_path(),
            Shape::Radial(s) => s.to_path(),
            Shape::Text(s) => s.to_path(),
            Shape::Image(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style(),
            Shape::Radial(s) => s.style(),
            Shape::Text(s) => s.style(),
            Shape::Image(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Radial(s) => s.style_mut(),
            Shape::Text(s) => s.style_mut(),
            Shape::Image(s) => s.style_mut(),
        }
    }

    pub fn apply_transform(&mut self, transform: &Transform) {
        match self {
            Shape::Rectangle(s) => s.apply_transform(transform),
            Shape::Radial(s) => s.apply_transform(transform),
            Shape::Text(s) => s.apply_transform(transform),
            Shape::Image(s) => s.apply_transform(transform),
        }
    }

    /// Test if this shape's bounding box overlaps a rectangle.
    ///
    /// Edges that merely touch do not count as overlap.
    pub fn overlaps_rect(&self, rect: Rect) -> bool {
        let bounds = self.bounds();
        bounds.x0 < rect.x1 && bounds.x1 > rect.x0 && bounds.y0 < rect.y1 && bounds.y1 > rect.y0
    }
}

/// Box spanned by an origin and a (possibly negative) size.
pub(crate) fn box_from_origin(origin: Point, width: f64, height: f64) -> Rect {
    Rect::new(origin.x, origin.y, origin.x + width, origin.y + height).abs()
}
