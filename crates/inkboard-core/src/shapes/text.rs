//! Text box shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, Transform, box_from_origin};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A text label occupying a rectangular box.
///
/// The box size is an estimate derived from the character count; glyph
/// layout is left to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Text content.
    pub content: String,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Rotation angle in degrees (around `position`).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Text {
    /// Create a text box sized from the content length.
    pub fn new(
        position: Point,
        content: String,
        char_width: f64,
        height: f64,
        style: ShapeStyle,
    ) -> Self {
        let width = content.chars().count() as f64 * char_width;
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            width,
            height,
            rotation: 0.0,
            style,
        }
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Text
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn bounds(&self) -> Rect {
        box_from_origin(self.position, self.width, self.height)
    }

    fn to_path(&self) -> BezPath {
        Affine::rotate_about(self.rotation.to_radians(), self.position) * self.bounds().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn apply_transform(&mut self, transform: &Transform) {
        self.position = Point::new(transform.x, transform.y);
        self.width = transform.width;
        self.height = transform.height;
        self.rotation = transform.rotation;
    }
}
