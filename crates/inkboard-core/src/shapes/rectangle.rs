//! Rectangle shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, Transform, box_from_origin};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Rotation angle in degrees (around `position`).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            rotation: 0.0,
            style,
        }
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        box_from_origin(self.position, self.width, self.height)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
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
        self.as_rect()
    }

    fn to_path(&self) -> BezPath {
        let rotate = Affine::rotate_about(self.rotation.to_radians(), self.position);
        rotate * self.as_rect().to_path(0.1)
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
