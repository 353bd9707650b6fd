//! Image shape for placed raster content.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, Transform, box_from_origin};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A placed image. The engine stores only a reference to the pixels
/// (URL, path or data URI); decoding and drawing belong to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Reference to the image source.
    pub source: String,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    /// Rotation angle in degrees (around `position`).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties (stroke used for the frame).
    pub style: ShapeStyle,
}

impl Image {
    /// Create a new image shape.
    pub fn new(
        position: Point,
        source: String,
        width: f64,
        height: f64,
        style: ShapeStyle,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            source,
            width,
            height,
            rotation: 0.0,
            style,
        }
    }
}

impl ShapeTrait for Image {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Image
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
