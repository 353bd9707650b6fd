//! Canvas document: the authoritative stroke and shape lists.

use crate::config::EngineConfig;
use crate::shapes::{
    Image, Radial, RadialKind, Rectangle, SerializableColor, Shape, ShapeId, ShapeKind,
    ShapeStyle, Stroke, StrokeId, Text, Transform,
};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// All editable content on the canvas.
///
/// Lookups by id are total: an id that is not present turns the operation
/// into a no-op, reported through the boolean return value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Committed strokes, back to front. A stroke's id is its index.
    pub strokes: Vec<Stroke>,
    /// Shapes, back to front.
    pub shapes: Vec<Shape>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shape of `kind` with default geometry and the brush color as fill.
    ///
    /// Text and image kinds get an empty label or source; use [`Self::add_text`]
    /// and [`Self::add_image`] to place them with content.
    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        color: SerializableColor,
        config: &EngineConfig,
    ) -> ShapeId {
        let origin = config.default_shape_origin;
        let shape = match kind {
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::new(
                origin,
                config.default_rect_size,
                config.default_rect_size,
                ShapeStyle::filled(color),
            )),
            ShapeKind::Text => {
                return self.add_text(String::new(), origin, color, config);
            }
            ShapeKind::Image => {
                return self.add_image(String::new(), origin, color, config);
            }
            ShapeKind::Circle | ShapeKind::Triangle | ShapeKind::Star | ShapeKind::Arrow => {
                let radial = RadialKind::from_shape_kind(kind).unwrap_or(RadialKind::Circle);
                Shape::Radial(Radial::new(
                    radial,
                    origin,
                    config.default_radius,
                    ShapeStyle::filled(color),
                ))
            }
        };
        self.push_shape(shape)
    }

    /// Place a text box at `position`, sized from the character count.
    pub fn add_text(
        &mut self,
        content: String,
        position: Point,
        color: SerializableColor,
        config: &EngineConfig,
    ) -> ShapeId {
        self.push_shape(Shape::Text(Text::new(
            position,
            content,
            config.text_char_width,
            config.text_height,
            ShapeStyle::outlined(color, 1.0),
        )))
    }

    /// Place an image frame at `position`.
    pub fn add_image(
        &mut self,
        source: String,
        position: Point,
        color: SerializableColor,
        config: &EngineConfig,
    ) -> ShapeId {
        self.push_shape(Shape::Image(Image::new(
            position,
            source,
            config.image_size,
            config.image_size,
            ShapeStyle::outlined(color, 2.0),
        )))
    }

    /// Append a fully formed shape.
    pub fn push_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        log::debug!("Adding {} shape {}", shape.kind(), id);
        self.shapes.push(shape);
        id
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Overwrite a shape's position. Returns false if the shape doesn't exist.
    pub fn move_shape(&mut self, id: ShapeId, position: Point) -> bool {
        let Some(shape) = self.get_shape_mut(id) else {
            log::trace!("move_shape: no shape {}", id);
            return false;
        };
        shape.set_position(position);
        true
    }

    /// Apply final transform geometry. Returns false if the shape doesn't exist.
    pub fn transform_shape(&mut self, id: ShapeId, transform: &Transform) -> bool {
        let Some(shape) = self.get_shape_mut(id) else {
            log::trace!("transform_shape: no shape {}", id);
            return false;
        };
        shape.apply_transform(transform);
        true
    }

    /// Remove every shape whose id is in `ids`. Returns the number removed.
    pub fn delete_shapes(&mut self, ids: &[ShapeId]) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| !ids.contains(&s.id()));
        before - self.shapes.len()
    }

    /// Append a finished stroke and return its positional id.
    pub fn commit_stroke(&mut self, stroke: Stroke) -> StrokeId {
        let id = StrokeId(self.strokes.len());
        log::debug!("Committing stroke {} with {} points", id, stroke.len());
        self.strokes.push(stroke);
        id
    }

    /// Get a stroke by positional id.
    pub fn get_stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.get(id.index())
    }

    /// Remove every stroke whose id is in `ids`. Later strokes shift down.
    /// Returns the number removed.
    pub fn delete_strokes(&mut self, ids: &[StrokeId]) -> usize {
        let before = self.strokes.len();
        let mut index = 0;
        self.strokes.retain(|_| {
            let keep = !ids.contains(&StrokeId(index));
            index += 1;
            keep
        });
        before - self.strokes.len()
    }

    /// Move a stroke by `delta`. Returns false if the stroke doesn't exist.
    pub fn translate_stroke(&mut self, id: StrokeId, delta: Vec2) -> bool {
        let Some(stroke) = self.strokes.get_mut(id.index()) else {
            log::trace!("translate_stroke: no stroke {}", id);
            return false;
        };
        stroke.translate(delta);
        true
    }

    /// Apply final transform geometry to a stroke. Returns false if the stroke
    /// doesn't exist or has fewer than two points.
    pub fn transform_stroke(&mut self, id: StrokeId, transform: &Transform) -> bool {
        self.strokes
            .get_mut(id.index())
            .is_some_and(|stroke| stroke.apply_transform(transform))
    }

    /// Clear all strokes and shapes from the document.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.shapes.clear();
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.shapes.is_empty()
    }
}
