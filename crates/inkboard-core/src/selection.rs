//! Selection state and marquee selection.

use crate::document::CanvasDocument;
use crate::shapes::{Shape, ShapeId, StrokeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A user-dragged selection rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marquee {
    /// Where the drag started.
    pub start: Point,
    /// Current drag position.
    pub end: Point,
}

impl Marquee {
    pub fn new(start: Point) -> Self {
        Self { start, end: start }
    }

    /// Axis-aligned rectangle spanned by the two corners.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}

/// Selected shape and stroke ids plus the in-progress marquee.
///
/// Selection holds ids only; callers resolve them against the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionManager {
    shape_ids: Vec<ShapeId>,
    stroke_ids: Vec<StrokeId>,
    marquee: Option<Marquee>,
}

/// Toggle `id` in `ids`, preserving insertion order.
fn toggle<T: PartialEq>(ids: &mut Vec<T>, id: T) {
    if let Some(pos) = ids.iter().position(|x| *x == id) {
        ids.remove(pos);
    } else {
        ids.push(id);
    }
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape_ids(&self) -> &[ShapeId] {
        &self.shape_ids
    }

    pub fn stroke_ids(&self) -> &[StrokeId] {
        &self.stroke_ids
    }

    pub fn is_empty(&self) -> bool {
        self.shape_ids.is_empty() && self.stroke_ids.is_empty()
    }

    pub fn is_shape_selected(&self, id: ShapeId) -> bool {
        self.shape_ids.contains(&id)
    }

    pub fn is_stroke_selected(&self, id: StrokeId) -> bool {
        self.stroke_ids.contains(&id)
    }

    /// Select a shape. Without `multi` the selection becomes exactly `{id}`;
    /// with `multi` the id toggles in the shape set. Either way the stroke
    /// selection is cleared, so a selection never mixes kinds.
    pub fn select_shape(&mut self, id: ShapeId, multi: bool) {
        if multi {
            toggle(&mut self.shape_ids, id);
        } else {
            self.shape_ids = vec![id];
        }
        self.stroke_ids.clear();
    }

    /// Select a stroke, mirroring [`Self::select_shape`].
    pub fn select_stroke(&mut self, id: StrokeId, multi: bool) {
        if multi {
            toggle(&mut self.stroke_ids, id);
        } else {
            self.stroke_ids = vec![id];
        }
        self.shape_ids.clear();
    }

    /// Replace both sets at once (used when restoring history).
    pub fn set(&mut self, shape_ids: Vec<ShapeId>, stroke_ids: Vec<StrokeId>) {
        self.shape_ids = shape_ids;
        self.stroke_ids = stroke_ids;
    }

    /// Deselect everything. The marquee is left alone.
    pub fn clear_selection(&mut self) {
        self.shape_ids.clear();
        self.stroke_ids.clear();
    }

    pub fn marquee(&self) -> Option<Rect> {
        self.marquee.map(|m| m.rect())
    }

    /// Seed a zero-size marquee at `point`.
    pub fn begin_marquee(&mut self, point: Point) {
        self.marquee = Some(Marquee::new(point));
    }

    /// Move the marquee's free corner. No-op when no marquee is active.
    pub fn update_marquee(&mut self, point: Point) {
        if let Some(marquee) = &mut self.marquee {
            marquee.end = point;
        }
    }

    /// Drop the marquee without changing the selection.
    pub fn cancel_marquee(&mut self) {
        self.marquee = None;
    }

    /// Replace the selection with everything the marquee picks, then drop it.
    ///
    /// Shapes are picked when their bounding box overlaps the marquee.
    /// Strokes are picked only when every point lies inside it; strokes with
    /// fewer than two points are never picked.
    pub fn commit_marquee(&mut self, doc: &CanvasDocument) {
        let Some(marquee) = self.marquee.take() else {
            return;
        };
        let rect = marquee.rect();

        self.shape_ids = doc
            .shapes
            .iter()
            .filter(|shape| shape.overlaps_rect(rect))
            .map(Shape::id)
            .collect();
        self.stroke_ids = doc
            .strokes
            .iter()
            .enumerate()
            .filter(|(_, stroke)| stroke.len() >= 2 && stroke.is_contained_in(rect))
            .map(|(i, _)| StrokeId(i))
            .collect();

        log::debug!(
            "Marquee {:?} selected {} shapes, {} strokes",
            rect,
            self.shape_ids.len(),
            self.stroke_ids.len()
        );
    }

    /// Padded envelope of every selected shape and stroke, or `None` if
    /// nothing selected resolves.
    pub fn compute_bounding_box(&self, doc: &CanvasDocument, padding: f64) -> Option<Rect> {
        let shapes = self
            .shape_ids
            .iter()
            .filter_map(|id| doc.get_shape(*id))
            .map(Shape::bounds);
        let strokes = self
            .stroke_ids
            .iter()
            .filter_map(|id| doc.get_stroke(*id))
            .filter_map(|stroke| stroke.bounds());

        shapes
            .chain(strokes)
            .reduce(|a, b| a.union(b))
            .map(|bounds| bounds.inflate(padding, padding))
    }
}
