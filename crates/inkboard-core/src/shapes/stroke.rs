//! Freehand ink and erase strokes.

use super::{SerializableColor, Transform};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positional identifier of a committed stroke (its index in the stroke list).
///
/// Ids shift when earlier strokes are deleted; they are only stable between
/// mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StrokeId(pub usize);

impl StrokeId {
    /// Index into the stroke list.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line-{}", self.0)
    }
}

/// Whether a stroke paints ink or erases what is beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    #[default]
    Ink,
    Erase,
}

/// A stroke point with the style captured when it was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    pub color: SerializableColor,
    pub width: f64,
    pub mode: DrawMode,
}

impl StrokePoint {
    pub fn new(position: Point, color: SerializableColor, width: f64, mode: DrawMode) -> Self {
        Self {
            x: position.x,
            y: position.y,
            color,
            width,
            mode,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same style at a different position.
    pub fn moved_to(&self, position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..*self
        }
    }
}

/// An ordered list of styled points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in drawing order.
    pub points: Vec<StrokePoint>,
}

impl Stroke {
    /// Create an empty stroke.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stroke seeded with one point.
    pub fn starting_at(point: StrokePoint) -> Self {
        Self {
            points: vec![point],
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<StrokePoint>) -> Self {
        Self { points }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: StrokePoint) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recently added point.
    pub fn last(&self) -> Option<&StrokePoint> {
        self.points.last()
    }

    /// Draw mode of the stroke (taken from its first point).
    pub fn mode(&self) -> DrawMode {
        self.points.first().map(|p| p.mode).unwrap_or_default()
    }

    /// Bounding box of all points, or `None` for an empty stroke.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?.position();
        Some(
            self.points
                .iter()
                .skip(1)
                .fold(Rect::from_points(first, first), |r, p| r.union_pt(p.position())),
        )
    }

    /// Whether every point lies inside `rect` (edges included).
    pub fn is_contained_in(&self, rect: Rect) -> bool {
        self.points
            .iter()
            .all(|p| p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1)
    }

    /// Mean of all points.
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// Move every point by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point = point.moved_to(point.position() + delta);
        }
    }

    /// Apply the final geometry of a transform gesture.
    ///
    /// Points are rotated about the centroid, scaled by the ratio of the new
    /// size to the span between the first and last point, and re-anchored at
    /// `(x, y)`. Strokes with fewer than two points are left unchanged.
    /// Returns whether the stroke was modified.
    pub fn apply_transform(&mut self, transform: &Transform) -> bool {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return false;
        };
        if self.points.len() < 2 {
            return false;
        }
        let span = |d: f64| if d == 0.0 || d.is_nan() { 1.0 } else { d };
        let scale_x = transform.width / span(last.x - first.x);
        let scale_y = transform.height / span(last.y - first.y);
        let Some(center) = self.centroid() else {
            return false;
        };
        let (sin, cos) = transform.rotation.to_radians().sin_cos();

        for point in &mut self.points {
            let rel = point.position() - center;
            let rotated = Vec2::new(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos);
            *point = point.moved_to(Point::new(
                transform.x + rotated.x * scale_x,
                transform.y + rotated.y * scale_y,
            ));
        }
        true
    }

    /// Polyline path through all points.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some(first) = self.points.first() else {
            return path;
        };

        path.move_to(first.position());
        for point in self.points.iter().skip(1) {
            path.line_to(point.position());
        }

        path
    }
}
