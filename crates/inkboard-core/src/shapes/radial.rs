//! Shapes sized by a single radius: circle, triangle, star and arrow.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, Transform};
use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use uuid::Uuid;

/// Number of outer points on a star.
const STAR_POINTS: usize = 5;
/// Inner radius of a star as a fraction of the outer radius.
const STAR_INNER_RATIO: f64 = 0.5;
/// Arrow head length as a fraction of the radius.
const ARROW_HEAD_RATIO: f64 = 0.4;

/// Outline drawn inside the radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialKind {
    Circle,
    Triangle,
    Star,
    Arrow,
}

impl RadialKind {
    fn shape_kind(self) -> ShapeKind {
        match self {
            RadialKind::Circle => ShapeKind::Circle,
            RadialKind::Triangle => ShapeKind::Triangle,
            RadialKind::Star => ShapeKind::Star,
            RadialKind::Arrow => ShapeKind::Arrow,
        }
    }

    /// Map a shape tag to its radial outline, if it has one.
    pub fn from_shape_kind(kind: ShapeKind) -> Option<Self> {
        match kind {
            ShapeKind::Circle => Some(RadialKind::Circle),
            ShapeKind::Triangle => Some(RadialKind::Triangle),
            ShapeKind::Star => Some(RadialKind::Star),
            ShapeKind::Arrow => Some(RadialKind::Arrow),
            ShapeKind::Rectangle | ShapeKind::Text | ShapeKind::Image => None,
        }
    }
}

/// A shape centered on its position and bounded by a circle of `radius`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Radial {
    pub(crate) id: ShapeId,
    /// Which outline to draw.
    pub kind: RadialKind,
    /// Center point.
    pub center: Point,
    /// Outer radius.
    pub radius: f64,
    /// Rotation angle in degrees (around `center`).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Radial {
    /// Create a new radial shape.
    pub fn new(kind: RadialKind, center: Point, radius: f64, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            center,
            radius,
            rotation: 0.0,
            style,
        }
    }

    /// Vertex on the bounding circle at `angle` radians, measured from +x.
    fn vertex(&self, radius: f64, angle: f64) -> Point {
        self.center + Vec2::from_angle(angle) * radius
    }

    fn polygon(&self, vertices: impl IntoIterator<Item = Point>) -> BezPath {
        let mut path = BezPath::new();
        for (i, p) in vertices.into_iter().enumerate() {
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path.close_path();
        path
    }

    fn unrotated_path(&self) -> BezPath {
        match self.kind {
            RadialKind::Circle => Circle::new(self.center, self.radius).to_path(0.1),
            RadialKind::Triangle => {
                // Apex points up.
                let step = TAU / 3.0;
                self.polygon((0..3).map(|i| self.vertex(self.radius, -FRAC_PI_2 + step * i as f64)))
            }
            RadialKind::Star => {
                let step = TAU / (STAR_POINTS * 2) as f64;
                let inner = self.radius * STAR_INNER_RATIO;
                self.polygon((0..STAR_POINTS * 2).map(|i| {
                    let r = if i % 2 == 0 { self.radius } else { inner };
                    self.vertex(r, -FRAC_PI_2 + step * i as f64)
                }))
            }
            RadialKind::Arrow => {
                let tail = Point::new(self.center.x - self.radius, self.center.y);
                let tip = Point::new(self.center.x + self.radius, self.center.y);
                let head = self.radius * ARROW_HEAD_RATIO;
                let mut path = BezPath::new();
                path.move_to(tail);
                path.line_to(tip);
                path.move_to(Point::new(tip.x - head, tip.y - head));
                path.line_to(tip);
                path.line_to(Point::new(tip.x - head, tip.y + head));
                path
            }
        }
    }
}

impl ShapeTrait for Radial {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        self.kind.shape_kind()
    }

    fn position(&self) -> Point {
        self.center
    }

    fn set_position(&mut self, position: Point) {
        self.center = position;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn to_path(&self) -> BezPath {
        Affine::rotate_about(self.rotation.to_radians(), self.center) * self.unrotated_path()
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn apply_transform(&mut self, transform: &Transform) {
        self.center = Point::new(transform.x, transform.y);
        self.radius = transform.width.max(transform.height) / 2.0;
        self.rotation = transform.rotation;
    }
}
