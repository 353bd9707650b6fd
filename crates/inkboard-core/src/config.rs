//! Engine configuration.

use crate::error::EngineResult;
use crate::shapes::SerializableColor;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Tunable constants for the editing engine.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of history snapshots kept before the oldest is evicted.
    pub history_capacity: usize,
    /// Minimum distance between consecutive stroke points.
    pub min_point_distance: f64,
    /// Margin added around the selection outline.
    pub selection_padding: f64,
    /// Position given to shapes created from the toolbar.
    pub default_shape_origin: Point,
    /// Width and height of a new rectangle.
    pub default_rect_size: f64,
    /// Radius of a new circle, triangle, star or arrow.
    pub default_radius: f64,
    /// Approximate width of one character of text.
    pub text_char_width: f64,
    /// Height of a text box.
    pub text_height: f64,
    /// Width and height of a placed image.
    pub image_size: f64,
    /// Size of the drawing surface, used to center background pages.
    pub viewport: Size,
    /// Brush color at startup.
    pub brush_color: SerializableColor,
    /// Brush width at startup.
    pub brush_width: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            min_point_distance: 2.0,
            selection_padding: 10.0,
            default_shape_origin: Point::new(100.0, 100.0),
            default_rect_size: 100.0,
            default_radius: 50.0,
            text_char_width: 12.0,
            text_height: 20.0,
            image_size: 100.0,
            viewport: Size::new(800.0, 600.0),
            brush_color: SerializableColor::black(),
            brush_width: 2.0,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
