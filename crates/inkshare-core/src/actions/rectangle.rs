//! Rectangle action, `square` on the wire.

use super::ActionId;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

fn default_opacity() -> f64 {
    1.0
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleAction {
    pub id: ActionId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl RectangleAction {
    /// Smallest width or height kept when drawing.
    pub const MIN_SIDE: f64 = 5.0;
    /// Smallest width or height kept when resizing.
    pub const MIN_RESIZED_SIDE: f64 = 1.0;

    /// Create a rectangle from two corner points in any order.
    pub fn from_corners(p1: Point, p2: Point, stroke: &str, stroke_width: f64) -> Self {
        Self {
            id: ActionId::new(),
            x: p1.x.min(p2.x),
            y: p1.y.min(p2.y),
            width: (p2.x - p1.x).abs(),
            height: (p2.y - p1.y).abs(),
            stroke: stroke.to_string(),
            stroke_width,
            fill: None,
            opacity: 1.0,
        }
    }

    pub fn is_too_small(&self) -> bool {
        self.width < Self::MIN_SIDE || self.height < Self::MIN_SIDE
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Move the top-left corner to `origin` and scale both sides, never
    /// below [`Self::MIN_RESIZED_SIDE`].
    pub fn resize(&mut self, origin: Point, scale: Vec2) {
        self.x = origin.x;
        self.y = origin.y;
        self.width = (self.width * scale.x).max(Self::MIN_RESIZED_SIDE);
        self.height = (self.height * scale.y).max(Self::MIN_RESIZED_SIDE);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}
