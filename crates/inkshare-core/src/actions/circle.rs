//! Circle action.

use super::ActionId;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

fn default_opacity() -> f64 {
    1.0
}

/// A circle stored by its center and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleAction {
    pub id: ActionId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl CircleAction {
    /// Smallest radius kept when drawing.
    pub const MIN_RADIUS: f64 = 5.0;
    /// Smallest radius kept when resizing.
    pub const MIN_RESIZED_RADIUS: f64 = 1.0;

    /// Circle spanning a drag: centered on its midpoint, diameter equal to its length.
    pub fn from_drag(start: Point, end: Point, stroke: &str, stroke_width: f64) -> Self {
        let center = start.midpoint(end);
        Self {
            id: ActionId::new(),
            x: center.x,
            y: center.y,
            radius: start.distance(end) / 2.0,
            stroke: stroke.to_string(),
            stroke_width,
            fill: None,
            opacity: 1.0,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Move the center to `origin` and scale the radius by the horizontal
    /// factor, never below [`Self::MIN_RESIZED_RADIUS`].
    pub fn resize(&mut self, origin: Point, scale: Vec2) {
        self.x = origin.x;
        self.y = origin.y;
        self.radius = (self.radius * scale.x).max(Self::MIN_RESIZED_RADIUS);
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center(), (self.radius * 2.0, self.radius * 2.0))
    }
}
