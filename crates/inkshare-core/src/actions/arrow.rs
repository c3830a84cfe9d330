//! Arrow action.

use super::{ActionId, offset_of};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A straight arrow with a filled head at its end point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowAction {
    pub id: ActionId,
    /// `[start_x, start_y, end_x, end_y]`.
    pub points: [f64; 4],
    pub stroke: String,
    pub stroke_width: f64,
    pub pointer_length: f64,
    pub pointer_width: f64,
    pub fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl ArrowAction {
    /// Head length relative to the stroke width.
    pub const POINTER_LENGTH_FACTOR: f64 = 4.0;
    /// Head width relative to the stroke width.
    pub const POINTER_WIDTH_FACTOR: f64 = 3.0;

    /// Create an arrow whose head is sized from the stroke width and filled
    /// with the stroke color.
    pub fn new(start: Point, end: Point, stroke: &str, stroke_width: f64) -> Self {
        Self {
            id: ActionId::new(),
            points: [start.x, start.y, end.x, end.y],
            stroke: stroke.to_string(),
            stroke_width,
            pointer_length: stroke_width * Self::POINTER_LENGTH_FACTOR,
            pointer_width: stroke_width * Self::POINTER_WIDTH_FACTOR,
            fill: stroke.to_string(),
            x: None,
            y: None,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.points[0], self.points[1]) + offset_of(self.x, self.y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.points[2], self.points[3]) + offset_of(self.x, self.y)
    }

    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    pub fn translate(&mut self, delta: Vec2) {
        let offset = offset_of(self.x, self.y) + delta;
        self.x = Some(offset.x);
        self.y = Some(offset.y);
    }

    pub fn bounds(&self) -> Rect {
        let pad = self.pointer_width.max(self.stroke_width) / 2.0;
        Rect::from_points(self.start(), self.end()).inflate(pad, pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_sized_from_stroke() {
        let arrow = ArrowAction::new(Point::new(0.0, 0.0), Point::new(30.0, 40.0), "#561ecb", 2.0);
        assert!((arrow.pointer_length - 8.0).abs() < f64::EPSILON);
        assert!((arrow.pointer_width - 6.0).abs() < f64::EPSILON);
        assert_eq!(arrow.fill, "#561ecb");
        assert!((arrow.length() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wire_fields() {
        let arrow = ArrowAction::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), "red", 1.0);
        let json = serde_json::to_value(&arrow).unwrap();
        assert!(json.get("pointerLength").is_some());
        assert!(json.get("pointerWidth").is_some());
    }
}
