//! Freehand and straight line actions.

use super::{ActionId, offset_of};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A polyline stroke, used by both the `draw` and `straightline` tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAction {
    pub id: ActionId,
    /// Flat coordinate list `[x0, y0, x1, y1, ...]`.
    pub points: Vec<f64>,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl LineAction {
    pub fn new(points: &[Point], stroke: &str, stroke_width: f64) -> Self {
        Self {
            id: ActionId::new(),
            points: points.iter().flat_map(|p| [p.x, p.y]).collect(),
            stroke: stroke.to_string(),
            stroke_width,
            x: None,
            y: None,
        }
    }

    /// Points with the position offset applied.
    pub fn world_points(&self) -> Vec<Point> {
        let offset = offset_of(self.x, self.y);
        self.points
            .chunks_exact(2)
            .map(|c| Point::new(c[0], c[1]) + offset)
            .collect()
    }

    pub fn translate(&mut self, delta: Vec2) {
        let offset = offset_of(self.x, self.y) + delta;
        self.x = Some(offset.x);
        self.y = Some(offset.y);
    }

    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.world_points().into_iter();
        let first = points.next()?;
        let rect = points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p));
        Some(rect.inflate(self.stroke_width / 2.0, self.stroke_width / 2.0))
    }
}
