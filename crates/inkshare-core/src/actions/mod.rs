//! Scene actions: the drawing primitives that make up a shared scene.
//!
//! Actions serialize as JSON objects tagged by `"tool"` with camelCase fields,
//! which is the format exchanged with peers and kept in local storage.

mod arrow;
mod circle;
mod image;
mod line;
mod rectangle;
mod text;

pub use arrow::ArrowAction;
pub use circle::CircleAction;
pub use image::ImageAction;
pub use line::LineAction;
pub use rectangle::RectangleAction;
pub use text::TextAction;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of an action.
///
/// Assigned once at creation and never reused, even after the action is
/// removed from the scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ActionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Discriminant of an [`Action`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Draw,
    StraightLine,
    Arrow,
    Rectangle,
    Circle,
    Text,
    Image,
    Empty,
}

/// One drawing primitive in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "lowercase")]
pub enum Action {
    /// Freehand stroke.
    Draw(LineAction),
    #[serde(rename = "straightline")]
    StraightLine(LineAction),
    Arrow(ArrowAction),
    #[serde(rename = "square")]
    Rectangle(RectangleAction),
    Circle(CircleAction),
    Text(TextAction),
    Image(ImageAction),
    /// Tombstone with no geometry.
    Empty { id: ActionId },
}

impl Action {
    pub fn id(&self) -> &ActionId {
        match self {
            Action::Draw(a) | Action::StraightLine(a) => &a.id,
            Action::Arrow(a) => &a.id,
            Action::Rectangle(a) => &a.id,
            Action::Circle(a) => &a.id,
            Action::Text(a) => &a.id,
            Action::Image(a) => &a.id,
            Action::Empty { id } => id,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Draw(_) => ActionKind::Draw,
            Action::StraightLine(_) => ActionKind::StraightLine,
            Action::Arrow(_) => ActionKind::Arrow,
            Action::Rectangle(_) => ActionKind::Rectangle,
            Action::Circle(_) => ActionKind::Circle,
            Action::Text(_) => ActionKind::Text,
            Action::Image(_) => ActionKind::Image,
            Action::Empty { .. } => ActionKind::Empty,
        }
    }

    /// Create a tombstone with a fresh id.
    pub fn empty() -> Self {
        Action::Empty { id: ActionId::new() }
    }

    /// Move the action by `delta`, keeping its id.
    ///
    /// Positioned shapes move their origin; line-like actions accumulate the
    /// delta in their optional offset.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Action::Draw(a) | Action::StraightLine(a) => a.translate(delta),
            Action::Arrow(a) => a.translate(delta),
            Action::Rectangle(a) => a.translate(delta),
            Action::Circle(a) => a.translate(delta),
            Action::Text(a) => a.translate(delta),
            Action::Image(a) => a.translate(delta),
            Action::Empty { .. } => {}
        }
    }

    /// Apply a transform handle's result: new origin plus scale factors.
    ///
    /// Only squares, circles and images can be resized; returns `false` and
    /// leaves the action alone for every other kind.
    pub fn resize(&mut self, origin: Point, scale: Vec2) -> bool {
        match self {
            Action::Rectangle(a) => a.resize(origin, scale),
            Action::Circle(a) => a.resize(origin, scale),
            Action::Image(a) => a.resize(origin, scale),
            _ => return false,
        }
        true
    }

    pub fn is_resizable(&self) -> bool {
        matches!(
            self,
            Action::Rectangle(_) | Action::Circle(_) | Action::Image(_)
        )
    }

    /// Approximate bounding box in world coordinates, offset included.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Action::Draw(a) | Action::StraightLine(a) => a.bounds(),
            Action::Arrow(a) => Some(a.bounds()),
            Action::Rectangle(a) => Some(a.bounds()),
            Action::Circle(a) => Some(a.bounds()),
            Action::Text(a) => Some(a.bounds()),
            Action::Image(a) => Some(a.bounds()),
            Action::Empty { .. } => None,
        }
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, Action::Empty { .. })
    }
}

/// Resolve an optional offset pair into a vector.
pub(crate) fn offset_of(x: Option<f64>, y: Option<f64>) -> Vec2 {
    Vec2::new(x.unwrap_or(0.0), y.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_ids_are_unique() {
        let a = ActionId::new();
        let b = ActionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wire_tags() {
        let rect = Action::Rectangle(RectangleAction::from_corners(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            "#000000",
            2.0,
        ));
        let json = serde_json::to_value(&rect).unwrap();
        assert_eq!(json["tool"], "square");
        assert_eq!(json["strokeWidth"], 2.0);

        let line = Action::StraightLine(LineAction::new(
            &[Point::new(0.0, 0.0), Point::new(5.0, 5.0)],
            "#000000",
            2.0,
        ));
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["tool"], "straightline");
        assert_eq!(json["points"], serde_json::json!([0.0, 0.0, 5.0, 5.0]));
    }

    #[test]
    fn test_parse_foreign_action() {
        let json = r##"{"id":"abc","tool":"circle","x":5,"y":6,"radius":10,"stroke":"#561ecb","strokeWidth":4}"##;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action.id().as_str(), "abc");
        assert_eq!(action.kind(), ActionKind::Circle);
    }

    #[test]
    fn test_tombstone() {
        let json = r#"{"tool":"empty","id":"t1"}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert!(action.is_tombstone());
        assert!(action.bounds().is_none());
    }

    #[test]
    fn test_only_boxed_shapes_resize() {
        let mut text = Action::Text(TextAction::new(Point::new(1.0, 2.0), "hi", 20.0, "black"));
        let before = text.clone();
        assert!(!text.is_resizable());
        assert!(!text.resize(Point::ZERO, Vec2::new(2.0, 2.0)));
        assert_eq!(text, before);

        let mut circle = Action::Circle(CircleAction::from_drag(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            "red",
            2.0,
        ));
        assert!(circle.resize(Point::new(5.0, 0.0), Vec2::new(2.0, 2.0)));
        assert_eq!(circle.bounds(), Some(Rect::new(-5.0, -10.0, 15.0, 10.0)));
    }

    #[test]
    fn test_translate_keeps_id() {
        let mut action = Action::Text(TextAction::new(Point::new(1.0, 2.0), "hi", 20.0, "black"));
        let id = action.id().clone();
        action.translate(Vec2::new(10.0, 10.0));
        assert_eq!(action.id(), &id);
        match action {
            Action::Text(t) => {
                assert!((t.x - 11.0).abs() < f64::EPSILON);
                assert!((t.y - 12.0).abs() < f64::EPSILON);
            }
            _ => panic!("expected text"),
        }
    }
}
