//! Text action.

use super::ActionId;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAction {
    pub id: ActionId,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    pub fill: String,
}

impl TextAction {
    pub const PLACEHOLDER: &'static str = "New Text";
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    pub fn new(position: Point, text: &str, font_size: f64, fill: &str) -> Self {
        Self {
            id: ActionId::new(),
            x: position.x,
            y: position.y,
            text: text.to_string(),
            font_size,
            fill: fill.to_string(),
        }
    }

    /// Placeholder text dropped by a click with the text tool.
    pub fn placeholder(position: Point, fill: &str) -> Self {
        Self::new(position, Self::PLACEHOLDER, Self::DEFAULT_FONT_SIZE, fill)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Rough extent, assuming glyphs about 0.6 em wide.
    pub fn bounds(&self) -> Rect {
        let width = self.text.chars().count() as f64 * self.font_size * 0.6;
        Rect::new(self.x, self.y, self.x + width, self.y + self.font_size)
    }
}
