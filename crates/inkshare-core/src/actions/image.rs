//! Image action.

use super::ActionId;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// An embedded image, referenced by a data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAction {
    pub id: ActionId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub src: String,
}

impl ImageAction {
    /// Widest an image may be when first placed.
    pub const MAX_INITIAL_WIDTH: f64 = 250.0;
    /// Smallest width or height kept when resizing.
    pub const MIN_SIDE: f64 = 5.0;

    /// Place an image centered on `center`, scaled down to
    /// [`Self::MAX_INITIAL_WIDTH`] with its aspect ratio kept.
    pub fn centered(src: &str, natural: Size, center: Point) -> Self {
        let size = Self::initial_size(natural);
        Self {
            id: ActionId::new(),
            x: center.x - size.width / 2.0,
            y: center.y - size.height / 2.0,
            width: size.width,
            height: size.height,
            src: src.to_string(),
        }
    }

    fn initial_size(natural: Size) -> Size {
        if natural.width <= Self::MAX_INITIAL_WIDTH || natural.width <= 0.0 {
            return natural;
        }
        let scale = Self::MAX_INITIAL_WIDTH / natural.width;
        Size::new(Self::MAX_INITIAL_WIDTH, natural.height * scale)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Move the top-left corner to `origin` and scale both sides, never
    /// below [`Self::MIN_SIDE`].
    pub fn resize(&mut self, origin: Point, scale: Vec2) {
        self.x = origin.x;
        self.y = origin.y;
        self.width = (self.width * scale.x).max(Self::MIN_SIDE);
        self.height = (self.height * scale.y).max(Self::MIN_SIDE);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}
