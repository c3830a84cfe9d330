//! Viewport pan and zoom.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom multiplier applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.08;

/// View transform of the drawing surface.
///
/// Maps world coordinates (where actions live) to screen coordinates of a
/// surface of `size` pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Pan offset in screen pixels.
    pub offset: Vec2,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Surface size in screen pixels.
    pub size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            size: Size::new(800.0, 600.0),
        }
    }
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// World to screen.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.transform().inverse() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// World position shown at the middle of the surface.
    pub fn center_world(&self) -> Point {
        self.screen_to_world(Point::new(self.size.width / 2.0, self.size.height / 2.0))
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping `screen_point` fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let anchor = self.screen_to_world(screen_point);
        self.zoom = new_zoom;
        self.offset += screen_point - self.world_to_screen(anchor);
    }

    /// One wheel notch around `screen_point`: scrolling up zooms in.
    pub fn zoom_wheel(&mut self, screen_point: Point, delta_y: f64) {
        if delta_y == 0.0 {
            return;
        }
        let factor = if delta_y < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        self.zoom_at(screen_point, factor);
    }

    /// Back to the origin at zoom 1.
    pub fn recenter(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::default();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset_and_zoom() {
        let mut viewport = Viewport::default();
        viewport.offset = Vec2::new(50.0, 100.0);
        viewport.zoom = 2.0;
        let world = viewport.screen_to_world(Point::new(150.0, 300.0));
        assert!((world.x - 50.0).abs() < 1e-10);
        assert!((world.y - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_wheel_zoom_keeps_anchor() {
        let mut viewport = Viewport::default();
        let anchor = Point::new(200.0, 120.0);
        let before = viewport.screen_to_world(anchor);
        viewport.zoom_wheel(anchor, -1.0);
        assert!((viewport.zoom - ZOOM_STEP).abs() < 1e-10);
        let after = viewport.screen_to_world(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);

        viewport.zoom_wheel(anchor, 1.0);
        assert!((viewport.zoom - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::default();
        viewport.zoom_at(Point::ZERO, 0.001);
        assert!((viewport.zoom - viewport.min_zoom).abs() < f64::EPSILON);
        viewport.zoom_at(Point::ZERO, 1000.0);
        assert!((viewport.zoom - viewport.max_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recenter() {
        let mut viewport = Viewport::default();
        viewport.pan(Vec2::new(10.0, 20.0));
        viewport.zoom_at(Point::ZERO, 2.0);
        viewport.recenter();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
        assert_eq!(viewport.center_world(), Point::new(400.0, 300.0));
    }
}
