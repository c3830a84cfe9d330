//! One pointer listener per tool.

use super::{PointerListener, Preview, ToolContext, ToolEffect, ToolKind};
use crate::actions::{
    Action, ArrowAction, CircleAction, LineAction, RectangleAction, TextAction,
};
use crate::input::{PointerEvent, TransformInput};
use crate::selection::MoveState;
use kurbo::{Point, Vec2};

/// Pointer travel below which a press and release count as a click.
const CLICK_TOLERANCE: f64 = 5.0;

/// Build the listener for `tool`.
pub fn listener_for(tool: ToolKind) -> Box<dyn PointerListener> {
    match tool {
        ToolKind::Select => Box::new(SelectTool::default()),
        ToolKind::Pan => Box::new(PanTool::default()),
        ToolKind::Draw => Box::new(DrawTool::default()),
        ToolKind::StraightLine => Box::new(StraightLineTool::default()),
        ToolKind::Arrow => Box::new(ArrowTool::default()),
        ToolKind::Rectangle => Box::new(RectangleTool::default()),
        ToolKind::Circle => Box::new(CircleTool::default()),
        ToolKind::Text => Box::new(TextTool::default()),
        ToolKind::Image => Box::new(ImageTool),
        ToolKind::Eraser => Box::new(EraserTool),
    }
}

/// A primary-button press followed by drags.
#[derive(Debug, Clone, Copy)]
struct Gesture {
    start: Point,
    current: Point,
}

/// Track a press/drag/release and report the finished gesture on release.
fn track(gesture: &mut Option<Gesture>, event: &PointerEvent) -> Option<Gesture> {
    match event {
        PointerEvent::Down {
            position, button, ..
        } if button.is_primary() => {
            *gesture = Some(Gesture {
                start: *position,
                current: *position,
            });
            None
        }
        PointerEvent::Move { position } => {
            if let Some(g) = gesture.as_mut() {
                g.current = *position;
            }
            None
        }
        PointerEvent::Up { position, button } if button.is_primary() => {
            let mut finished = gesture.take()?;
            finished.current = *position;
            Some(finished)
        }
        _ => None,
    }
}

/// Freehand strokes.
#[derive(Debug, Default)]
pub struct DrawTool {
    points: Vec<Point>,
    drawing: bool,
}

impl DrawTool {
    fn stroke(&self, cx: &ToolContext<'_>) -> LineAction {
        LineAction::new(&self.points, &cx.style.stroke, cx.style.stroke_width)
    }
}

impl PointerListener for DrawTool {
    fn on_pointer(&mut self, event: &PointerEvent, cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        match event {
            PointerEvent::Down {
                position, button, ..
            } if button.is_primary() => {
                self.drawing = true;
                self.points = vec![*position];
                Vec::new()
            }
            PointerEvent::Move { position } if self.drawing => {
                self.points.push(*position);
                Vec::new()
            }
            PointerEvent::Up { position, button } if button.is_primary() && self.drawing => {
                self.drawing = false;
                if self.points.last() != Some(position) {
                    self.points.push(*position);
                }
                let effects = if self.points.len() >= 2 {
                    vec![ToolEffect::Create(Action::Draw(self.stroke(cx)))]
                } else {
                    Vec::new()
                };
                self.points.clear();
                effects
            }
            _ => Vec::new(),
        }
    }

    fn cancel(&mut self) {
        self.drawing = false;
        self.points.clear();
    }

    fn preview(&self, cx: &ToolContext<'_>) -> Preview {
        if self.drawing && self.points.len() >= 2 {
            Preview::Action(Action::Draw(self.stroke(cx)))
        } else {
            Preview::None
        }
    }
}

/// Straight lines between press and release.
#[derive(Debug, Default)]
pub struct StraightLineTool {
    gesture: Option<Gesture>,
}

impl StraightLineTool {
    fn build(g: Gesture, cx: &ToolContext<'_>) -> Option<Action> {
        let width = cx.style.stroke_width;
        if g.start.distance(g.current) < width * 2.0 {
            return None;
        }
        Some(Action::StraightLine(LineAction::new(
            &[g.start, g.current],
            &cx.style.stroke,
            width,
        )))
    }
}

impl PointerListener for StraightLineTool {
    fn on_pointer(&mut self, event: &PointerEvent, cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        track(&mut self.gesture, event)
            .and_then(|g| Self::build(g, cx))
            .map(ToolEffect::Create)
            .into_iter()
            .collect()
    }

    fn cancel(&mut self) {
        self.gesture = None;
    }

    fn preview(&self, cx: &ToolContext<'_>) -> Preview {
        self.gesture
            .and_then(|g| Self::build(g, cx))
            .map_or(Preview::None, Preview::Action)
    }
}

/// Arrows from press to release.
#[derive(Debug, Default)]
pub struct ArrowTool {
    gesture: Option<Gesture>,
}

impl ArrowTool {
    fn build(g: Gesture, cx: &ToolContext<'_>) -> Option<Action> {
        let width = cx.style.stroke_width;
        if g.start.distance(g.current) < width * 4.0 {
            return None;
        }
        Some(Action::Arrow(ArrowAction::new(
            g.start,
            g.current,
            &cx.style.stroke,
            width,
        )))
    }
}

impl PointerListener for ArrowTool {
    fn on_pointer(&mut self, event: &PointerEvent, cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        track(&mut self.gesture, event)
            .and_then(|g| Self::build(g, cx))
            .map(ToolEffect::Create)
            .into_iter()
            .collect()
    }

    fn cancel(&mut self) {
        self.gesture = None;
    }

    fn preview(&self, cx: &ToolContext<'_>) -> Preview {
        self.gesture
            .and_then(|g| Self::build(g, cx))
            .map_or(Preview::None, Preview::Action)
    }
}

/// Rectangles spanned by the drag.
#[derive(Debug, Default)]
pub struct RectangleTool {
    gesture: Option<Gesture>,
}

impl RectangleTool {
    fn build(g: Gesture, cx: &ToolContext<'_>) -> Option<Action> {
        let mut rect =
            RectangleAction::from_corners(g.start, g.current, &cx.style.stroke, cx.style.stroke_width);
        if rect.is_too_small() {
            return None;
        }
        rect.fill = cx.style.shape_fill();
        rect.opacity = cx.style.opacity;
        Some(Action::Rectangle(rect))
    }
}

impl PointerListener for RectangleTool {
    fn on_pointer(&mut self, event: &PointerEvent, cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        track(&mut self.gesture, event)
            .and_then(|g| Self::build(g, cx))
            .map(ToolEffect::Create)
            .into_iter()
            .collect()
    }

    fn cancel(&mut self) {
        self.gesture = None;
    }

    fn preview(&self, cx: &ToolContext<'_>) -> Preview {
        self.gesture
            .and_then(|g| Self::build(g, cx))
            .map_or(Preview::None, Preview::Action)
    }
}

/// Circles whose diameter is the drag.
#[derive(Debug, Default)]
pub struct CircleTool {
    gesture: Option<Gesture>,
}

impl CircleTool {
    fn build(g: Gesture, cx: &ToolContext<'_>) -> Option<Action> {
        let mut circle =
            CircleAction::from_drag(g.start, g.current, &cx.style.stroke, cx.style.stroke_width);
        if circle.radius < CircleAction::MIN_RADIUS {
            return None;
        }
        circle.fill = cx.style.shape_fill();
        circle.opacity = cx.style.opacity;
        Some(Action::Circle(circle))
    }
}

impl PointerListener for CircleTool {
    fn on_pointer(&mut self, event: &PointerEvent, cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        track(&mut self.gesture, event)
            .and_then(|g| Self::build(g, cx))
            .map(ToolEffect::Create)
            .into_iter()
            .collect()
    }

    fn cancel(&mut self) {
        self.gesture = None;
    }

    fn preview(&self, cx: &ToolContext<'_>) -> Preview {
        self.gesture
            .and_then(|g| Self::build(g, cx))
            .map_or(Preview::None, Preview::Action)
    }
}

/// Drops placeholder text where the user clicks.
#[derive(Debug, Default)]
pub struct TextTool {
    gesture: Option<Gesture>,
}

impl PointerListener for TextTool {
    fn on_pointer(&mut self, event: &PointerEvent, cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        match track(&mut self.gesture, event) {
            Some(g) if g.start.distance(g.current) <= CLICK_TOLERANCE => {
                let text = TextAction::placeholder(g.start, &cx.style.stroke);
                vec![ToolEffect::Create(Action::Text(text))]
            }
            _ => Vec::new(),
        }
    }

    fn cancel(&mut self) {
        self.gesture = None;
    }
}

/// Images are placed through the canvas, not by pointer gestures.
#[derive(Debug, Default)]
pub struct ImageTool;

impl PointerListener for ImageTool {
    fn on_pointer(&mut self, _event: &PointerEvent, _cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        Vec::new()
    }
}

/// Removes the action under a primary-button press.
#[derive(Debug, Default)]
pub struct EraserTool;

impl PointerListener for EraserTool {
    fn on_pointer(&mut self, event: &PointerEvent, _cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        match event {
            PointerEvent::Down {
                button,
                target: Some(id),
                ..
            } if button.is_primary() => vec![ToolEffect::Remove(id.clone())],
            _ => Vec::new(),
        }
    }
}

/// Click to select, shift-click to toggle, drag to move the selection.
#[derive(Debug, Default)]
pub struct SelectTool {
    moving: Option<MoveState>,
}

impl PointerListener for SelectTool {
    fn on_pointer(&mut self, event: &PointerEvent, cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
                target,
            } if button.is_primary() => {
                let Some(id) = target else {
                    self.moving = None;
                    return vec![ToolEffect::ClearSelection];
                };
                if modifiers.shift {
                    return vec![ToolEffect::ToggleSelect(id.clone())];
                }
                if cx.selection.contains(id) {
                    self.moving = Some(MoveState::new(*position, cx.selection.ordered_in(cx.actions)));
                    Vec::new()
                } else {
                    self.moving = Some(MoveState::new(*position, vec![id.clone()]));
                    vec![ToolEffect::Select(id.clone())]
                }
            }
            PointerEvent::Move { position } => {
                if let Some(state) = self.moving.as_mut() {
                    state.step_to(*position);
                }
                Vec::new()
            }
            PointerEvent::Up { position, button } if button.is_primary() => {
                let Some(mut state) = self.moving.take() else {
                    return Vec::new();
                };
                state.step_to(*position);
                let delta = state.delta();
                if delta == Vec2::ZERO {
                    return Vec::new();
                }
                vec![ToolEffect::Translate {
                    ids: state.ids,
                    delta,
                }]
            }
            _ => Vec::new(),
        }
    }

    /// Resizes apply to selected squares, circles and images only.
    fn on_transform(&mut self, input: &TransformInput, cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        let resizable = cx
            .actions
            .get(&input.target)
            .is_some_and(|a| a.is_resizable());
        if !resizable || !cx.selection.contains(&input.target) {
            return Vec::new();
        }
        self.moving = None;
        vec![ToolEffect::Resize {
            id: input.target.clone(),
            origin: input.origin,
            scale: input.scale,
        }]
    }

    fn cancel(&mut self) {
        self.moving = None;
    }

    fn preview(&self, _cx: &ToolContext<'_>) -> Preview {
        match &self.moving {
            Some(state) if state.delta() != Vec2::ZERO => Preview::Moving {
                ids: state.ids.clone(),
                delta: state.delta(),
            },
            _ => Preview::None,
        }
    }
}

/// Drags the viewport.
///
/// Positions arrive in world space, so they are mapped back to the screen
/// through the current viewport before taking deltas.
#[derive(Debug, Default)]
pub struct PanTool {
    last_screen: Option<Point>,
}

impl PointerListener for PanTool {
    fn on_pointer(&mut self, event: &PointerEvent, cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        match event {
            PointerEvent::Down { position, .. } => {
                self.last_screen = Some(cx.viewport.world_to_screen(*position));
                Vec::new()
            }
            PointerEvent::Move { position } => {
                let Some(last) = self.last_screen else {
                    return Vec::new();
                };
                let screen = cx.viewport.world_to_screen(*position);
                self.last_screen = Some(screen);
                let delta = screen - last;
                if delta == Vec2::ZERO {
                    Vec::new()
                } else {
                    vec![ToolEffect::Pan(delta)]
                }
            }
            PointerEvent::Up { .. } => {
                self.last_screen = None;
                Vec::new()
            }
        }
    }

    fn cancel(&mut self) {
        self.last_screen = None;
    }
}
