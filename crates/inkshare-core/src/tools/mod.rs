//! Drawing tools and the controller that switches between them.

mod handlers;
mod surface;

pub use handlers::{
    ArrowTool, CircleTool, DrawTool, EraserTool, ImageTool, PanTool, RectangleTool, SelectTool,
    StraightLineTool, TextTool, listener_for,
};
pub use surface::{ListenerId, PointerListener, PointerSurface, Preview, ToolContext};

use crate::actions::{Action, ActionId};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Default stroke color for new actions.
pub const DEFAULT_STROKE: &str = "#561ecb";
/// Default stroke width for new actions.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Draw,
    #[serde(rename = "straightline")]
    StraightLine,
    Arrow,
    #[serde(rename = "square")]
    Rectangle,
    Circle,
    Text,
    Image,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 10] = [
        ToolKind::Select,
        ToolKind::Pan,
        ToolKind::Draw,
        ToolKind::StraightLine,
        ToolKind::Arrow,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Text,
        ToolKind::Image,
        ToolKind::Eraser,
    ];

    /// Tools that produce one action per gesture and then hand over to select.
    pub fn is_creation_tool(self) -> bool {
        matches!(
            self,
            ToolKind::Text
                | ToolKind::Arrow
                | ToolKind::StraightLine
                | ToolKind::Rectangle
                | ToolKind::Circle
                | ToolKind::Image
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pan => "pan",
            ToolKind::Draw => "draw",
            ToolKind::StraightLine => "straightline",
            ToolKind::Arrow => "arrow",
            ToolKind::Rectangle => "square",
            ToolKind::Circle => "circle",
            ToolKind::Text => "text",
            ToolKind::Image => "image",
            ToolKind::Eraser => "eraser",
        }
    }
}

/// Style applied to newly drawn actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolStyle {
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: String,
    pub fill_enabled: bool,
    pub opacity: f64,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_STROKE.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill: DEFAULT_STROKE.to_string(),
            fill_enabled: false,
            opacity: 1.0,
        }
    }
}

impl ToolStyle {
    /// Fill for closed shapes, if enabled.
    pub fn shape_fill(&self) -> Option<String> {
        self.fill_enabled.then(|| self.fill.clone())
    }
}

/// What a tool asks the canvas to do in response to pointer input.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEffect {
    /// Record a new action on top of the scene.
    Create(Action),
    /// Record removal of an action.
    Remove(ActionId),
    /// Record a move of several actions.
    Translate { ids: Vec<ActionId>, delta: Vec2 },
    /// Record an in-place resize of one action.
    Resize {
        id: ActionId,
        origin: Point,
        scale: Vec2,
    },
    Select(ActionId),
    ToggleSelect(ActionId),
    ClearSelection,
    /// Pan the viewport by a screen-space delta.
    Pan(Vec2),
}

/// Tracks the active tool and keeps exactly one listener subscribed for it.
#[derive(Debug, Default)]
pub struct ToolController {
    current: ToolKind,
    subscription: Option<ListenerId>,
}

impl ToolController {
    /// Create a controller with the select tool attached to `surface`.
    pub fn new(surface: &mut PointerSurface) -> Self {
        let mut controller = Self::default();
        controller.attach(ToolKind::Select, surface);
        controller
    }

    pub fn current(&self) -> ToolKind {
        self.current
    }

    /// Switch tools, replacing the subscribed listener.
    ///
    /// Re-selecting the current tool still resubscribes, which drops any
    /// half-finished gesture.
    pub fn set_tool(&mut self, tool: ToolKind, surface: &mut PointerSurface) {
        if let Some(id) = self.subscription.take() {
            surface.unsubscribe(id);
        }
        self.attach(tool, surface);
        log::debug!("Tool set to {}", tool.name());
    }

    fn attach(&mut self, tool: ToolKind, surface: &mut PointerSurface) {
        self.current = tool;
        self.subscription = Some(surface.subscribe(listener_for(tool)));
    }
}
