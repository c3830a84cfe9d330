//! The drawing surface tools subscribe to for pointer input.

use super::{ToolEffect, ToolStyle};
use crate::actions::{Action, ActionId};
use crate::camera::Viewport;
use crate::input::{PointerEvent, TransformInput};
use crate::selection::SelectionSet;
use crate::store::ActionStore;
use kurbo::Vec2;
use std::fmt;

/// Read-only view of the canvas handed to listeners.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    pub actions: &'a ActionStore,
    pub selection: &'a SelectionSet,
    pub style: &'a ToolStyle,
    pub viewport: &'a Viewport,
}

/// Transient feedback for a gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Preview {
    #[default]
    None,
    /// The action that will be created when the gesture completes.
    Action(Action),
    /// Actions being dragged, not yet recorded.
    Moving { ids: Vec<ActionId>, delta: Vec2 },
}

/// A handler for pointer input on the surface.
pub trait PointerListener {
    fn on_pointer(&mut self, event: &PointerEvent, cx: &ToolContext<'_>) -> Vec<ToolEffect>;

    /// A transform handle drag finished on an action.
    fn on_transform(&mut self, _input: &TransformInput, _cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        Vec::new()
    }

    /// Abandon any gesture in progress.
    fn cancel(&mut self) {}

    fn preview(&self, _cx: &ToolContext<'_>) -> Preview {
        Preview::None
    }
}

/// Handle returned by [`PointerSurface::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Fans pointer events out to subscribed listeners.
#[derive(Default)]
pub struct PointerSurface {
    listeners: Vec<(ListenerId, Box<dyn PointerListener>)>,
    next_id: u64,
}

impl fmt::Debug for PointerSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerSurface")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PointerSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn PointerListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `event` to every listener and collect their effects in order.
    pub fn dispatch(&mut self, event: &PointerEvent, cx: &ToolContext<'_>) -> Vec<ToolEffect> {
        self.listeners
            .iter_mut()
            .flat_map(|(_, listener)| listener.on_pointer(event, cx))
            .collect()
    }

    /// Deliver a finished transform to every listener.
    pub fn dispatch_transform(
        &mut self,
        input: &TransformInput,
        cx: &ToolContext<'_>,
    ) -> Vec<ToolEffect> {
        self.listeners
            .iter_mut()
            .flat_map(|(_, listener)| listener.on_transform(input, cx))
            .collect()
    }

    pub fn cancel_all(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener.cancel();
        }
    }

    /// Preview from the first listener that has one.
    pub fn preview(&self, cx: &ToolContext<'_>) -> Preview {
        self.listeners
            .iter()
            .map(|(_, listener)| listener.preview(cx))
            .find(|p| *p != Preview::None)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    struct Counter;

    impl PointerListener for Counter {
        fn on_pointer(&mut self, _event: &PointerEvent, _cx: &ToolContext<'_>) -> Vec<ToolEffect> {
            vec![ToolEffect::ClearSelection]
        }
    }

    #[test]
    fn test_subscribe_dispatch_unsubscribe() {
        let actions = ActionStore::new();
        let selection = SelectionSet::new();
        let style = ToolStyle::default();
        let viewport = Viewport::default();
        let cx = ToolContext {
            actions: &actions,
            selection: &selection,
            style: &style,
            viewport: &viewport,
        };

        let mut surface = PointerSurface::new();
        let a = surface.subscribe(Box::new(Counter));
        let b = surface.subscribe(Box::new(Counter));
        assert_eq!(surface.dispatch(&PointerEvent::down(Point::ZERO), &cx).len(), 2);

        assert!(surface.unsubscribe(a));
        assert!(!surface.unsubscribe(a));
        assert_eq!(surface.listener_count(), 1);
        assert_eq!(surface.dispatch(&PointerEvent::down(Point::ZERO), &cx).len(), 1);
        assert!(surface.unsubscribe(b));
        assert!(surface.dispatch(&PointerEvent::down(Point::ZERO), &cx).is_empty());
    }
}
