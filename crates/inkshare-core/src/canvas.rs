//! The editing surface: scene, history, selection, tools and viewport.

use crate::actions::{Action, ActionId, ImageAction};
use crate::camera::Viewport;
use crate::history::{HistoryError, HistoryManager, RecordOutcome};
use crate::input::{KeyInput, PointerEvent, ScrollInput, TransformInput};
use crate::selection::SelectionSet;
use crate::shortcuts::{EditorCommand, ShortcutRegistry};
use crate::storage::{LOCAL_SCENE_KEY, SceneStorage, load_or_empty};
use crate::store::ActionStore;
use crate::tools::{PointerSurface, Preview, ToolContext, ToolController, ToolEffect, ToolKind, ToolStyle};
use kurbo::Size;
use std::sync::Arc;

/// Where a scene transition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// An edit, undo, redo or reset made on this client.
    Local,
    /// A snapshot received from a peer.
    Remote,
}

/// One transition of the scene, published after it is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneChange {
    pub origin: Origin,
    pub store: ActionStore,
}

/// How the host should treat a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyResponse {
    pub command: Option<EditorCommand>,
    /// Suppress the platform's default handling of the key.
    pub prevent_default: bool,
}

/// A drawing canvas bound to local storage.
pub struct Canvas {
    history: HistoryManager,
    selection: SelectionSet,
    tools: ToolController,
    surface: PointerSurface,
    pub viewport: Viewport,
    pub style: ToolStyle,
    storage: Arc<dyn SceneStorage>,
    changes: Vec<SceneChange>,
}

impl Canvas {
    /// Create an empty canvas that persists into `storage`.
    pub fn new(storage: Arc<dyn SceneStorage>) -> Self {
        Self::with_history(HistoryManager::new(), storage)
    }

    /// Restore the scene last persisted in `storage`.
    ///
    /// A missing or unreadable scene starts an empty canvas.
    pub fn load(storage: Arc<dyn SceneStorage>) -> Result<Self, HistoryError> {
        let store = match load_or_empty(storage.as_ref(), LOCAL_SCENE_KEY) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("Could not restore scene, starting empty: {}", e);
                ActionStore::new()
            }
        };
        let history = match HistoryManager::with_store(store) {
            Ok(history) => history,
            Err(HistoryError::DuplicateId(id)) => {
                log::warn!("Stored scene repeats action {}, starting empty", id);
                HistoryManager::new()
            }
            Err(e) => return Err(e),
        };
        if !history.current().is_empty() {
            log::info!("Restored scene with {} actions", history.current().len());
        }
        Ok(Self::with_history(history, storage))
    }

    fn with_history(history: HistoryManager, storage: Arc<dyn SceneStorage>) -> Self {
        let mut surface = PointerSurface::new();
        let tools = ToolController::new(&mut surface);
        Self {
            history,
            selection: SelectionSet::new(),
            tools,
            surface,
            viewport: Viewport::default(),
            style: ToolStyle::default(),
            storage,
            changes: Vec::new(),
        }
    }

    pub fn actions(&self) -> &ActionStore {
        self.history.current()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn surface(&self) -> &PointerSurface {
        &self.surface
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current()
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.resize(Size::new(width, height));
    }

    /// Apply `updater` to the scene and record the result in history.
    ///
    /// When the edit adds an action while a creation tool is active, the new
    /// action becomes the only selection and the select tool takes over.
    pub fn record_action<F>(&mut self, updater: F) -> Result<RecordOutcome, HistoryError>
    where
        F: FnOnce(&ActionStore) -> ActionStore,
    {
        let tool = self.tools.current();
        let outcome = self.history.record(updater)?;
        if let RecordOutcome::Recorded { created } = &outcome {
            self.selection.retain_existing(self.history.current());
            self.commit(Origin::Local);
            if let Some(id) = created {
                if tool.is_creation_tool() {
                    self.selection.select_only(id.clone());
                    self.set_tool(ToolKind::Select);
                }
            }
        }
        Ok(outcome)
    }

    pub fn undo(&mut self) -> Result<bool, HistoryError> {
        let changed = self.history.undo()?;
        if changed {
            self.selection.retain_existing(self.history.current());
            self.commit(Origin::Local);
        }
        Ok(changed)
    }

    pub fn redo(&mut self) -> Result<bool, HistoryError> {
        let changed = self.history.redo()?;
        if changed {
            self.selection.retain_existing(self.history.current());
            self.commit(Origin::Local);
        }
        Ok(changed)
    }

    /// Clear the scene and all history.
    pub fn reset(&mut self) {
        let changed = !self.history.current().is_empty();
        self.history.reset();
        self.selection.clear();
        self.surface.cancel_all();
        if changed {
            self.commit(Origin::Local);
        }
    }

    /// Replace the scene with a snapshot from a peer.
    ///
    /// History is left alone, so undo steps back through local edits only.
    /// A snapshot that repeats an action id is dropped; returns whether the
    /// scene was replaced.
    pub fn apply_remote(&mut self, store: ActionStore) -> bool {
        if let Some(id) = store.first_duplicate_id() {
            log::warn!("Dropping peer scene that repeats action {}", id);
            return false;
        }
        self.history.replace_current(store);
        self.selection.retain_existing(self.history.current());
        self.commit(Origin::Remote);
        true
    }

    /// Switch tools. Any tool other than select clears the selection.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool, &mut self.surface);
        if tool != ToolKind::Select {
            self.selection.clear();
        }
    }

    pub fn select(&mut self, id: ActionId) {
        self.selection.select_only(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        for action in self.history.current().iter() {
            if !action.is_tombstone() {
                self.selection.add(action.id().clone());
            }
        }
    }

    /// Remove every selected action as one edit.
    pub fn delete_selected(&mut self) -> Result<bool, HistoryError> {
        if self.selection.is_empty() {
            return Ok(false);
        }
        let ids = self.selection.ordered_in(self.history.current());
        self.selection.clear();
        let outcome = self.record_action(|s| s.without_all(&ids))?;
        Ok(outcome.is_recorded())
    }

    /// Place an image in the middle of the visible area.
    pub fn place_image(&mut self, src: &str, natural: Size) -> Result<ActionId, HistoryError> {
        let image = ImageAction::centered(src, natural, self.viewport.center_world());
        let id = image.id.clone();
        self.record_action(|s| s.with(Action::Image(image)))?;
        Ok(id)
    }

    pub fn cancel_gesture(&mut self) {
        self.surface.cancel_all();
    }

    /// Route a pointer event through the active tool.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Result<(), HistoryError> {
        let cx = ToolContext {
            actions: self.history.current(),
            selection: &self.selection,
            style: &self.style,
            viewport: &self.viewport,
        };
        let effects = self.surface.dispatch(event, &cx);
        for effect in effects {
            self.apply_effect(effect)?;
        }
        Ok(())
    }

    /// Route a finished transform-handle drag through the active tool.
    pub fn handle_transform(&mut self, input: &TransformInput) -> Result<(), HistoryError> {
        let cx = ToolContext {
            actions: self.history.current(),
            selection: &self.selection,
            style: &self.style,
            viewport: &self.viewport,
        };
        let effects = self.surface.dispatch_transform(input, &cx);
        for effect in effects {
            self.apply_effect(effect)?;
        }
        Ok(())
    }

    fn apply_effect(&mut self, effect: ToolEffect) -> Result<(), HistoryError> {
        match effect {
            ToolEffect::Create(action) => {
                self.record_action(|s| s.with(action))?;
            }
            ToolEffect::Remove(id) => {
                self.record_action(|s| s.without(&id))?;
            }
            ToolEffect::Translate { ids, delta } => {
                self.record_action(|s| s.translated(&ids, delta))?;
            }
            ToolEffect::Resize { id, origin, scale } => {
                self.record_action(|s| s.resized(&id, origin, scale))?;
            }
            ToolEffect::Select(id) => self.selection.select_only(id),
            ToolEffect::ToggleSelect(id) => self.selection.toggle(id),
            ToolEffect::ClearSelection => self.selection.clear(),
            ToolEffect::Pan(delta) => self.viewport.pan(delta),
        }
        Ok(())
    }

    /// Ctrl/Cmd+wheel zooms around the pointer, a plain wheel pans.
    pub fn handle_scroll(&mut self, scroll: &ScrollInput) {
        if scroll.modifiers.command() {
            self.viewport.zoom_wheel(scroll.position, scroll.delta.y);
        } else {
            self.viewport.pan(-scroll.delta);
        }
    }

    /// Run the shortcut bound to `key`, if any.
    pub fn handle_key(&mut self, key: &KeyInput) -> Result<KeyResponse, HistoryError> {
        let Some(command) = ShortcutRegistry::lookup(key) else {
            return Ok(KeyResponse::default());
        };
        match command {
            EditorCommand::Undo => {
                self.undo()?;
            }
            EditorCommand::Redo => {
                self.redo()?;
            }
            EditorCommand::DeleteSelection => {
                self.delete_selected()?;
            }
            EditorCommand::CancelGesture => self.cancel_gesture(),
            EditorCommand::SelectAll => self.select_all(),
            EditorCommand::SetTool(tool) => self.set_tool(tool),
        }
        Ok(KeyResponse {
            command: Some(command),
            prevent_default: matches!(
                command,
                EditorCommand::Undo | EditorCommand::Redo | EditorCommand::SelectAll
            ),
        })
    }

    /// Feedback for the gesture in progress.
    pub fn preview(&self) -> Preview {
        let cx = ToolContext {
            actions: self.history.current(),
            selection: &self.selection,
            style: &self.style,
            viewport: &self.viewport,
        };
        self.surface.preview(&cx)
    }

    /// The scene as it should be drawn right now, gesture preview included.
    pub fn display_store(&self) -> ActionStore {
        let current = self.history.current();
        match self.preview() {
            Preview::None => current.clone(),
            Preview::Action(action) => current.with(action),
            Preview::Moving { ids, delta } => current.translated(&ids, delta),
        }
    }

    /// Drain scene changes published since the last call.
    pub fn take_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.changes)
    }

    fn commit(&mut self, origin: Origin) {
        let store = self.history.current().clone();
        if let Err(e) = self.storage.save(LOCAL_SCENE_KEY, &store) {
            log::warn!("Failed to persist scene: {}", e);
        }
        self.changes.push(SceneChange { origin, store });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{RectangleAction, TextAction};
    use crate::input::Modifiers;
    use crate::storage::MemoryStorage;
    use kurbo::{Point, Vec2};

    fn canvas() -> (Canvas, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (Canvas::new(storage.clone()), storage)
    }

    fn text() -> Action {
        Action::Text(TextAction::placeholder(Point::ZERO, "black"))
    }

    fn drag(canvas: &mut Canvas, from: Point, to: Point) {
        canvas.handle_pointer(&PointerEvent::down(from)).unwrap();
        canvas.handle_pointer(&PointerEvent::moved(to)).unwrap();
        canvas.handle_pointer(&PointerEvent::up(to)).unwrap();
    }

    #[test]
    fn test_record_persists_and_publishes() {
        let (mut canvas, storage) = canvas();
        canvas.record_action(|s| s.with(text())).unwrap();
        let changes = canvas.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].origin, Origin::Local);
        assert_eq!(storage.load(LOCAL_SCENE_KEY).unwrap(), *canvas.actions());
        assert!(canvas.take_changes().is_empty());
    }

    #[test]
    fn test_noop_record_publishes_nothing() {
        let (mut canvas, _) = canvas();
        let outcome = canvas.record_action(|s| s.clone()).unwrap();
        assert_eq!(outcome, RecordOutcome::Unchanged);
        assert!(canvas.take_changes().is_empty());
    }

    #[test]
    fn test_creation_tool_hands_over_to_select() {
        let (mut canvas, _) = canvas();
        canvas.set_tool(ToolKind::Circle);
        drag(&mut canvas, Point::new(0.0, 0.0), Point::new(40.0, 0.0));
        assert_eq!(canvas.actions().len(), 1);
        assert_eq!(canvas.tool(), ToolKind::Select);
        let id = canvas.actions().last().unwrap().id().clone();
        assert!(canvas.selection().contains(&id));
        assert_eq!(canvas.selection().len(), 1);
        assert_eq!(canvas.surface().listener_count(), 1);
    }

    #[test]
    fn test_draw_tool_stays_active() {
        let (mut canvas, _) = canvas();
        canvas.set_tool(ToolKind::Draw);
        drag(&mut canvas, Point::new(0.0, 0.0), Point::new(40.0, 10.0));
        assert_eq!(canvas.actions().len(), 1);
        assert_eq!(canvas.tool(), ToolKind::Draw);
        assert!(canvas.selection().is_empty());
    }

    #[test]
    fn test_non_select_tool_clears_selection() {
        let (mut canvas, _) = canvas();
        canvas.record_action(|s| s.with(text())).unwrap();
        canvas.select_all();
        assert_eq!(canvas.selection().len(), 1);
        canvas.set_tool(ToolKind::Select);
        assert_eq!(canvas.selection().len(), 1);
        canvas.set_tool(ToolKind::Pan);
        assert!(canvas.selection().is_empty());
    }

    #[test]
    fn test_move_selection_records_once() {
        let (mut canvas, _) = canvas();
        let action = text();
        let id = action.id().clone();
        canvas.record_action(|s| s.with(action)).unwrap();
        let history_len = canvas.history().snapshot_count();

        canvas
            .handle_pointer(&PointerEvent::down_on(Point::new(5.0, 5.0), id.clone()))
            .unwrap();
        canvas.handle_pointer(&PointerEvent::moved(Point::new(10.0, 5.0))).unwrap();
        canvas.handle_pointer(&PointerEvent::moved(Point::new(25.0, 5.0))).unwrap();
        // Preview shows the move before it is recorded.
        match canvas.display_store().get(&id) {
            Some(Action::Text(t)) => assert!((t.x - 20.0).abs() < f64::EPSILON),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(canvas.history().snapshot_count(), history_len);

        canvas.handle_pointer(&PointerEvent::up(Point::new(25.0, 5.0))).unwrap();
        assert_eq!(canvas.history().snapshot_count(), history_len + 1);
        match canvas.actions().get(&id) {
            Some(Action::Text(t)) => assert!((t.x - 20.0).abs() < f64::EPSILON),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_eraser_removes_target() {
        let (mut canvas, _) = canvas();
        let action = text();
        let id = action.id().clone();
        canvas.record_action(|s| s.with(action)).unwrap();
        canvas.set_tool(ToolKind::Eraser);
        canvas.handle_pointer(&PointerEvent::down_on(Point::ZERO, id.clone())).unwrap();
        assert!(!canvas.actions().contains(&id));
        assert_eq!(canvas.tool(), ToolKind::Eraser);
    }

    #[test]
    fn test_undo_redo_publish_local() {
        let (mut canvas, _) = canvas();
        canvas.record_action(|s| s.with(text())).unwrap();
        canvas.take_changes();
        assert!(canvas.undo().unwrap());
        assert!(!canvas.undo().unwrap());
        assert!(canvas.redo().unwrap());
        let origins: Vec<_> = canvas.take_changes().into_iter().map(|c| c.origin).collect();
        assert_eq!(origins, vec![Origin::Local, Origin::Local]);
    }

    #[test]
    fn test_apply_remote() {
        let (mut canvas, storage) = canvas();
        let local = text();
        let local_id = local.id().clone();
        canvas.record_action(|s| s.with(local)).unwrap();
        canvas.select(local_id);
        canvas.take_changes();

        let remote = ActionStore::new().with(text());
        canvas.apply_remote(remote.clone());
        assert_eq!(*canvas.actions(), remote);
        assert!(canvas.selection().is_empty());
        assert_eq!(storage.load(LOCAL_SCENE_KEY).unwrap(), remote);
        assert_eq!(canvas.history().snapshot_count(), 2);

        let changes = canvas.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].origin, Origin::Remote);
    }

    #[test]
    fn test_unchanged_edit_after_remote_is_ignored() {
        let (mut canvas, _) = canvas();
        canvas.apply_remote(ActionStore::new().with(text()));
        canvas.take_changes();

        let outcome = canvas.record_action(|s| s.clone()).unwrap();
        assert_eq!(outcome, RecordOutcome::Unchanged);
        assert_eq!(canvas.history().snapshot_count(), 1);
        assert_eq!(canvas.history().step(), 0);
        assert!(canvas.take_changes().is_empty());
    }

    #[test]
    fn test_erasing_peer_action_is_recorded() {
        let (mut canvas, storage) = canvas();
        let peer = text();
        let peer_id = peer.id().clone();
        canvas.apply_remote(ActionStore::new().with(peer));
        canvas.take_changes();

        canvas.set_tool(ToolKind::Eraser);
        canvas
            .handle_pointer(&PointerEvent::down_on(Point::ZERO, peer_id))
            .unwrap();
        canvas.handle_pointer(&PointerEvent::up(Point::ZERO)).unwrap();

        assert!(canvas.actions().is_empty());
        assert_eq!(canvas.history().step(), 1);
        assert_eq!(storage.load(LOCAL_SCENE_KEY).unwrap(), ActionStore::new());
        let changes = canvas.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].origin, Origin::Local);
        assert!(changes[0].store.is_empty());
    }

    #[test]
    fn test_remote_scene_with_repeated_ids_is_dropped() {
        let (mut canvas, _) = canvas();
        let local = text();
        canvas.record_action(|s| s.with(local)).unwrap();
        let before = canvas.actions().clone();
        canvas.take_changes();

        let dup = text();
        let broken = ActionStore::new().with(dup.clone()).with(dup);
        assert!(!canvas.apply_remote(broken));
        assert_eq!(*canvas.actions(), before);
        assert!(canvas.take_changes().is_empty());

        // Local editing still works.
        assert!(canvas.record_action(|s| s.with(text())).unwrap().is_recorded());
    }

    #[test]
    fn test_load_ignores_stored_scene_with_repeated_ids() {
        let storage = Arc::new(MemoryStorage::new());
        let dup = text();
        let broken = ActionStore::new().with(dup.clone()).with(dup);
        storage.save(LOCAL_SCENE_KEY, &broken).unwrap();

        let mut canvas = Canvas::load(storage).unwrap();
        assert!(canvas.actions().is_empty());
        assert!(canvas.record_action(|s| s.with(text())).unwrap().is_recorded());
    }

    #[test]
    fn test_transform_resizes_selected_square() {
        let (mut canvas, _) = canvas();
        let rect = Action::Rectangle(RectangleAction::from_corners(
            Point::new(0.0, 0.0),
            Point::new(20.0, 10.0),
            "red",
            2.0,
        ));
        let id = rect.id().clone();
        canvas.record_action(|s| s.with(rect)).unwrap();
        canvas.select(id.clone());
        let history_len = canvas.history().snapshot_count();

        canvas
            .handle_transform(&TransformInput::new(
                id.clone(),
                Point::new(5.0, 5.0),
                Vec2::new(2.0, 0.0),
            ))
            .unwrap();

        assert_eq!(canvas.history().snapshot_count(), history_len + 1);
        assert_eq!(canvas.actions().len(), 1);
        match canvas.actions().get(&id) {
            Some(Action::Rectangle(r)) => {
                assert!((r.x - 5.0).abs() < f64::EPSILON);
                assert!((r.width - 40.0).abs() < f64::EPSILON);
                assert!((r.height - RectangleAction::MIN_RESIZED_SIDE).abs() < f64::EPSILON);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(canvas.undo().unwrap());
        match canvas.actions().get(&id) {
            Some(Action::Rectangle(r)) => assert!((r.width - 20.0).abs() < f64::EPSILON),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_reset() {
        let (mut canvas, _) = canvas();
        canvas.record_action(|s| s.with(text())).unwrap();
        canvas.reset();
        assert!(canvas.actions().is_empty());
        assert!(!canvas.history().can_undo());
        canvas.take_changes();
        canvas.reset();
        assert!(canvas.take_changes().is_empty());
    }

    #[test]
    fn test_load_restores_scene() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ActionStore::new().with(text());
        storage.save(LOCAL_SCENE_KEY, &store).unwrap();

        let mut canvas = Canvas::load(storage).unwrap();
        assert_eq!(*canvas.actions(), store);
        assert!(canvas.undo().unwrap());
        assert!(canvas.actions().is_empty());
    }

    #[test]
    fn test_keyboard_undo_redo() {
        let (mut canvas, _) = canvas();
        canvas.record_action(|s| s.with(text())).unwrap();

        let response = canvas.handle_key(&KeyInput::new("z", Modifiers::ctrl())).unwrap();
        assert_eq!(response.command, Some(EditorCommand::Undo));
        assert!(response.prevent_default);
        assert!(canvas.actions().is_empty());

        let response = canvas.handle_key(&KeyInput::new("y", Modifiers::ctrl())).unwrap();
        assert!(response.prevent_default);
        assert_eq!(canvas.actions().len(), 1);

        let response = canvas.handle_key(&KeyInput::plain("q")).unwrap();
        assert_eq!(response, KeyResponse::default());
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let (mut canvas, _) = canvas();
        canvas.record_action(|s| s.with(text()).with(text())).unwrap();
        canvas.select_all();
        canvas.handle_key(&KeyInput::plain("Delete")).unwrap();
        assert!(canvas.actions().is_empty());
        assert!(canvas.undo().unwrap());
        assert_eq!(canvas.actions().len(), 2);
    }

    #[test]
    fn test_place_image_selects_it() {
        let (mut canvas, _) = canvas();
        canvas.set_viewport_size(1000.0, 800.0);
        canvas.set_tool(ToolKind::Image);
        let id = canvas.place_image("data:image/png;base64,", Size::new(500.0, 500.0)).unwrap();
        match canvas.actions().get(&id) {
            Some(Action::Image(img)) => {
                assert!((img.width - 250.0).abs() < f64::EPSILON);
                assert!((img.x - 375.0).abs() < f64::EPSILON);
                assert!((img.y - 275.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(canvas.tool(), ToolKind::Select);
        assert!(canvas.selection().contains(&id));
    }

    #[test]
    fn test_scroll_zoom_and_pan() {
        let (mut canvas, _) = canvas();
        canvas.handle_scroll(&ScrollInput {
            position: Point::new(100.0, 100.0),
            delta: Vec2::new(0.0, -1.0),
            modifiers: Modifiers::ctrl(),
        });
        assert!(canvas.viewport.zoom > 1.0);

        canvas.viewport.recenter();
        canvas.handle_scroll(&ScrollInput {
            position: Point::ZERO,
            delta: Vec2::new(0.0, 30.0),
            modifiers: Modifiers::NONE,
        });
        assert_eq!(canvas.viewport.offset, Vec2::new(0.0, -30.0));
    }

    #[test]
    fn test_pan_tool_moves_viewport_only() {
        let (mut canvas, _) = canvas();
        canvas.set_tool(ToolKind::Pan);
        drag(&mut canvas, Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(canvas.viewport.offset, Vec2::new(10.0, 20.0));
        assert!(canvas.actions().is_empty());
        assert!(canvas.take_changes().is_empty());
    }
}
