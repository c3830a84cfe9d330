//! Transient selection state and in-progress moves.

use crate::actions::ActionId;
use crate::store::ActionStore;
use kurbo::{Point, Vec2};
use std::collections::HashSet;

/// Set of selected action ids.
///
/// Local to this client: never persisted and never sent to peers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    ids: HashSet<ActionId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &ActionId) -> bool {
        self.ids.contains(id)
    }

    /// Replace the selection with just `id`.
    pub fn select_only(&mut self, id: ActionId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    pub fn add(&mut self, id: ActionId) {
        self.ids.insert(id);
    }

    /// Add `id` if absent, remove it otherwise.
    pub fn toggle(&mut self, id: ActionId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Forget ids that no longer exist in `store`.
    pub fn retain_existing(&mut self, store: &ActionStore) {
        self.ids.retain(|id| store.contains(id));
    }

    /// Selected ids in paint order.
    pub fn ordered_in(&self, store: &ActionStore) -> Vec<ActionId> {
        store
            .ids()
            .filter(|id| self.ids.contains(*id))
            .cloned()
            .collect()
    }
}

/// State for dragging the selected actions.
#[derive(Debug, Clone)]
pub struct MoveState {
    pub start_point: Point,
    pub current_point: Point,
    /// Actions being moved.
    pub ids: Vec<ActionId>,
}

impl MoveState {
    pub fn new(start_point: Point, ids: Vec<ActionId>) -> Self {
        Self {
            start_point,
            current_point: start_point,
            ids,
        }
    }

    /// Total drag since the press.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Advance to `point`, returning the delta since the previous position.
    pub fn step_to(&mut self, point: Point) -> Vec2 {
        let step = point - self.current_point;
        self.current_point = point;
        step
    }
}
