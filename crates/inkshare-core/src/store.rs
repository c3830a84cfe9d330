//! The ordered action sequence shared between peers.

use crate::actions::{Action, ActionId};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered list of actions; order is paint order.
///
/// The whole store, never a diff, is what gets recorded in history and sent
/// to peers. It serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionStore {
    actions: Vec<Action>,
}

impl ActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn get(&self, id: &ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| a.id() == id)
    }

    pub fn contains(&self, id: &ActionId) -> bool {
        self.get(id).is_some()
    }

    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ActionId> {
        self.actions.iter().map(Action::id)
    }

    /// Copy of this store with `action` appended on top.
    pub fn with(&self, action: Action) -> Self {
        let mut actions = self.actions.clone();
        actions.push(action);
        Self { actions }
    }

    /// Copy of this store without the action `id`.
    pub fn without(&self, id: &ActionId) -> Self {
        self.without_all(std::slice::from_ref(id))
    }

    /// Copy of this store without any of `ids`.
    pub fn without_all(&self, ids: &[ActionId]) -> Self {
        let actions = self
            .actions
            .iter()
            .filter(|a| !ids.contains(a.id()))
            .cloned()
            .collect();
        Self { actions }
    }

    /// Copy of this store with every action in `ids` moved by `delta`.
    pub fn translated(&self, ids: &[ActionId], delta: Vec2) -> Self {
        let actions = self
            .actions
            .iter()
            .map(|a| {
                let mut a = a.clone();
                if ids.contains(a.id()) {
                    a.translate(delta);
                }
                a
            })
            .collect();
        Self { actions }
    }

    /// Copy of this store with action `id` resized in place.
    ///
    /// Kinds that cannot be resized, and unknown ids, are left as they are.
    pub fn resized(&self, id: &ActionId, origin: Point, scale: Vec2) -> Self {
        let actions = self
            .actions
            .iter()
            .map(|a| {
                let mut a = a.clone();
                if a.id() == id {
                    a.resize(origin, scale);
                }
                a
            })
            .collect();
        Self { actions }
    }

    /// First id that appears more than once, if any.
    pub fn first_duplicate_id(&self) -> Option<&ActionId> {
        let mut seen = HashSet::new();
        self.ids().find(|id| !seen.insert(*id))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Vec<Action>> for ActionStore {
    fn from(actions: Vec<Action>) -> Self {
        Self { actions }
    }
}

impl FromIterator<Action> for ActionStore {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}
