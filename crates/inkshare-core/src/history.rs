//! Snapshot-based undo/redo history.
//!
//! Every recorded edit appends the serialized store to a linear log; undo and
//! redo move a cursor through it. Index 0 is always the empty scene.

use crate::actions::ActionId;
use crate::store::ActionStore;
use thiserror::Error;

/// Serialized form of an [`ActionStore`] at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn empty() -> Self {
        Self("[]".to_string())
    }

    pub fn of(store: &ActionStore) -> Result<Self, HistoryError> {
        Ok(Self(store.to_json()?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn restore(&self) -> Result<ActionStore, HistoryError> {
        Ok(ActionStore::from_json(&self.0)?)
    }
}

/// Errors raised while recording or replaying history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Duplicate action id: {0}")]
    DuplicateId(ActionId),
}

/// Result of [`HistoryManager::record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// The candidate matched the current snapshot; nothing was recorded.
    Unchanged,
    /// A new snapshot was appended.
    Recorded {
        /// The action added by this edit, when the edit grew the store.
        created: Option<ActionId>,
    },
}

impl RecordOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordOutcome::Recorded { .. })
    }
}

/// Linear history of scene snapshots plus the current store.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    log: Vec<Snapshot>,
    step: usize,
    current: ActionStore,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryManager {
    pub fn new() -> Self {
        Self {
            log: vec![Snapshot::empty()],
            step: 0,
            current: ActionStore::new(),
        }
    }

    /// Start from a previously persisted store.
    ///
    /// A non-empty store becomes snapshot 1, so a single undo clears the scene.
    pub fn with_store(store: ActionStore) -> Result<Self, HistoryError> {
        if let Some(id) = store.first_duplicate_id() {
            return Err(HistoryError::DuplicateId(id.clone()));
        }
        let mut history = Self::new();
        if !store.is_empty() {
            history.log.push(Snapshot::of(&store)?);
            history.step = 1;
            history.current = store;
        }
        Ok(history)
    }

    pub fn current(&self) -> &ActionStore {
        &self.current
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of recorded snapshots, the empty scene included.
    pub fn snapshot_count(&self) -> usize {
        self.log.len()
    }

    pub fn can_undo(&self) -> bool {
        self.step > 0
    }

    pub fn can_redo(&self) -> bool {
        self.step + 1 < self.log.len()
    }

    pub fn snapshot_at(&self, index: usize) -> Option<&Snapshot> {
        self.log.get(index)
    }

    /// Apply `updater` to the current store and record the result.
    ///
    /// A candidate identical to the current store is ignored. The current
    /// store can differ from the snapshot at the cursor after a peer's scene
    /// was applied, so the comparison is against the store itself. Any
    /// redoable snapshots are dropped when a new one is recorded.
    pub fn record<F>(&mut self, updater: F) -> Result<RecordOutcome, HistoryError>
    where
        F: FnOnce(&ActionStore) -> ActionStore,
    {
        let candidate = updater(&self.current);
        if let Some(id) = candidate.first_duplicate_id() {
            return Err(HistoryError::DuplicateId(id.clone()));
        }

        let snapshot = Snapshot::of(&candidate)?;
        if snapshot == Snapshot::of(&self.current)? {
            return Ok(RecordOutcome::Unchanged);
        }

        let created = if candidate.len() > self.current.len() {
            candidate
                .ids()
                .filter(|id| !self.current.contains(id))
                .last()
                .cloned()
        } else {
            None
        };

        self.log.truncate(self.step + 1);
        self.log.push(snapshot);
        self.step = self.log.len() - 1;
        self.current = candidate;
        log::debug!("Recorded snapshot {} ({} actions)", self.step, self.current.len());

        Ok(RecordOutcome::Recorded { created })
    }

    /// Step back one snapshot. Returns `false` at the start of history.
    pub fn undo(&mut self) -> Result<bool, HistoryError> {
        if !self.can_undo() {
            return Ok(false);
        }
        let store = self.log[self.step - 1].restore()?;
        self.step -= 1;
        self.current = store;
        Ok(true)
    }

    /// Step forward one snapshot. Returns `false` at the tail.
    pub fn redo(&mut self) -> Result<bool, HistoryError> {
        if !self.can_redo() {
            return Ok(false);
        }
        let store = self.log[self.step + 1].restore()?;
        self.step += 1;
        self.current = store;
        Ok(true)
    }

    /// Drop all history and clear the scene.
    pub fn reset(&mut self) {
        self.log = vec![Snapshot::empty()];
        self.step = 0;
        self.current = ActionStore::new();
    }

    /// Replace the current store without touching the log.
    ///
    /// Used for snapshots that arrive from peers.
    pub fn replace_current(&mut self, store: ActionStore) {
        self.current = store;
    }
}
