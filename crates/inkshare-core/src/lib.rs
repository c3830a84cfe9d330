//! InkShare Core Library
//!
//! Scene model, undo history, drawing tools and the room sync client for the
//! InkShare collaborative whiteboard.

pub mod actions;
pub mod camera;
pub mod canvas;
pub mod collaboration;
pub mod history;
pub mod input;
pub mod selection;
pub mod shortcuts;
pub mod storage;
pub mod store;
pub mod sync;
pub mod tools;

pub use actions::{Action, ActionId, ActionKind};
pub use camera::Viewport;
pub use canvas::{Canvas, KeyResponse, Origin, SceneChange};
pub use collaboration::{Session, SyncClient, SyncConfig};
pub use history::{HistoryError, HistoryManager, RecordOutcome, Snapshot};
pub use input::{KeyInput, Modifiers, MouseButton, PointerEvent, ScrollInput, TransformInput};
pub use selection::SelectionSet;
pub use shortcuts::{EditorCommand, ShortcutRegistry};
pub use storage::{MemoryStorage, SceneStorage, StorageError};
pub use store::ActionStore;
pub use sync::{ConnectionState, SyncError, SyncEvent, Transport, TransportEvent};
#[cfg(not(target_arch = "wasm32"))]
pub use sync::{NativeWebSocket, PlatformWebSocket};
pub use tools::{ToolKind, ToolStyle};
