//! Room membership and fan-out.

use crate::protocol::ControlFrame;
use bytes::Bytes;
use dashmap::DashMap;
use std::fmt;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error};
use uuid::Uuid;

/// Identity of one socket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A frame queued for delivery to one connection.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Text(String),
    Binary(Bytes),
}

struct Member {
    id: ConnectionId,
    tx: UnboundedSender<Frame>,
}

#[derive(Default)]
struct Room {
    members: Vec<Member>,
}

impl Room {
    /// Tell every member the current count; only `joiner` sees `ImNew=true`.
    fn broadcast_count(&self, joiner: Option<ConnectionId>) {
        let count = self.members.len();
        for member in &self.members {
            let frame = ControlFrame::user_count(count, Some(member.id) == joiner);
            match frame.to_text() {
                // A closed receiver is cleaned up by its own disconnect.
                Ok(text) => {
                    let _ = member.tx.send(Frame::Text(text));
                }
                Err(e) => error!("Failed to encode userCount: {}", e),
            }
        }
    }
}

/// All live rooms, keyed by room id.
///
/// Each room's membership changes and fan-out happen under that room's map
/// entry, so frames reach members in the order they arrived.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room, creating the room if needed.
    ///
    /// Returns the new member count.
    pub fn join(&self, room_id: &str, id: ConnectionId, tx: UnboundedSender<Frame>) -> usize {
        let mut room = self.rooms.entry(room_id.to_string()).or_default();
        room.members.push(Member { id, tx });
        room.broadcast_count(Some(id));
        room.members.len()
    }

    /// Send `frame` to every other member of the room.
    ///
    /// Returns how many members it was queued for.
    pub fn forward(&self, room_id: &str, from: ConnectionId, frame: Frame) -> usize {
        let Some(room) = self.rooms.get(room_id) else {
            return 0;
        };
        room.members
            .iter()
            .filter(|m| m.id != from)
            .filter(|m| m.tx.send(frame.clone()).is_ok())
            .count()
    }

    /// Remove a connection. Deletes the room when it was the last member,
    /// otherwise tells the rest the new count.
    ///
    /// Returns the remaining member count.
    pub fn leave(&self, room_id: &str, id: ConnectionId) -> usize {
        let Some(mut room) = self.rooms.get_mut(room_id) else {
            return 0;
        };
        room.members.retain(|m| m.id != id);
        let remaining = room.members.len();
        if remaining == 0 {
            drop(room);
            self.rooms.remove_if(room_id, |_, r| r.members.is_empty());
            debug!("Room {} closed", room_id);
        } else {
            room.broadcast_count(None);
        }
        remaining
    }

    pub fn member_count(&self, room_id: &str) -> usize {
        self.rooms.get(room_id).map_or(0, |r| r.members.len())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
