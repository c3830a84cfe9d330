//! Room sync: broadcasting local scene changes and applying peers' scenes.
//!
//! Every local change sends the whole scene; the last snapshot delivered
//! wins on each peer. Remote changes are tagged [`Origin::Remote`] and are
//! never sent back out.

use crate::canvas::{Canvas, Origin, SceneChange};
use crate::sync::{
    ConnectionState, ControlFrame, InboundFrame, SyncError, SyncEvent, Transport, TransportEvent,
};
use url::Url;

/// Close code the relay uses to refuse a connection without a room id.
pub const POLICY_VIOLATION: u16 = 1008;

/// Where to connect and which room to join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub server_url: String,
    pub room_id: String,
}

impl SyncConfig {
    pub const DEFAULT_SERVER_URL: &'static str = "ws://localhost:8080/ws";

    pub fn new(server_url: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            room_id: room_id.into(),
        }
    }

    /// Default server, given room.
    pub fn for_room(room_id: impl Into<String>) -> Self {
        Self::new(Self::DEFAULT_SERVER_URL, room_id)
    }

    /// Socket URL with the room id in the `roomId` query parameter.
    pub fn connect_url(&self) -> Result<Url, SyncError> {
        if self.room_id.trim().is_empty() {
            return Err(SyncError::MissingRoom);
        }
        let mut url =
            Url::parse(&self.server_url).map_err(|e| SyncError::InvalidUrl(e.to_string()))?;
        if url.scheme() != "ws" && url.scheme() != "wss" {
            return Err(SyncError::InvalidUrl(format!(
                "Invalid WebSocket URL scheme: {}",
                url.scheme()
            )));
        }
        url.query_pairs_mut().append_pair("roomId", &self.room_id);
        Ok(url)
    }
}

/// Translates between scene changes and socket frames.
///
/// Transport-agnostic: outgoing frames are queued for the owner to send, and
/// transport events are fed in by the owner.
#[derive(Debug, Default)]
pub struct SyncClient {
    state: ConnectionState,
    member_count: usize,
    outgoing: Vec<String>,
    events: Vec<SyncEvent>,
}

impl SyncClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Members in the room as last reported by the relay.
    pub fn member_count(&self) -> usize {
        self.member_count
    }

    /// Queue a local change for broadcast.
    ///
    /// Remote changes are skipped, as is everything while disconnected.
    pub fn observe(&mut self, change: &SceneChange) -> Result<(), SyncError> {
        if change.origin == Origin::Remote {
            return Ok(());
        }
        if !self.is_connected() {
            log::debug!("Offline, keeping change local");
            return Ok(());
        }
        self.outgoing.push(change.store.to_json()?);
        Ok(())
    }

    /// Handle one inbound text frame. Malformed frames are logged and dropped.
    pub fn handle_text(&mut self, text: &str) {
        match InboundFrame::parse(text) {
            Ok(InboundFrame::Snapshot(store)) => {
                log::debug!("Received scene with {} actions", store.len());
                self.events.push(SyncEvent::SnapshotReceived(store));
            }
            Ok(InboundFrame::Control(ControlFrame::UserCount { count, im_new })) => {
                log::info!("Room now has {} members", count);
                self.member_count = count;
                self.events
                    .push(SyncEvent::MembershipChanged { count, im_new });
            }
            Err(e) => {
                log::warn!("Dropping malformed frame: {}", e);
            }
        }
    }

    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => {
                self.state = ConnectionState::Connected;
                self.events.push(SyncEvent::Connected);
            }
            TransportEvent::Text(text) => self.handle_text(&text),
            TransportEvent::Disconnected { close_code } => {
                if close_code == Some(POLICY_VIOLATION) {
                    log::warn!("Relay refused the connection: room id missing");
                }
                self.go_offline(ConnectionState::Disconnected);
                self.events.push(SyncEvent::Disconnected);
            }
            TransportEvent::Error { message } => {
                log::error!("Sync transport error: {}", message);
                self.go_offline(ConnectionState::Error);
                self.events.push(SyncEvent::Error { message });
            }
        }
    }

    fn go_offline(&mut self, state: ConnectionState) {
        self.state = state;
        self.member_count = 0;
        self.outgoing.clear();
    }

    /// Take frames waiting to be sent.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }

    pub fn has_outgoing(&self) -> bool {
        !self.outgoing.is_empty()
    }

    /// Drain events published since the last call.
    pub fn poll_events(&mut self) -> Vec<SyncEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forget connection state ahead of a new connection.
    pub fn reset(&mut self) {
        self.go_offline(ConnectionState::Connecting);
    }
}

/// A canvas wired to a room over a transport.
pub struct Session<T: Transport> {
    canvas: Canvas,
    client: SyncClient,
    transport: T,
    config: SyncConfig,
}

impl<T: Transport> Session<T> {
    pub fn new(canvas: Canvas, transport: T, config: SyncConfig) -> Self {
        Self {
            canvas,
            client: SyncClient::new(),
            transport,
            config,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn client(&self) -> &SyncClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Open the room socket.
    pub fn connect(&mut self) -> Result<(), SyncError> {
        let url = self.config.connect_url()?;
        log::info!("Joining room {}", self.config.room_id);
        self.client.reset();
        self.transport.connect(&url)
    }

    /// Drop the current socket and open a fresh one.
    ///
    /// Broadcasting resumes with the next local change.
    pub fn reconnect(&mut self) -> Result<(), SyncError> {
        self.transport.disconnect();
        self.connect()
    }

    pub fn disconnect(&mut self) {
        self.transport.disconnect();
        self.client
            .handle_transport_event(TransportEvent::Disconnected { close_code: None });
    }

    /// Move pending work between canvas, client and socket.
    ///
    /// Local changes are sent before inbound frames are applied, so a remote
    /// snapshot applied here is never mistaken for a local edit.
    pub fn pump(&mut self) -> Result<Vec<SyncEvent>, SyncError> {
        for change in self.canvas.take_changes() {
            self.client.observe(&change)?;
        }
        for frame in self.client.take_outgoing() {
            if let Err(e) = self.transport.send(&frame) {
                log::warn!("Failed to send scene: {}", e);
            }
        }

        for event in self.transport.poll_events() {
            self.client.handle_transport_event(event);
        }
        let events = self.client.poll_events();
        for event in &events {
            if let SyncEvent::SnapshotReceived(store) = event {
                self.canvas.apply_remote(store.clone());
            }
        }
        // Remote changes are never broadcast; drop them now.
        for change in self.canvas.take_changes() {
            self.client.observe(&change)?;
        }
        Ok(events)
    }
}
