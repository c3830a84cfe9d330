//! Wire format and WebSocket transport for room sync.
//!
//! Two kinds of text frame travel on a room socket: control frames from the
//! relay (JSON objects with a `"type"` tag) and scene snapshots (bare JSON
//! arrays of actions). Receivers tell them apart by array-ness alone.

use crate::actions::ActionId;
use crate::store::ActionStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Control frames sent by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlFrame {
    /// Room membership changed.
    #[serde(rename = "userCount")]
    UserCount {
        count: usize,
        /// True only on the frame sent to the connection that just joined.
        #[serde(rename = "ImNew")]
        im_new: bool,
    },
}

/// A parsed inbound text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    Snapshot(ActionStore),
    Control(ControlFrame),
}

impl InboundFrame {
    /// Parse a text frame. Snapshots that repeat an action id are rejected.
    pub fn parse(text: &str) -> Result<Self, SyncError> {
        let value: Value = serde_json::from_str(text)?;
        if value.is_array() {
            let store: ActionStore = serde_json::from_value(value)?;
            if let Some(id) = store.first_duplicate_id() {
                return Err(SyncError::DuplicateAction(id.clone()));
            }
            Ok(InboundFrame::Snapshot(store))
        } else {
            Ok(InboundFrame::Control(serde_json::from_value(value)?))
        }
    }
}

/// Sync errors.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Malformed frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate action id in snapshot: {0}")]
    DuplicateAction(ActionId),
    #[error("Room id is required")]
    MissingRoom,
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Already connected")]
    AlreadyConnected,
    #[error("Not connected")]
    NotConnected,
    #[error("Send failed: {0}")]
    Send(String),
}

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Low-level events reported by a transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Connected,
    Text(String),
    /// The socket closed; `close_code` is set when the peer sent a close frame.
    Disconnected { close_code: Option<u16> },
    Error { message: String },
}

/// Events published by the sync client.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Connected,
    Disconnected,
    /// A peer's scene arrived and should replace the local one.
    SnapshotReceived(ActionStore),
    MembershipChanged { count: usize, im_new: bool },
    Error { message: String },
}

/// A text-frame socket scoped to one room.
pub trait Transport {
    fn connect(&mut self, url: &Url) -> Result<(), SyncError>;

    fn send(&mut self, text: &str) -> Result<(), SyncError>;

    fn disconnect(&mut self);

    /// Drain pending events without blocking.
    fn poll_events(&mut self) -> Vec<TransportEvent>;

    fn state(&self) -> ConnectionState;

    fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }
}

/// Apply a transport event to a connection state.
pub(crate) fn next_state(state: ConnectionState, event: &TransportEvent) -> ConnectionState {
    match event {
        TransportEvent::Connected => ConnectionState::Connected,
        TransportEvent::Disconnected { .. } => ConnectionState::Disconnected,
        TransportEvent::Error { .. } => ConnectionState::Error,
        TransportEvent::Text(_) => state,
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_client {
    use super::*;
    use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
    use std::thread::{self, JoinHandle};
    use std::time::Duration;
    use tungstenite::{Message, connect};

    /// Commands sent to the WebSocket thread.
    enum WsCommand {
        Send(String),
        Close,
    }

    /// WebSocket client for native platforms.
    ///
    /// Uses a background thread for non-blocking operation.
    pub struct NativeWebSocket {
        state: ConnectionState,
        /// Channel to send commands to the WebSocket thread.
        cmd_tx: Option<Sender<WsCommand>>,
        /// Channel to receive events from the WebSocket thread.
        event_rx: Option<Receiver<TransportEvent>>,
        _thread: Option<JoinHandle<()>>,
    }

    impl NativeWebSocket {
        pub fn new() -> Self {
            Self {
                state: ConnectionState::Disconnected,
                cmd_tx: None,
                event_rx: None,
                _thread: None,
            }
        }
    }

    fn run_socket(url: String, cmd_rx: Receiver<WsCommand>, event_tx: Sender<TransportEvent>) {
        log::info!("WebSocket thread: connecting to {}", url);

        let (mut socket, response) = match connect(url.as_str()) {
            Ok(pair) => pair,
            Err(e) => {
                log::error!("WebSocket connection failed: {}", e);
                let _ = event_tx.send(TransportEvent::Error {
                    message: format!("Connection failed: {}", e),
                });
                return;
            }
        };
        log::info!("WebSocket connected, status: {}", response.status());
        let _ = event_tx.send(TransportEvent::Connected);

        // Short read timeout so outgoing commands are not starved.
        match socket.get_mut() {
            tungstenite::stream::MaybeTlsStream::Plain(tcp) => {
                let _ = tcp.set_read_timeout(Some(Duration::from_millis(50)));
                let _ = tcp.set_write_timeout(Some(Duration::from_secs(5)));
            }
            #[allow(unreachable_patterns)]
            _ => {
                log::debug!("TLS or other stream - using default timeout handling");
            }
        }

        let mut close_code = None;
        loop {
            match cmd_rx.try_recv() {
                Ok(WsCommand::Send(msg)) => {
                    log::debug!("WebSocket sending {} bytes", msg.len());
                    if let Err(e) = socket.send(Message::Text(msg)) {
                        log::error!("WebSocket send error: {}", e);
                        break;
                    }
                }
                Ok(WsCommand::Close) => {
                    log::info!("WebSocket close requested");
                    let _ = socket.close(None);
                    break;
                }
                Err(TryRecvError::Disconnected) => {
                    log::info!("WebSocket command channel disconnected");
                    break;
                }
                Err(TryRecvError::Empty) => {}
            }

            match socket.read() {
                Ok(Message::Text(txt)) => {
                    if event_tx.send(TransportEvent::Text(txt)).is_err() {
                        break;
                    }
                }
                Ok(Message::Ping(data)) => {
                    let _ = socket.send(Message::Pong(data));
                }
                Ok(Message::Close(frame)) => {
                    close_code = frame.map(|f| u16::from(f.code));
                    log::info!("WebSocket received close frame: {:?}", close_code);
                    break;
                }
                Ok(_) => {}
                Err(tungstenite::Error::Io(ref e))
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    continue;
                }
                Err(e) => {
                    log::error!("WebSocket read error: {}", e);
                    break;
                }
            }
        }

        log::info!("WebSocket thread exiting");
        let _ = event_tx.send(TransportEvent::Disconnected { close_code });
    }

    impl Transport for NativeWebSocket {
        fn connect(&mut self, url: &Url) -> Result<(), SyncError> {
            if self.cmd_tx.is_some() {
                return Err(SyncError::AlreadyConnected);
            }
            if url.scheme() != "ws" && url.scheme() != "wss" {
                return Err(SyncError::InvalidUrl(format!(
                    "Invalid WebSocket URL scheme: {}",
                    url.scheme()
                )));
            }

            self.state = ConnectionState::Connecting;
            let (cmd_tx, cmd_rx) = channel::<WsCommand>();
            let (event_tx, event_rx) = channel::<TransportEvent>();
            let url = url.to_string();
            let handle = thread::spawn(move || run_socket(url, cmd_rx, event_tx));

            self.cmd_tx = Some(cmd_tx);
            self.event_rx = Some(event_rx);
            self._thread = Some(handle);
            Ok(())
        }

        fn send(&mut self, text: &str) -> Result<(), SyncError> {
            match self.cmd_tx {
                Some(ref tx) => tx
                    .send(WsCommand::Send(text.to_string()))
                    .map_err(|e| SyncError::Send(e.to_string())),
                None => Err(SyncError::NotConnected),
            }
        }

        fn disconnect(&mut self) {
            if let Some(tx) = self.cmd_tx.take() {
                let _ = tx.send(WsCommand::Close);
            }
            self.event_rx = None;
            self._thread = None;
            self.state = ConnectionState::Disconnected;
        }

        fn poll_events(&mut self) -> Vec<TransportEvent> {
            let mut events = Vec::new();
            let mut finished = false;
            if let Some(ref rx) = self.event_rx {
                while let Ok(event) = rx.try_recv() {
                    self.state = next_state(self.state, &event);
                    finished |= matches!(
                        event,
                        TransportEvent::Disconnected { .. } | TransportEvent::Error { .. }
                    );
                    events.push(event);
                }
            }
            if finished {
                // The socket thread has exited; allow a fresh connect.
                self.cmd_tx = None;
                self.event_rx = None;
                self._thread = None;
            }
            events
        }

        fn state(&self) -> ConnectionState {
            self.state
        }
    }

    impl Default for NativeWebSocket {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Drop for NativeWebSocket {
        fn drop(&mut self) {
            self.disconnect();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native_client::NativeWebSocket;

/// Platform-specific WebSocket client type.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformWebSocket = NativeWebSocket;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_frame_wire_format() {
        let frame = ControlFrame::UserCount {
            count: 3,
            im_new: true,
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json, serde_json::json!({"type": "userCount", "count": 3, "ImNew": true}));
    }

    #[test]
    fn test_parse_control() {
        let frame = InboundFrame::parse(r#"{"type":"userCount","count":2,"ImNew":false}"#).unwrap();
        assert_eq!(
            frame,
            InboundFrame::Control(ControlFrame::UserCount {
                count: 2,
                im_new: false
            })
        );
    }

    #[test]
    fn test_parse_snapshot() {
        let json = r#"[{"tool":"text","id":"a","x":1,"y":2,"text":"hi","fontSize":20,"fill":"black"}]"#;
        match InboundFrame::parse(json).unwrap() {
            InboundFrame::Snapshot(store) => assert_eq!(store.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            InboundFrame::parse("[]").unwrap(),
            InboundFrame::Snapshot(ActionStore::new())
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(InboundFrame::parse("not json").is_err());
        assert!(InboundFrame::parse(r#"{"type":"somethingElse"}"#).is_err());
        assert!(InboundFrame::parse(r#"[{"tool":"hexagon","id":"a"}]"#).is_err());
        assert!(InboundFrame::parse("42").is_err());
    }

    #[test]
    fn test_parse_rejects_repeated_ids() {
        let json = r#"[{"tool":"empty","id":"dup"},{"tool":"empty","id":"dup"}]"#;
        match InboundFrame::parse(json) {
            Err(SyncError::DuplicateAction(id)) => assert_eq!(id.as_str(), "dup"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_state_transitions() {
        let s = next_state(ConnectionState::Connecting, &TransportEvent::Connected);
        assert_eq!(s, ConnectionState::Connected);
        let s = next_state(s, &TransportEvent::Text("[]".into()));
        assert_eq!(s, ConnectionState::Connected);
        let s = next_state(s, &TransportEvent::Disconnected { close_code: Some(1008) });
        assert_eq!(s, ConnectionState::Disconnected);
    }

    #[test]
    fn test_native_rejects_non_ws_scheme() {
        let mut ws = NativeWebSocket::new();
        let url = Url::parse("http://localhost:8080").unwrap();
        assert!(matches!(ws.connect(&url), Err(SyncError::InvalidUrl(_))));
        assert_eq!(ws.state(), ConnectionState::Disconnected);
    }
}
