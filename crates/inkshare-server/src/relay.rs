//! WebSocket endpoint: one task pair per connection.

use crate::protocol::ConnectParams;
use crate::rooms::{ConnectionId, Frame, RoomRegistry};
use axum::{
    extract::{
        Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// WebSocket upgrade handler for `/ws?roomId=...`.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(registry): State<Arc<RoomRegistry>>,
) -> Response {
    match params.room() {
        Some(room) => {
            let room = room.to_string();
            ws.on_upgrade(move |socket| handle_socket(socket, room, registry))
        }
        None => ws.on_upgrade(refuse),
    }
}

/// Close a connection that did not name a room.
async fn refuse(mut socket: WebSocket) {
    warn!("Refusing connection without roomId");
    let frame = CloseFrame {
        code: close_code::POLICY,
        reason: "roomId is required".into(),
    };
    let _ = socket.send(Message::Close(Some(frame))).await;
}

/// Relay frames between this connection and the rest of its room.
async fn handle_socket(socket: WebSocket, room_id: String, registry: Arc<RoomRegistry>) {
    let id = ConnectionId::new();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Frame>();

    let count = registry.join(&room_id, id, tx);
    info!("Connection {} joined room {} ({} members)", id, room_id, count);

    let mut writer = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let msg = match frame {
                Frame::Text(text) => Message::Text(text.into()),
                Frame::Binary(data) => Message::Binary(data),
            };
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        registry.forward(&room_id, id, Frame::Text(text.as_str().to_owned()));
                    }
                    Some(Ok(Message::Binary(data))) => {
                        registry.forward(&room_id, id, Frame::Binary(data));
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // ping/pong
                    Some(Err(e)) => {
                        warn!("WebSocket error for {}: {}", id, e);
                        break;
                    }
                }
            }
            // The writer only stops once the socket can no longer be written.
            _ = &mut writer => break,
        }
    }

    let remaining = registry.leave(&room_id, id);
    writer.abort();
    info!("Connection {} left room {} ({} members)", id, room_id, remaining);
}
