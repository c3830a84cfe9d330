//! InkShare WebSocket Relay Server
//!
//! Routes scene snapshots between the members of a room. Payloads are never
//! inspected; the relay only adds membership counts.
//!
//! ## Protocol
//!
//! Clients connect to `/ws?roomId=<room>`; a missing room id is refused with
//! close code 1008. Text frames are forwarded verbatim to every other member
//! of the room. On every join and leave, members receive:
//! ```json
//! { "type": "userCount", "count": 2, "ImNew": false }
//! ```

pub mod config;
pub mod protocol;
pub mod relay;
pub mod rooms;

use axum::{Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::RelayConfig;
pub use rooms::RoomRegistry;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Build the HTTP router around a room registry.
pub fn router(registry: Arc<RoomRegistry>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ws", get(relay::ws_handler))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, RelayError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| RelayError::Bind { addr, source })
}

/// Serve the relay on `listener` until the server fails.
pub async fn serve(listener: TcpListener, registry: Arc<RoomRegistry>) -> Result<(), RelayError> {
    axum::serve(listener, router(registry)).await?;
    Ok(())
}

async fn index() -> &'static str {
    "InkShare Relay Server - Connect via WebSocket at /ws?roomId=<room>"
}

async fn health() -> &'static str {
    "ok"
}
