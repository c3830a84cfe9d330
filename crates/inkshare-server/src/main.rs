use inkshare_server::{RelayConfig, RelayError, RoomRegistry, bind, serve};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkshare_server=info,tower_http=info".into()),
        )
        .init();

    let config = RelayConfig::from_env();
    let listener = bind(config.addr).await?;
    info!("InkShare relay server listening on {}", config.addr);
    info!("WebSocket endpoint: ws://{}/ws?roomId=<room>", config.addr);

    serve(listener, Arc::new(RoomRegistry::new())).await
}
