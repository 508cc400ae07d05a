//! `WebSocket` push channel.
//!
//! Clients connect to `GET /ws`, receive a `connection` greeting, and then
//! every [`CityEvent`] the server publishes. The channel is publish-only:
//! text frames from the client are ignored.
//!
//! If a client falls behind, lagged messages are skipped and the client
//! resumes from the most recent one. A client whose send fails is dropped.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use universe_types::CityEvent;

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` subscription.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_city(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Serialize and send one message. `false` when the client is gone.
async fn send_event(socket: &mut WebSocket, event: &CityEvent) -> bool {
    let json = match serde_json::to_string(event) {
        Ok(j) => j,
        Err(e) => {
            warn!(kind = event.kind(), "Failed to serialize city event: {e}");
            return true;
        }
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}

/// Greet the client, then forward every broadcast until it disconnects.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    let mut rx = state.subscribe();

    if !send_event(&mut socket, &CityEvent::greeting()).await {
        debug!("WebSocket client disconnected before greeting");
        return;
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if !send_event(&mut socket, &event).await {
                            debug!("WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {}
                }
            }
        }
    }
}
