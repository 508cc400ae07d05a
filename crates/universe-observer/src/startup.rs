//! Server startup helper for embedding in the engine binary.
//!
//! [`spawn_server`] launches the HTTP + `WebSocket` server on a background
//! Tokio task so the API runs alongside the simulation loop.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use universe_core::config::ServerSettings;

use crate::server::{ServerError, parse_addr, start_server};
use crate::state::AppState;

/// Errors that can occur when spawning the server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the server on a background task.
///
/// The address is checked before the task is spawned so obvious
/// misconfiguration fails fast. Bind failures inside the task are logged.
pub fn spawn_server<F>(
    settings: ServerSettings,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<JoinHandle<()>, StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = parse_addr(&settings)?;

    let handle = tokio::spawn(async move {
        if let Err(e) = start_server(&settings, state, shutdown).await {
            tracing::error!(error = %e, "City API exited with error");
        }
    });

    tracing::info!(%addr, "City API spawned on background task");

    Ok(handle)
}
