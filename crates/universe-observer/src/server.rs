//! HTTP server lifecycle.
//!
//! [`start_server`] binds the configured address and serves the city API
//! until the shutdown future resolves.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use universe_core::config::ServerSettings;

use crate::router::build_router;
use crate::state::AppState;

/// Start the HTTP server.
///
/// Returns `Ok(())` once `shutdown` resolves and in-flight requests
/// have drained.
pub async fn start_server<F>(
    settings: &ServerSettings,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = parse_addr(settings)?;
    let router = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "City API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("City API stopped");
    Ok(())
}

/// Parse `host:port` into a socket address.
pub fn parse_addr(settings: &ServerSettings) -> Result<SocketAddr, ServerError> {
    format!("{}:{}", settings.host, settings.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))
}

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_address() {
        let addr = parse_addr(&ServerSettings::default()).unwrap();
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn rejects_bad_host() {
        let settings = ServerSettings {
            host: String::from("not a host"),
            port: 5000,
        };
        assert!(matches!(parse_addr(&settings), Err(ServerError::Bind(_))));
    }
}
