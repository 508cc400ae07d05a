//! Push-channel subscriber loop.
//!
//! Connects to the city's `/ws` endpoint, decodes every `{type, data}`
//! message into a [`CityEvent`], and hands it to the caller. A dropped
//! connection is retried under a [`ReconnectPolicy`]; once the policy is
//! exhausted the session ends with [`WatchError::Exhausted`].

use futures::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};
use universe_types::CityEvent;

use crate::error::WatchError;
use crate::reconnect::ReconnectPolicy;

/// Decode one text frame.
pub fn decode(text: &str) -> Result<CityEvent, WatchError> {
    Ok(serde_json::from_str(text)?)
}

/// Subscribe to `url` until the reconnect policy gives up.
///
/// Returns the error that ended the session.
pub async fn watch<F>(url: &str, policy: &mut ReconnectPolicy, mut on_event: F) -> WatchError
where
    F: FnMut(CityEvent),
{
    loop {
        let last = match connect_async(url).await {
            Ok((mut stream, _)) => {
                policy.on_connect();
                info!(url, "Connected to push channel");

                while let Some(frame) = stream.next().await {
                    match frame {
                        Ok(Message::Text(text)) => match decode(&text) {
                            Ok(event) => on_event(event),
                            Err(e) => warn!(error = %e, "Skipping undecodable message"),
                        },
                        Ok(Message::Close(_)) => {
                            debug!("Server closed the push channel");
                            break;
                        }
                        Ok(_) => {}
                        Err(e) => {
                            warn!(error = %e, "Push channel read failed");
                            break;
                        }
                    }
                }
                String::from("connection lost")
            }
            Err(e) => e.to_string(),
        };

        let Some(delay) = policy.on_failure() else {
            return WatchError::Exhausted {
                url: url.to_owned(),
                attempts: policy.attempts(),
                last,
            };
        };
        warn!(
            url,
            attempt = policy.attempts(),
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %last,
            "Push channel unavailable, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}
