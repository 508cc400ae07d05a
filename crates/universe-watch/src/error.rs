//! Error types for the subscriber.

/// Errors that end a watch session.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Every reconnect attempt failed.
    #[error("gave up on {url} after {attempts} failed attempts: {last}")]
    Exhausted {
        /// The push channel address.
        url: String,
        /// Attempts made since the last successful connect.
        attempts: u32,
        /// The last connection error.
        last: String,
    },

    /// A message could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
