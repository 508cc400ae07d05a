//! Error types for the engine binary.

/// Top-level error for the engine binary.
///
/// Each variant wraps a subsystem error so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: universe_core::ConfigError,
    },

    /// Seeding the founding city failed.
    #[error("city error: {source}")]
    City {
        /// The underlying store error.
        #[from]
        source: universe_city::CityError,
    },

    /// The city API failed to start.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying startup error.
        #[from]
        source: universe_observer::StartupError,
    },
}
