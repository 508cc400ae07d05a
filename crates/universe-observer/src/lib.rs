//! City API server for the YOU-N-I-VERSE agent city.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) pushing `{type, data}` messages via
//!   [`tokio::sync::broadcast`]
//! - **REST endpoints** for agents, buildings, activities, metrics,
//!   Synthia, and consciousness shells
//! - **Operator endpoints** to start and stop the simulation loop
//!
//! Handlers read and write the shared [`CityStore`] behind a
//! `tokio::sync::RwLock`; the tick holds the write lock only while it runs.
//!
//! [`CityStore`]: universe_city::CityStore

pub mod consciousness;
pub mod error;
pub mod handlers;
pub mod operator;
pub mod requests;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use startup::{StartupError, spawn_server};
pub use state::{AppState, city_update};
