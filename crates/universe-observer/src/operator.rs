//! Operator endpoints for the simulation loop.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/simulation/status` | Running flag and tick count |
//! | `POST` | `/api/simulation/start` | Start firing ticks |
//! | `POST` | `/api/simulation/stop` | Stop firing ticks |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::info;
use universe_core::SimulationControl;

use crate::error::ApiError;
use crate::state::AppState;

/// Generic operator response.
#[derive(Debug, serde::Serialize)]
struct OperatorResponse {
    /// Whether the state changed.
    ok: bool,
    /// Human-readable message.
    message: String,
}

fn control(state: &AppState) -> Result<&Arc<SimulationControl>, ApiError> {
    state
        .control
        .as_ref()
        .ok_or_else(|| ApiError::Internal(String::from("simulation control not available")))
}

/// Current loop status.
pub async fn status(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(control(&state)?.status()))
}

/// Start the loop.
pub async fn start(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let changed = control(&state)?.start();
    if changed {
        info!("Simulation started by operator");
    }
    Ok(Json(OperatorResponse {
        ok: changed,
        message: String::from(if changed {
            "Simulation started"
        } else {
            "Simulation already running"
        }),
    }))
}

/// Stop the loop. Records stay in memory.
pub async fn stop(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let changed = control(&state)?.stop();
    if changed {
        info!("Simulation stopped by operator");
    }
    Ok(Json(OperatorResponse {
        ok: changed,
        message: String::from(if changed {
            "Simulation stopped"
        } else {
            "Simulation already stopped"
        }),
    }))
}
