//! Error types for the city API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that
//! converts into an Axum HTTP response with a `{error, status}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;
use universe_bonding::BondingError;
use universe_city::CityError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request was malformed or failed validation.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CityError> for ApiError {
    fn from(e: CityError) -> Self {
        match e {
            CityError::AgentNotFound(_) | CityError::BuildingNotFound(_) => {
                Self::NotFound(e.to_string())
            }
            CityError::OwnerNotFound(_)
            | CityError::OwnershipQuota { .. }
            | CityError::OffGrid(_)
            | CityError::Invalid { .. } => Self::BadRequest(e.to_string()),
        }
    }
}

impl From<BondingError> for ApiError {
    fn from(e: BondingError) -> Self {
        match e {
            BondingError::ShellNotFound(_) => Self::NotFound(e.to_string()),
            BondingError::ShellFull { .. } | BondingError::OrbitalFull { .. } => {
                Self::BadRequest(format!("cannot bond friend: {e}"))
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Serialization(e) => {
                error!(error = %e, "response serialization failed");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
            Self::Internal(msg) => {
                error!(error = %msg, "internal API error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
