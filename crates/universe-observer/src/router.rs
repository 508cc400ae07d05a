//! Axum router construction for the city API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS enabled for the dashboard.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{consciousness, handlers, operator, ws};

/// Build the complete Axum router.
///
/// CORS allows any origin; the dashboard is served separately.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_city))
        // Agents
        .route(
            "/api/agents",
            get(handlers::list_agents).post(handlers::create_agent),
        )
        .route(
            "/api/agents/{id}",
            get(handlers::get_agent).patch(handlers::update_agent),
        )
        // Buildings
        .route(
            "/api/buildings",
            get(handlers::list_buildings).post(handlers::create_building),
        )
        // Activities, metrics, Synthia
        .route("/api/activities", get(handlers::list_activities))
        .route("/api/city/metrics", get(handlers::get_metrics))
        .route(
            "/api/synthia",
            get(handlers::get_synthia).post(handlers::command_synthia),
        )
        .route("/api/synthia/command", post(handlers::command_synthia))
        // City actions
        .route("/api/city/spawn-agent", post(handlers::spawn_agent))
        .route("/api/city/create-building", post(handlers::place_building))
        // Consciousness shells
        .route("/api/consciousness/shells", get(consciousness::list_shells))
        .route(
            "/api/consciousness/shell/{agent_id}",
            get(consciousness::get_shell),
        )
        .route(
            "/api/consciousness/shell/{agent_id}/friends",
            get(consciousness::shell_friends),
        )
        .route(
            "/api/consciousness/shell/{agent_id}/activities",
            get(consciousness::shell_activities),
        )
        .route(
            "/api/consciousness/bond-friend",
            post(consciousness::bond_friend),
        )
        .route(
            "/api/consciousness/activity",
            post(consciousness::perform_activity),
        )
        // Operator
        .route("/api/simulation/status", get(operator::status))
        .route("/api/simulation/start", post(operator::start))
        .route("/api/simulation/stop", post(operator::stop))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
