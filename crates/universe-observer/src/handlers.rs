//! REST API endpoint handlers for agents, buildings, activities, metrics,
//! and Synthia.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/agents` | List all agents |
//! | `GET` | `/api/agents/{id}` | Single agent |
//! | `POST` | `/api/agents` | Create an agent |
//! | `PATCH` | `/api/agents/{id}` | Partial update |
//! | `GET` | `/api/buildings` | List all buildings |
//! | `POST` | `/api/buildings` | Create a building |
//! | `GET` | `/api/activities` | Recent activities, newest first |
//! | `GET` | `/api/city/metrics` | Latest metrics |
//! | `GET` | `/api/synthia` | Synthia's state |
//! | `POST` | `/api/synthia/command` | Command Synthia |
//! | `POST` | `/api/city/spawn-agent` | Spawn a random agent |
//! | `POST` | `/api/city/create-building` | Place a starter building |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use tracing::info;
use universe_city::catalog::{generated_name, starter_template, stock};
use universe_city::{NewBuilding, random_agent};
use universe_types::{AgentId, CityEvent, ModuleConfig, Size};

use crate::error::ApiError;
use crate::requests::{
    ActivitiesQuery, CreateAgentRequest, CreateBuildingRequest, PlaceBuildingRequest,
    SynthiaCommandRequest, UpdateAgentRequest, ValidatedJson,
};
use crate::state::AppState;

/// Activities returned when no limit is given.
const DEFAULT_ACTIVITY_LIMIT: usize = 20;

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// List all agents in creation order.
pub async fn list_agents(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let city = state.store.read().await;
    let agents: Vec<_> = city.agents().into_iter().cloned().collect();
    Json(agents)
}

/// Return a single agent.
pub async fn get_agent(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_agent_id(&id_str)?;
    let city = state.store.read().await;
    let agent = city
        .agent(id)
        .ok_or_else(|| ApiError::NotFound(format!("agent {id}")))?;
    Ok(Json(agent.clone()))
}

/// Create an agent and announce it.
pub async fn create_agent(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateAgentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let agent = {
        let mut city = state.store.write().await;
        city.insert_agent(req.into_new_agent(), Utc::now())?
    };
    info!(agent_id = %agent.id, name = %agent.name, "agent created via API");
    state.broadcast(CityEvent::AgentCreated(Box::new(agent.clone())));
    Ok((StatusCode::CREATED, Json(agent)))
}

/// Apply a partial update to an agent and announce it.
pub async fn update_agent(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateAgentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_agent_id(&id_str)?;
    let agent = {
        let mut city = state.store.write().await;
        city.update_agent(id, req.into())?
    };
    state.broadcast(CityEvent::AgentUpdated(Box::new(agent.clone())));
    Ok(Json(agent))
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// List all buildings in creation order.
pub async fn list_buildings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let city = state.store.read().await;
    let buildings: Vec<_> = city.buildings().into_iter().cloned().collect();
    Json(buildings)
}

/// Create a building. The owner, when given, must exist.
pub async fn create_building(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateBuildingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let building = {
        let mut city = state.store.write().await;
        city.insert_building(req.into(), Utc::now())?
    };
    state.broadcast(CityEvent::BuildingCreated(Box::new(building.clone())));
    Ok((StatusCode::CREATED, Json(building)))
}

// ---------------------------------------------------------------------------
// Activities, metrics, Synthia
// ---------------------------------------------------------------------------

/// Recent activities, newest first.
///
/// # Query Parameters
///
/// - `limit`: maximum number of activities (default 20).
pub async fn list_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesQuery>,
) -> impl IntoResponse {
    let limit = params
        .limit
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    let city = state.store.read().await;
    let activities: Vec<_> = city
        .recent_activities(limit)
        .into_iter()
        .cloned()
        .collect();
    Json(activities)
}

/// Latest city metrics.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let city = state.store.read().await;
    Json(city.metrics().clone())
}

/// Synthia's state.
pub async fn get_synthia(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let city = state.store.read().await;
    Json(city.synthia().clone())
}

/// Record a command for Synthia and announce it.
pub async fn command_synthia(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<SynthiaCommandRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let synthia = {
        let mut city = state.store.write().await;
        city.command_synthia(req.command_type, req.instruction, Utc::now())
    };
    info!(
        command_type = ?synthia.command_type,
        instruction = ?synthia.current_command,
        "Synthia received command"
    );
    state.broadcast(CityEvent::SynthiaCommand(Box::new(synthia.clone())));
    Ok(Json(serde_json::json!({
        "success": true,
        "state": synthia,
    })))
}

// ---------------------------------------------------------------------------
// City actions
// ---------------------------------------------------------------------------

/// Spawn a random agent and announce it.
pub async fn spawn_agent(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let agent = {
        let mut city = state.store.write().await;
        let now = Utc::now();
        let new = random_agent(&mut rand::rng(), city.grid(), now);
        city.insert_agent(new, now)?
    };
    info!(
        agent_id = %agent.id,
        name = %agent.name,
        personality = %agent.personality_type,
        "agent spawned"
    );
    state.broadcast(CityEvent::AgentSpawned(Box::new(agent.clone())));
    Ok((StatusCode::CREATED, Json(agent)))
}

/// Place a farm, trading post, research lab, or performance hall from its
/// starter template.
pub async fn place_building(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<PlaceBuildingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let template = starter_template(req.building_type).ok_or_else(|| {
        ApiError::BadRequest(format!("invalid building type: {}", req.building_type))
    })?;
    let building = {
        let mut city = state.store.write().await;
        let new = NewBuilding {
            name: generated_name(template.name, &mut rand::rng()),
            building_type: req.building_type,
            position: req.position,
            size: Size::square(2),
            owner_id: req.owner_id,
            resources: stock(template.resources),
            module_config: ModuleConfig::Basic,
        };
        city.insert_building(new, Utc::now())?
    };
    info!(building_id = %building.id, name = %building.name, "building placed");
    state.broadcast(CityEvent::BuildingCreated(Box::new(building.clone())));
    Ok((StatusCode::CREATED, Json(building)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an agent id from a path segment.
pub(crate) fn parse_agent_id(s: &str) -> Result<AgentId, ApiError> {
    s.parse::<AgentId>()
        .map_err(|e| ApiError::NotFound(format!("agent {s}: {e}")))
}
