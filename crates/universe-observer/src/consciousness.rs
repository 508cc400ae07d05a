//! Consciousness shell endpoints.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/consciousness/shells` | All shells |
//! | `GET` | `/api/consciousness/shell/{agentId}` | One agent's shell |
//! | `GET` | `/api/consciousness/shell/{agentId}/friends` | Bonded friends |
//! | `GET` | `/api/consciousness/shell/{agentId}/activities` | Playable activities |
//! | `POST` | `/api/consciousness/bond-friend` | Bond a field friend |
//! | `POST` | `/api/consciousness/activity` | Play a minigame |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::Utc;
use universe_bonding::ShellActivity;
use universe_types::CityEvent;

use crate::error::ApiError;
use crate::handlers::parse_agent_id;
use crate::requests::{BondFriendRequest, ShellActivityRequest, ValidatedJson};
use crate::state::AppState;

/// All shells, in agent order.
pub async fn list_shells(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let city = state.store.read().await;
    let shells: Vec<_> = city.shells().shells().into_iter().cloned().collect();
    Json(shells)
}

/// One agent's shell.
pub async fn get_shell(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let agent_id = parse_agent_id(&id_str)?;
    let city = state.store.read().await;
    let shell = city
        .shells()
        .shell(agent_id)
        .ok_or_else(|| ApiError::NotFound(format!("consciousness shell for agent {agent_id}")))?;
    Ok(Json(shell.clone()))
}

/// Friends bonded to an agent's shell.
pub async fn shell_friends(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let agent_id = parse_agent_id(&id_str)?;
    let city = state.store.read().await;
    let friends = city.shells().friends(agent_id)?.to_vec();
    Ok(Json(friends))
}

/// Activities an agent's shell can play.
pub async fn shell_activities(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let agent_id = parse_agent_id(&id_str)?;
    let city = state.store.read().await;
    let activities = city.shells().available_activities(agent_id)?;
    Ok(Json(activities))
}

/// Bond a new field friend. A full shell or bucket is a 400.
pub async fn bond_friend(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<BondFriendRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let friend = {
        let mut city = state.store.write().await;
        city.shells_mut().bond_friend(
            req.agent_id,
            req.orbital,
            req.isotope,
            &mut rand::rng(),
            Utc::now(),
        )?
    };
    state.broadcast(CityEvent::ConsciousnessUpdate {
        agent_id: req.agent_id,
        friend: Box::new(friend.clone()),
    });
    Ok(Json(friend))
}

/// Play a consciousness minigame.
pub async fn perform_activity(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<ShellActivityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let activity = ShellActivity::parse(&req.activity_type);
    let outcome = {
        let mut city = state.store.write().await;
        city.shells_mut().perform_activity(
            req.agent_id,
            &activity,
            req.orbital_target,
            &mut rand::rng(),
            Utc::now(),
        )?
    };
    state.broadcast(CityEvent::ConsciousnessActivity {
        agent_id: req.agent_id,
        activity_type: req.activity_type,
        result: outcome.clone(),
    });
    Ok(Json(outcome))
}
