//! Request bodies and the validating JSON extractor.
//!
//! Bodies are camelCase JSON. Field-level rules are declared with
//! `validator` derives; grid bounds and owner existence are checked by the
//! store.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use universe_city::{AgentUpdate, NewAgent, NewBuilding};
use universe_types::{
    AgentId, BuildingType, Element, Glyph, Isotope, ModuleConfig, Orbital, PersonalityType,
    Position, Size,
};
use validator::Validate;

use crate::error::ApiError;

/// JSON body that must also pass its [`Validate`] rules.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Body of `POST /api/agents`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    /// Display name.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Personality type.
    #[serde(rename = "type")]
    pub personality_type: PersonalityType,
    /// Element; defaults to the type's pairing.
    pub element: Option<Element>,
    /// Strategy text; defaults to the type's strategy.
    #[validate(length(max = 200))]
    pub strategy: Option<String>,
    /// Scientist flag.
    #[serde(default)]
    pub is_scientist: bool,
    /// Initial consciousness.
    #[validate(range(min = 0.0, max = 1.0))]
    pub consciousness: Option<f64>,
    /// Initial social bond.
    #[validate(range(min = 0.0, max = 1.0))]
    pub social_bond: Option<f64>,
    /// Initial happiness.
    #[validate(range(min = 0.0, max = 100.0))]
    pub happiness: Option<f64>,
    /// Initial resources.
    #[validate(range(min = 0.0, max = 100.0))]
    pub resources: Option<f64>,
    /// Initial activity text.
    #[validate(length(max = 200))]
    pub current_activity: Option<String>,
    /// Starting cell.
    pub position: Option<Position>,
    /// Glyph.
    pub glyph: Option<Glyph>,
    /// Initial relationships.
    #[serde(default)]
    pub relationships: BTreeMap<AgentId, f64>,
    /// Initial inventory.
    #[serde(default)]
    pub inventory: BTreeMap<String, i64>,
    /// Whether the agent starts active.
    pub is_active: Option<bool>,
}

impl CreateAgentRequest {
    /// Fill unset fields from the personality type's defaults.
    pub fn into_new_agent(self) -> NewAgent {
        let mut agent = NewAgent::of_type(self.name, self.personality_type);
        if let Some(element) = self.element {
            agent.element = element;
        }
        if let Some(strategy) = self.strategy {
            agent.strategy = strategy;
        }
        agent.is_scientist = self.is_scientist;
        agent.consciousness = self.consciousness.unwrap_or(agent.consciousness);
        agent.social_bond = self.social_bond.unwrap_or(agent.social_bond);
        agent.happiness = self.happiness.unwrap_or(agent.happiness);
        agent.resources = self.resources.unwrap_or(agent.resources);
        if let Some(activity) = self.current_activity {
            agent.current_activity = activity;
        }
        agent.position = self.position.unwrap_or(agent.position);
        if let Some(glyph) = self.glyph {
            agent.glyph = glyph;
        }
        agent.relationships = self.relationships;
        agent.inventory = self.inventory;
        agent.is_active = self.is_active.unwrap_or(true);
        agent
    }
}

/// Body of `PATCH /api/agents/{id}`. Trait values are clamped.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgentRequest {
    /// New activity text.
    #[validate(length(max = 200))]
    pub current_activity: Option<String>,
    /// New cell.
    pub position: Option<Position>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New consciousness.
    pub consciousness: Option<f64>,
    /// New social bond.
    pub social_bond: Option<f64>,
    /// New happiness.
    pub happiness: Option<f64>,
    /// New resources.
    pub resources: Option<f64>,
}

impl From<UpdateAgentRequest> for AgentUpdate {
    fn from(req: UpdateAgentRequest) -> Self {
        Self {
            current_activity: req.current_activity,
            position: req.position,
            is_active: req.is_active,
            consciousness: req.consciousness,
            social_bond: req.social_bond,
            happiness: req.happiness,
            resources: req.resources,
        }
    }
}

/// Body of `POST /api/buildings`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildingRequest {
    /// Display name.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Structural type.
    #[serde(rename = "type")]
    pub building_type: BuildingType,
    /// Top-left cell.
    pub position: Position,
    /// Footprint; 2×2 when absent.
    pub size: Option<Size>,
    /// Owner; must exist.
    pub owner_id: Option<AgentId>,
    /// Opening stock.
    #[serde(default)]
    pub resources: BTreeMap<String, i64>,
    /// Per-kind configuration.
    #[serde(default)]
    pub module_config: ModuleConfig,
}

impl From<CreateBuildingRequest> for NewBuilding {
    fn from(req: CreateBuildingRequest) -> Self {
        Self {
            name: req.name,
            building_type: req.building_type,
            position: req.position,
            size: req.size.unwrap_or(Size::square(2)),
            owner_id: req.owner_id,
            resources: req.resources,
            module_config: req.module_config,
        }
    }
}

/// Body of `POST /api/city/create-building`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBuildingRequest {
    /// Structural type; only types with a starter template are accepted.
    #[serde(rename = "type")]
    pub building_type: BuildingType,
    /// Top-left cell.
    pub position: Position,
    /// Owner; must exist.
    pub owner_id: Option<AgentId>,
}

/// Body of `POST /api/synthia` and `POST /api/synthia/command`.
#[derive(Debug, Deserialize, Validate)]
pub struct SynthiaCommandRequest {
    /// Command category.
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 64))]
    pub command_type: String,
    /// Free-text instruction.
    #[validate(length(min = 1, max = 500))]
    pub instruction: String,
}

/// Body of `POST /api/consciousness/bond-friend`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BondFriendRequest {
    /// The shell's agent.
    pub agent_id: AgentId,
    /// Target bucket.
    pub orbital: Orbital,
    /// Isotope of the new friend.
    pub isotope: Isotope,
}

/// Body of `POST /api/consciousness/activity`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShellActivityRequest {
    /// The shell's agent.
    pub agent_id: AgentId,
    /// Activity name, e.g. `meditation`.
    #[validate(length(min = 1, max = 64))]
    pub activity_type: String,
    /// Only friends in this bucket record the interaction.
    pub orbital_target: Option<Orbital>,
}

/// Query parameters for `GET /api/activities`.
#[derive(Debug, Deserialize)]
pub struct ActivitiesQuery {
    /// Maximum number of activities (default 20).
    pub limit: Option<usize>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn create_agent_fills_type_defaults() {
        let req: CreateAgentRequest =
            serde_json::from_str(r#"{"name":"Orb-4","type":"Projector"}"#).unwrap();
        assert!(req.validate().is_ok());
        let new = req.into_new_agent();
        assert_eq!(new.element, Element::Phosphorus);
        assert!((new.consciousness - 0.5).abs() < f64::EPSILON);
        assert!(new.is_active);
    }

    #[test]
    fn create_agent_rejects_out_of_range_traits() {
        let req: CreateAgentRequest = serde_json::from_str(
            r#"{"name":"Orb-4","type":"Projector","consciousness":1.5}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn blank_command_is_rejected() {
        let req: SynthiaCommandRequest =
            serde_json::from_str(r#"{"type":"build","instruction":""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn building_defaults_to_two_by_two() {
        let req: CreateBuildingRequest = serde_json::from_str(
            r#"{"name":"Hall","type":"social","position":{"x":1,"y":2}}"#,
        )
        .unwrap();
        let new = NewBuilding::from(req);
        assert_eq!(new.size, Size::square(2));
        assert_eq!(new.module_config, ModuleConfig::Basic);
    }
}
