//! The city store.
//!
//! [`CityStore`] owns every record of the simulation: agents, buildings,
//! the activity log, the metrics and Synthia singletons, and the
//! consciousness shells. It is explicitly owned and passed by reference;
//! the server shares it behind an `Arc<RwLock<_>>`.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use universe_bonding::ShellRegistry;
use universe_types::{
    Activity, ActivityId, ActivityType, Agent, AgentId, Building, BuildingId, BuildingType,
    CityMetrics, Element, Glyph, GridSize, MemoryEntry, ModuleConfig, ModuleKind,
    PersonalityType, Position, Size, SynthiaState,
};

use crate::error::CityError;
use crate::wellbeing::{clamp_percent, clamp_traits, clamp_unit, remember, trim_memory};

/// Capacity limits of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityLimits {
    /// Maximum entries in an agent's memory stream.
    pub memory_capacity: usize,
    /// Maximum entries kept in the activity log.
    pub activity_capacity: usize,
    /// Buildings a regular agent may own.
    pub owner_quota: usize,
    /// Buildings a scientist may own.
    pub scientist_quota: usize,
}

impl Default for CityLimits {
    fn default() -> Self {
        Self {
            memory_capacity: 10,
            activity_capacity: 1000,
            owner_quota: 1,
            scientist_quota: 3,
        }
    }
}

impl CityLimits {
    /// How many buildings an agent may own.
    pub const fn ownership_quota(&self, is_scientist: bool) -> usize {
        if is_scientist {
            self.scientist_quota
        } else {
            self.owner_quota
        }
    }
}

/// Fields of an agent about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    /// Display name.
    pub name: String,
    /// Personality type.
    pub personality_type: PersonalityType,
    /// Elemental affinity.
    pub element: Element,
    /// Strategy text.
    pub strategy: String,
    /// Scientist flag.
    pub is_scientist: bool,
    /// Initial consciousness.
    pub consciousness: f64,
    /// Initial social bond.
    pub social_bond: f64,
    /// Initial happiness.
    pub happiness: f64,
    /// Initial resources.
    pub resources: f64,
    /// Initial activity text.
    pub current_activity: String,
    /// Starting cell.
    pub position: Position,
    /// Glyph.
    pub glyph: Glyph,
    /// Initial memories, oldest first.
    pub memory_stream: Vec<MemoryEntry>,
    /// Initial relationships.
    pub relationships: BTreeMap<AgentId, f64>,
    /// Initial inventory.
    pub inventory: BTreeMap<String, i64>,
    /// Whether the agent starts active.
    pub is_active: bool,
}

impl NewAgent {
    /// A fresh agent with neutral traits and the type's paired element,
    /// strategy, and glyph.
    pub fn of_type(name: impl Into<String>, personality_type: PersonalityType) -> Self {
        let strategy = personality_type.strategy();
        Self {
            name: name.into(),
            personality_type,
            element: personality_type.element(),
            strategy: String::from(strategy),
            is_scientist: false,
            consciousness: 0.5,
            social_bond: 0.5,
            happiness: 50.0,
            resources: 50.0,
            current_activity: format!("Following {strategy} strategy"),
            position: Position::default(),
            glyph: Glyph::auric_field(personality_type.glyph_trait()),
            memory_stream: Vec::new(),
            relationships: BTreeMap::new(),
            inventory: BTreeMap::new(),
            is_active: true,
        }
    }
}

/// Partial update of an agent. `None` fields are left unchanged; trait
/// values are clamped to their ranges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentUpdate {
    /// New activity text.
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

/// Fields of a building about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBuilding {
    /// Display name.
    pub name: String,
    /// Structural type.
    pub building_type: BuildingType,
    /// Top-left cell.
    pub position: Position,
    /// Footprint.
    pub size: Size,
    /// Owner; must exist.
    pub owner_id: Option<AgentId>,
    /// Opening stock.
    pub resources: BTreeMap<String, i64>,
    /// Per-kind configuration.
    pub module_config: ModuleConfig,
}

/// Fields of an activity about to be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    /// The acting agent.
    pub agent_id: AgentId,
    /// The building involved, if any.
    pub building_id: Option<BuildingId>,
    /// Kind of action.
    pub activity_type: ActivityType,
    /// Human-readable description.
    pub description: String,
    /// Action payload.
    pub data: serde_json::Value,
}

/// In-memory store of the whole city.
#[derive(Debug, Clone)]
pub struct CityStore {
    agents: BTreeMap<AgentId, Agent>,
    buildings: BTreeMap<BuildingId, Building>,
    activities: VecDeque<Activity>,
    metrics: CityMetrics,
    synthia: SynthiaState,
    shells: ShellRegistry,
    grid: GridSize,
    limits: CityLimits,
}

impl CityStore {
    /// An empty city.
    pub fn new(grid: GridSize, limits: CityLimits, now: DateTime<Utc>) -> Self {
        Self {
            agents: BTreeMap::new(),
            buildings: BTreeMap::new(),
            activities: VecDeque::new(),
            metrics: CityMetrics::empty(now),
            synthia: SynthiaState::awakening(now),
            shells: ShellRegistry::new(),
            grid,
            limits,
        }
    }

    /// Grid dimensions.
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Capacity limits.
    pub const fn limits(&self) -> CityLimits {
        self.limits
    }

    // -----------------------------------------------------------------------
    // Agents
    // -----------------------------------------------------------------------

    /// All agents, in creation order.
    pub fn agents(&self) -> Vec<&Agent> {
        self.agents.values().collect()
    }

    /// Active agents, in creation order.
    pub fn active_agents(&self) -> Vec<&Agent> {
        self.agents.values().filter(|a| a.is_active).collect()
    }

    /// Ids of active agents, in creation order.
    pub fn active_agent_ids(&self) -> Vec<AgentId> {
        self.agents
            .values()
            .filter(|a| a.is_active)
            .map(|a| a.id)
            .collect()
    }

    /// Number of agents.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Look up an agent.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Mutable access to an agent. Callers must keep traits in range; the
    /// [`wellbeing`](crate::wellbeing) helpers do.
    pub fn agent_mut(&mut self, id: AgentId) -> Result<&mut Agent, CityError> {
        self.agents.get_mut(&id).ok_or(CityError::AgentNotFound(id))
    }

    /// Create an agent and its consciousness shell.
    ///
    /// Traits are clamped, the memory stream is trimmed to capacity, and the
    /// position must lie on the grid.
    pub fn insert_agent(&mut self, new: NewAgent, now: DateTime<Utc>) -> Result<Agent, CityError> {
        if new.name.trim().is_empty() {
            return Err(CityError::Invalid {
                field: "name",
                reason: String::from("must not be empty"),
            });
        }
        if !self.grid.contains(new.position) {
            return Err(CityError::OffGrid(new.position));
        }

        let mut agent = Agent {
            id: AgentId::new(),
            name: new.name,
            personality_type: new.personality_type,
            element: new.element,
            strategy: new.strategy,
            is_scientist: new.is_scientist,
            consciousness: new.consciousness,
            social_bond: new.social_bond,
            happiness: new.happiness,
            resources: new.resources,
            current_activity: new.current_activity,
            position: new.position,
            glyph: new.glyph,
            memory_stream: new.memory_stream,
            relationships: new.relationships,
            inventory: new.inventory,
            is_active: new.is_active,
            created_at: now,
        };
        clamp_traits(&mut agent);
        trim_memory(&mut agent, self.limits.memory_capacity);

        self.shells
            .ensure_shell(agent.id, agent.personality_type, now);
        debug!(agent_id = %agent.id, name = %agent.name, "agent created");
        self.agents.insert(agent.id, agent.clone());
        Ok(agent)
    }

    /// Apply a partial update to an agent.
    pub fn update_agent(&mut self, id: AgentId, update: AgentUpdate) -> Result<Agent, CityError> {
        let grid = self.grid;
        let agent = self.agent_mut(id)?;
        if let Some(position) = update.position {
            if !grid.contains(position) {
                return Err(CityError::OffGrid(position));
            }
            agent.position = position;
        }
        if let Some(activity) = update.current_activity {
            agent.current_activity = activity;
        }
        if let Some(active) = update.is_active {
            agent.is_active = active;
        }
        if let Some(v) = update.consciousness {
            agent.consciousness = clamp_unit(v);
        }
        if let Some(v) = update.social_bond {
            agent.social_bond = clamp_unit(v);
        }
        if let Some(v) = update.happiness {
            agent.happiness = clamp_percent(v);
        }
        if let Some(v) = update.resources {
            agent.resources = clamp_percent(v);
        }
        Ok(agent.clone())
    }

    /// Append a memory to an agent's stream, keeping it within capacity.
    pub fn remember(
        &mut self,
        id: AgentId,
        event: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), CityError> {
        let capacity = self.limits.memory_capacity;
        let agent = self.agent_mut(id)?;
        remember(agent, MemoryEntry::new(now, event), capacity);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Buildings
    // -----------------------------------------------------------------------

    /// All buildings, in creation order.
    pub fn buildings(&self) -> Vec<&Building> {
        self.buildings.values().collect()
    }

    /// Number of buildings.
    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    /// Look up a building.
    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(&id)
    }

    /// Mutable access to a building.
    pub fn building_mut(&mut self, id: BuildingId) -> Result<&mut Building, CityError> {
        self.buildings
            .get_mut(&id)
            .ok_or(CityError::BuildingNotFound(id))
    }

    /// Create a building.
    ///
    /// The owner, when given, must be an existing agent with room left
    /// under its ownership quota.
    pub fn insert_building(
        &mut self,
        new: NewBuilding,
        now: DateTime<Utc>,
    ) -> Result<Building, CityError> {
        if let Some(owner) = new.owner_id {
            let is_scientist = self
                .agents
                .get(&owner)
                .map(|a| a.is_scientist)
                .ok_or(CityError::OwnerNotFound(owner))?;
            let quota = self.limits.ownership_quota(is_scientist);
            if self.owned_by(owner).len() >= quota {
                return Err(CityError::OwnershipQuota { owner, quota });
            }
        }
        if !self.grid.contains(new.position) {
            return Err(CityError::OffGrid(new.position));
        }
        if new.name.trim().is_empty() {
            return Err(CityError::Invalid {
                field: "name",
                reason: String::from("must not be empty"),
            });
        }

        let building = Building {
            id: BuildingId::new(),
            name: new.name,
            building_type: new.building_type,
            position: new.position,
            size: new.size,
            owner_id: new.owner_id,
            is_active: true,
            resources: new.resources,
            module_config: new.module_config,
            created_at: now,
        };
        debug!(building_id = %building.id, name = %building.name, "building created");
        self.buildings.insert(building.id, building.clone());
        Ok(building)
    }

    /// Buildings owned by `agent`.
    pub fn owned_by(&self, agent: AgentId) -> Vec<&Building> {
        self.buildings
            .values()
            .filter(|b| b.owner_id == Some(agent))
            .collect()
    }

    /// Buildings of a structural type.
    pub fn count_type(&self, building_type: BuildingType) -> usize {
        self.buildings
            .values()
            .filter(|b| b.building_type == building_type)
            .count()
    }

    /// Buildings hosting a dashboard module.
    pub fn count_module(&self, kind: ModuleKind) -> usize {
        self.buildings
            .values()
            .filter(|b| b.module_kind() == Some(kind))
            .count()
    }

    // -----------------------------------------------------------------------
    // Activity log
    // -----------------------------------------------------------------------

    /// Append to the activity log, dropping the oldest entries beyond
    /// capacity.
    pub fn log_activity(&mut self, new: NewActivity, now: DateTime<Utc>) -> Activity {
        let activity = Activity {
            id: ActivityId::new(),
            agent_id: new.agent_id,
            building_id: new.building_id,
            activity_type: new.activity_type,
            description: new.description,
            data: new.data,
            timestamp: now,
        };
        self.activities.push_back(activity.clone());
        while self.activities.len() > self.limits.activity_capacity {
            self.activities.pop_front();
        }
        activity
    }

    /// Up to `limit` activities, newest first.
    pub fn recent_activities(&self, limit: usize) -> Vec<&Activity> {
        self.activities.iter().rev().take(limit).collect()
    }

    /// Activities of one agent, oldest first.
    pub fn activities_by_agent(&self, agent: AgentId) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| a.agent_id == agent)
            .collect()
    }

    /// Number of entries in the log.
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    // -----------------------------------------------------------------------
    // Singletons and shells
    // -----------------------------------------------------------------------

    /// Latest metrics.
    pub const fn metrics(&self) -> &CityMetrics {
        &self.metrics
    }

    /// Replace the metrics snapshot.
    pub const fn set_metrics(&mut self, metrics: CityMetrics) {
        self.metrics = metrics;
    }

    /// Synthia's state.
    pub const fn synthia(&self) -> &SynthiaState {
        &self.synthia
    }

    /// Record a command for Synthia: she turns `focused` and acknowledges it.
    pub fn command_synthia(
        &mut self,
        command_type: impl Into<String>,
        instruction: impl Into<String>,
        now: DateTime<Utc>,
    ) -> SynthiaState {
        let command_type = command_type.into();
        let instruction = instruction.into();
        self.synthia.mood = String::from("focused");
        self.synthia.last_message = Some(format!("Processing {command_type} command: {instruction}"));
        self.synthia.current_command = Some(instruction);
        self.synthia.command_type = Some(command_type);
        self.synthia.command_timestamp = Some(now);
        self.synthia.timestamp = now;
        self.synthia.clone()
    }

    /// Consciousness shells.
    pub const fn shells(&self) -> &ShellRegistry {
        &self.shells
    }

    /// Mutable access to the consciousness shells.
    pub const fn shells_mut(&mut self) -> &mut ShellRegistry {
        &mut self.shells
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::{empty_store, new_farm};

    #[test]
    fn insert_agent_creates_shell_and_clamps() {
        let mut store = empty_store();
        let mut new = NewAgent::of_type("Kai-3", PersonalityType::Projector);
        new.consciousness = 4.0;
        new.happiness = -3.0;
        let agent = store.insert_agent(new, Utc::now()).unwrap();
        assert!((agent.consciousness - 1.0).abs() < f64::EPSILON);
        assert!(agent.happiness.abs() < f64::EPSILON);
        assert!(store.shells().shell(agent.id).is_some());
    }

    #[test]
    fn building_owner_must_exist() {
        let mut store = empty_store();
        let ghost = AgentId::new();
        let err = store
            .insert_building(new_farm(Some(ghost)), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CityError::OwnerNotFound(id) if id == ghost));
        assert_eq!(store.building_count(), 0);
    }

    #[test]
    fn ownership_quota_depends_on_scientist_flag() {
        let mut store = empty_store();
        let now = Utc::now();
        let farmer = store
            .insert_agent(NewAgent::of_type("Tamsin-4", PersonalityType::Generator), now)
            .unwrap();
        let mut new = NewAgent::of_type("Ivo-8", PersonalityType::Projector);
        new.is_scientist = true;
        let scientist = store.insert_agent(new, now).unwrap();

        store.insert_building(new_farm(Some(farmer.id)), now).unwrap();
        let err = store
            .insert_building(new_farm(Some(farmer.id)), now)
            .unwrap_err();
        assert!(matches!(err, CityError::OwnershipQuota { owner, quota: 1 } if owner == farmer.id));

        for _ in 0..3 {
            store.insert_building(new_farm(Some(scientist.id)), now).unwrap();
        }
        assert!(matches!(
            store.insert_building(new_farm(Some(scientist.id)), now),
            Err(CityError::OwnershipQuota { quota: 3, .. })
        ));
        assert_eq!(store.owned_by(farmer.id).len(), 1);
        assert_eq!(store.owned_by(scientist.id).len(), 3);

        // Unowned buildings are never limited.
        store.insert_building(new_farm(None), now).unwrap();
    }

    #[test]
    fn off_grid_positions_are_rejected() {
        let mut store = empty_store();
        let mut new = NewAgent::of_type("Orb-1", PersonalityType::Generator);
        new.position = Position::new(12, 0);
        assert!(matches!(
            store.insert_agent(new, Utc::now()),
            Err(CityError::OffGrid(_))
        ));
    }

    #[test]
    fn activity_log_is_capped_and_newest_first() {
        let mut store = CityStore::new(
            GridSize::default(),
            CityLimits {
                activity_capacity: 5,
                ..CityLimits::default()
            },
            Utc::now(),
        );
        let agent = AgentId::new();
        for i in 0..8 {
            store.log_activity(
                NewActivity {
                    agent_id: agent,
                    building_id: None,
                    activity_type: ActivityType::Move,
                    description: format!("move {i}"),
                    data: serde_json::Value::Null,
                },
                Utc::now(),
            );
        }
        assert_eq!(store.activity_count(), 5);
        let recent = store.recent_activities(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent.first().unwrap().description, "move 7");
        assert_eq!(recent.get(1).unwrap().description, "move 6");
    }

    #[test]
    fn update_agent_clamps_and_validates() {
        let mut store = empty_store();
        let agent = store
            .insert_agent(NewAgent::of_type("Nyx-2", PersonalityType::Reflector), Utc::now())
            .unwrap();
        let updated = store
            .update_agent(
                agent.id,
                AgentUpdate {
                    social_bond: Some(3.0),
                    current_activity: Some(String::from("dancing")),
                    ..AgentUpdate::default()
                },
            )
            .unwrap();
        assert!((updated.social_bond - 1.0).abs() < f64::EPSILON);
        assert_eq!(updated.current_activity, "dancing");

        let err = store
            .update_agent(
                agent.id,
                AgentUpdate {
                    position: Some(Position::new(-1, 3)),
                    ..AgentUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CityError::OffGrid(_)));
    }

    #[test]
    fn synthia_command_is_recorded() {
        let mut store = empty_store();
        let now = Utc::now();
        let state = store.command_synthia("universe", "build a music player", now);
        assert_eq!(state.mood, "focused");
        assert_eq!(state.current_command.as_deref(), Some("build a music player"));
        assert_eq!(state.command_timestamp, Some(now));
    }

    #[test]
    fn listing_twice_is_stable() {
        let mut store = empty_store();
        for name in ["A-1", "B-2", "C-3"] {
            store
                .insert_agent(NewAgent::of_type(name, PersonalityType::Generator), Utc::now())
                .unwrap();
        }
        let first: Vec<AgentId> = store.agents().iter().map(|a| a.id).collect();
        let second: Vec<AgentId> = store.agents().iter().map(|a| a.id).collect();
        assert_eq!(first, second);
    }
}
