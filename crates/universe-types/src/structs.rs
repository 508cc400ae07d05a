//! Core records of the agent city: agents, buildings, the activity log,
//! aggregate metrics, and the Synthia singleton.
//!
//! All records serialize with camelCase field names; the personality and
//! building type fields serialize as `type`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActivityType, BuildingType, Element, ModuleKind, PersonalityType};
use crate::ids::{ActivityId, AgentId, BuildingId};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A cell on the city grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Column, starting at 0.
    pub x: i32,
    /// Row, starting at 0.
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Sum of the per-axis distances.
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Largest of the per-axis distances.
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// Footprint of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Size {
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
}

impl Size {
    /// A square footprint.
    pub const fn square(side: i32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::square(1)
    }
}

/// Dimensions of the city grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GridSize {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

impl GridSize {
    /// Whether `pos` lies on the grid.
    pub const fn contains(self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Clamp `pos` onto the grid.
    pub fn clamp(self, pos: Position) -> Position {
        Position {
            x: pos.x.clamp(0, self.width.saturating_sub(1).max(0)),
            y: pos.y.clamp(0, self.height.saturating_sub(1).max(0)),
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: 12,
            height: 12,
        }
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// Decorative glyph carried by an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Glyph {
    /// Glyph kind (`auric_field` for spawned agents).
    #[serde(rename = "type")]
    pub kind: String,
    /// Personality trait the glyph expresses.
    #[serde(rename = "trait")]
    pub trait_name: String,
}

impl Glyph {
    /// An auric field glyph with the given trait.
    pub fn auric_field(trait_name: &str) -> Self {
        Self {
            kind: String::from("auric_field"),
            trait_name: String::from(trait_name),
        }
    }
}

/// A timestamped event in an agent's memory stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MemoryEntry {
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Free-text description.
    pub event: String,
}

impl MemoryEntry {
    /// Create a memory entry.
    pub fn new(timestamp: DateTime<Utc>, event: impl Into<String>) -> Self {
        Self {
            timestamp,
            event: event.into(),
        }
    }
}

/// An autonomous inhabitant of the city.
///
/// Trait ranges: `consciousness` and `social_bond` in 0.0 to 1.0,
/// `happiness` and `resources` in 0.0 to 100.0. The memory stream holds
/// at most the store's memory capacity (10 by default), oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Agent {
    /// Unique identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Personality type.
    #[serde(rename = "type")]
    pub personality_type: PersonalityType,
    /// Elemental affinity.
    pub element: Element,
    /// Strategy text paired with the personality type.
    pub strategy: String,
    /// Scientists may own up to three buildings and propose dashboards.
    pub is_scientist: bool,
    /// Awareness level, 0.0 to 1.0.
    pub consciousness: f64,
    /// Community connectedness, 0.0 to 1.0.
    pub social_bond: f64,
    /// Wellbeing, 0.0 to 100.0.
    pub happiness: f64,
    /// Sustenance, 0.0 to 100.0.
    pub resources: f64,
    /// What the agent is doing right now.
    pub current_activity: String,
    /// Grid cell.
    pub position: Position,
    /// Decorative glyph.
    pub glyph: Glyph,
    /// Recent events, oldest first.
    pub memory_stream: Vec<MemoryEntry>,
    /// Relationship score toward other agents.
    pub relationships: BTreeMap<AgentId, f64>,
    /// Item quantities carried.
    pub inventory: BTreeMap<String, i64>,
    /// Inactive agents are skipped by the simulation loop.
    pub is_active: bool,
    /// When the agent joined the city.
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// The most recent memory, if any.
    pub fn last_memory(&self) -> Option<&MemoryEntry> {
        self.memory_stream.last()
    }

    /// Relationship score toward `other`, defaulting to neutral (0.5).
    pub fn relationship_with(&self, other: AgentId) -> f64 {
        self.relationships.get(&other).copied().unwrap_or(0.5)
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Settings of a farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FarmSettings {
    /// Crops harvested per cycle.
    pub harvest_rate: i64,
    /// Yield multiplier.
    pub efficiency: f64,
}

/// Settings of a trading post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TradingSettings {
    /// Units traded per cycle.
    pub trade_volume: i64,
    /// Whether the post reaches the wider market.
    pub market_access: bool,
}

/// Settings of a research lab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ResearchSettings {
    /// Research speed multiplier.
    pub research_speed: f64,
    /// Whether the lab accepts collaborators.
    pub collaboration: bool,
}

/// Settings of a performance hall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub struct TheaterSettings {
    /// Quality of performances, 0.0 to 1.0.
    pub performance_quality: f64,
    /// Social reach of performances, 0.0 to 1.0.
    pub social_impact: f64,
}

/// Description and feature list of a dashboard module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DashboardModule {
    /// What the module shows.
    pub description: String,
    /// Feature names.
    pub features: Vec<String>,
}

/// Per-kind configuration of a building, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ModuleConfig {
    /// Plain building with no special configuration.
    #[default]
    Basic,
    /// Farm settings.
    Farm(FarmSettings),
    /// Trading post settings.
    Trading(TradingSettings),
    /// Research lab settings.
    Research(ResearchSettings),
    /// Performance hall settings.
    Theater(TheaterSettings),
    /// Science lab dashboard.
    ScienceLab(DashboardModule),
    /// Music player dashboard.
    MusicPlayer(DashboardModule),
    /// Analytics dashboard.
    AnalyticsDashboard(DashboardModule),
    /// Field book social network.
    FieldBookNetwork(DashboardModule),
}

impl ModuleConfig {
    /// Build the dashboard configuration for a module kind.
    pub fn dashboard(kind: ModuleKind, module: DashboardModule) -> Self {
        match kind {
            ModuleKind::ScienceLab => Self::ScienceLab(module),
            ModuleKind::MusicPlayer => Self::MusicPlayer(module),
            ModuleKind::AnalyticsDashboard => Self::AnalyticsDashboard(module),
            ModuleKind::FieldBookNetwork => Self::FieldBookNetwork(module),
        }
    }

    /// The dashboard module kind, if this is a dashboard.
    pub const fn module_kind(&self) -> Option<ModuleKind> {
        match self {
            Self::ScienceLab(_) => Some(ModuleKind::ScienceLab),
            Self::MusicPlayer(_) => Some(ModuleKind::MusicPlayer),
            Self::AnalyticsDashboard(_) => Some(ModuleKind::AnalyticsDashboard),
            Self::FieldBookNetwork(_) => Some(ModuleKind::FieldBookNetwork),
            Self::Basic | Self::Farm(_) | Self::Trading(_) | Self::Research(_) | Self::Theater(_) => {
                None
            }
        }
    }
}

/// A structure on the city grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Building {
    /// Unique identifier.
    pub id: BuildingId,
    /// Display name.
    pub name: String,
    /// Structural type.
    #[serde(rename = "type")]
    pub building_type: BuildingType,
    /// Top-left grid cell.
    pub position: Position,
    /// Footprint.
    pub size: Size,
    /// Owning agent; must exist when the building is created.
    pub owner_id: Option<AgentId>,
    /// Whether the building is operating.
    pub is_active: bool,
    /// Stored resource quantities.
    pub resources: BTreeMap<String, i64>,
    /// Per-kind configuration.
    pub module_config: ModuleConfig,
    /// When the building was created.
    pub created_at: DateTime<Utc>,
}

impl Building {
    /// Quantity of `key`, zero when absent.
    pub fn resource(&self, key: &str) -> i64 {
        self.resources.get(key).copied().unwrap_or(0)
    }

    /// Add `delta` (possibly negative) to resource `key`.
    pub fn adjust_resource(&mut self, key: &str, delta: i64) {
        let entry = self.resources.entry(String::from(key)).or_insert(0);
        *entry = entry.saturating_add(delta);
    }

    /// The hosted dashboard module, if any.
    pub const fn module_kind(&self) -> Option<ModuleKind> {
        self.module_config.module_kind()
    }

    /// Whether the building can take on a new worker.
    pub fn is_hiring(&self) -> bool {
        self.owner_id.is_none() || self.resource("job_openings") > 0
    }
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

/// An immutable entry in the city's activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Activity {
    /// Unique identifier.
    pub id: ActivityId,
    /// The acting agent.
    pub agent_id: AgentId,
    /// The building involved, if any.
    pub building_id: Option<BuildingId>,
    /// What kind of action this was.
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Human-readable description.
    pub description: String,
    /// Action-specific payload.
    pub data: serde_json::Value,
    /// When it was logged.
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Singletons
// ---------------------------------------------------------------------------

/// City-wide aggregates recomputed every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CityMetrics {
    /// Sum of consciousness times 100.
    pub collective_intelligence: f64,
    /// Agents trading or harvesting, times 1000.
    pub economic_activity: f64,
    /// Researchers times 15.
    pub research_progress: f64,
    /// Mean social bond times 100.
    pub cultural_harmony: f64,
    /// Active agents.
    pub population: usize,
    /// All buildings.
    pub buildings_count: usize,
    /// When the metrics were computed.
    pub timestamp: DateTime<Utc>,
}

impl CityMetrics {
    /// The opening snapshot shown before the first tick.
    pub const fn opening(timestamp: DateTime<Utc>) -> Self {
        Self {
            collective_intelligence: 2847.0,
            economic_activity: 156_200.0,
            research_progress: 42.7,
            cultural_harmony: 91.3,
            population: 247,
            buildings_count: 89,
            timestamp,
        }
    }

    /// Metrics of an empty city.
    pub const fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            collective_intelligence: 0.0,
            economic_activity: 0.0,
            research_progress: 0.0,
            cultural_harmony: 0.0,
            population: 0,
            buildings_count: 0,
            timestamp,
        }
    }
}

/// State of Synthia, the overseeing AI persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SynthiaState {
    /// Current mood word.
    pub mood: String,
    /// Awareness level, 0.0 to 1.0.
    pub consciousness_level: f64,
    /// Latest message shown on the dashboard.
    pub last_message: Option<String>,
    /// Latest command text.
    pub current_command: Option<String>,
    /// Latest command category.
    pub command_type: Option<String>,
    /// When the latest command arrived.
    pub command_timestamp: Option<DateTime<Utc>>,
    /// Whether Synthia is online.
    pub is_active: bool,
    /// Last update.
    pub timestamp: DateTime<Utc>,
}

impl SynthiaState {
    /// Synthia as she wakes up.
    pub fn awakening(timestamp: DateTime<Utc>) -> Self {
        Self {
            mood: String::from("curious"),
            consciousness_level: 0.85,
            last_message: Some(String::from(
                "The agents are showing fascinating emergent behaviors in sector γ-1...",
            )),
            current_command: None,
            command_type: None,
            command_timestamp: None,
            is_active: true,
            timestamp,
        }
    }

    /// Whether a command arrived within `window` of `now`.
    pub fn has_command_within(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        self.command_timestamp
            .is_some_and(|at| now.signed_duration_since(at) < window)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn grid_clamps_positions() {
        let grid = GridSize::default();
        assert_eq!(grid.clamp(Position::new(-1, 12)), Position::new(0, 11));
        assert!(grid.contains(Position::new(11, 0)));
        assert!(!grid.contains(Position::new(12, 0)));
    }

    #[test]
    fn distances() {
        let a = Position::new(2, 2);
        let b = Position::new(4, 1);
        assert_eq!(a.manhattan(b), 3);
        assert_eq!(a.chebyshev(b), 2);
    }

    #[test]
    fn module_config_is_tagged_by_type() {
        let config = ModuleConfig::dashboard(
            ModuleKind::MusicPlayer,
            DashboardModule {
                description: String::from("tunes"),
                features: vec![String::from("Music Library")],
            },
        );
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "music_player");
        assert_eq!(json["features"][0], "Music Library");
        assert_eq!(config.module_kind(), Some(ModuleKind::MusicPlayer));
    }

    #[test]
    fn theater_settings_use_kebab_keys() {
        let config = ModuleConfig::Theater(TheaterSettings {
            performance_quality: 0.95,
            social_impact: 0.8,
        });
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "theater");
        assert!(json.get("performance-quality").is_some());
    }

    #[test]
    fn building_hires_when_unowned_or_open() {
        let mut building = Building {
            id: BuildingId::new(),
            name: String::from("Farm"),
            building_type: BuildingType::Farm,
            position: Position::default(),
            size: Size::square(2),
            owner_id: Some(AgentId::new()),
            is_active: true,
            resources: BTreeMap::new(),
            module_config: ModuleConfig::Basic,
            created_at: Utc::now(),
        };
        assert!(!building.is_hiring());
        building.adjust_resource("job_openings", 1);
        assert!(building.is_hiring());
        building.owner_id = None;
        building.adjust_resource("job_openings", -1);
        assert!(building.is_hiring());
    }

    #[test]
    fn synthia_command_window() {
        let now = Utc::now();
        let mut synthia = SynthiaState::awakening(now);
        assert!(!synthia.has_command_within(now, chrono::Duration::seconds(60)));
        synthia.command_timestamp = Some(now - chrono::Duration::seconds(30));
        assert!(synthia.has_command_within(now, chrono::Duration::seconds(60)));
        synthia.command_timestamp = Some(now - chrono::Duration::seconds(90));
        assert!(!synthia.has_command_within(now, chrono::Duration::seconds(60)));
    }

    #[test]
    fn agent_serializes_type_and_camel_case() {
        let agent = Agent {
            id: AgentId::new(),
            name: String::from("Alex-7"),
            personality_type: PersonalityType::Generator,
            element: Element::Oxygen,
            strategy: String::from("Respond"),
            is_scientist: false,
            consciousness: 0.5,
            social_bond: 0.5,
            happiness: 50.0,
            resources: 50.0,
            current_activity: String::from("idle"),
            position: Position::new(2, 2),
            glyph: Glyph::auric_field("sustaining"),
            memory_stream: Vec::new(),
            relationships: BTreeMap::new(),
            inventory: BTreeMap::new(),
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json["type"], "Generator");
        assert_eq!(json["glyph"]["trait"], "sustaining");
        assert!(json.get("socialBond").is_some());
        assert!(json.get("memoryStream").is_some());
    }
}
