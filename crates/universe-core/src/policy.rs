//! The behavior policy: every probability, boost, threshold, cooldown, and
//! quota the tick consults.
//!
//! [`BehaviorPolicy`] is deserialized from the `policy` section of
//! `universe-config.yaml`. Each section defaults field-by-field, so a YAML
//! file only needs to name the values it changes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use universe_types::{BuildingType, ModuleKind};

/// Every tunable constant of the per-agent behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorPolicy {
    /// Needs-category thresholds.
    pub needs: NeedsThresholds,
    /// Building proposals.
    pub build: BuildPolicy,
    /// Job placement.
    pub jobs: JobPolicy,
    /// Daily activities.
    pub daily: DailyPolicy,
    /// Role-keyed actions.
    pub roles: RolePolicy,
    /// Aggregate metric weights.
    pub metrics: MetricWeights,
    /// Consciousness gained per accomplishment logged in a tick.
    pub reflection_boost: f64,
}

impl Default for BehaviorPolicy {
    fn default() -> Self {
        Self {
            needs: NeedsThresholds::default(),
            build: BuildPolicy::default(),
            jobs: JobPolicy::default(),
            daily: DailyPolicy::default(),
            roles: RolePolicy::default(),
            metrics: MetricWeights::default(),
            reflection_boost: 0.01,
        }
    }
}

/// An agent is needy when a trait drops below its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedsThresholds {
    /// Social connection when happiness is below this.
    pub social_happiness_below: f64,
    /// Sustenance when resources are below this.
    pub sustenance_resources_below: f64,
    /// Cognitive boost when consciousness is below this.
    pub cognitive_consciousness_below: f64,
}

impl Default for NeedsThresholds {
    fn default() -> Self {
        Self {
            social_happiness_below: 30.0,
            sustenance_resources_below: 30.0,
            cognitive_consciousness_below: 0.3,
        }
    }
}

/// Building proposal rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildPolicy {
    /// Seconds an agent waits after a successful build.
    pub cooldown_secs: i64,
    /// Scientist proposal chance per tick.
    pub scientist_chance: f64,
    /// Scientist proposal chance while a Synthia command is fresh.
    pub commanded_chance: f64,
    /// Seconds a Synthia command stays fresh.
    pub command_window_secs: i64,
    /// Seconds since its last memory before a Reflector may propose.
    pub reflector_quiet_secs: i64,
    /// Reflector proposal chance.
    pub reflector_chance: f64,
    /// Reflector proposal chance when it needs social connection.
    pub reflector_lonely_chance: f64,
    /// Side length of a proposed building.
    pub building_side: i32,
    /// Citywide caps per building type and module.
    pub quotas: BuildingQuotas,
}

impl Default for BuildPolicy {
    fn default() -> Self {
        Self {
            cooldown_secs: 300,
            scientist_chance: 0.01,
            commanded_chance: 0.15,
            command_window_secs: 60,
            reflector_quiet_secs: 28,
            reflector_chance: 0.03,
            reflector_lonely_chance: 0.08,
            building_side: 3,
            quotas: BuildingQuotas::default(),
        }
    }
}

/// Citywide caps on building types and dashboard modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingQuotas {
    /// Farms.
    pub farm: usize,
    /// Trading posts.
    pub trading: usize,
    /// Research buildings.
    pub research: usize,
    /// Theaters.
    pub theater: usize,
    /// Social buildings.
    pub social: usize,
    /// Markets.
    pub market: usize,
    /// Science lab dashboards.
    pub science_lab: usize,
    /// Music players.
    pub music_player: usize,
    /// Analytics dashboards.
    pub analytics_dashboard: usize,
    /// Field book networks.
    pub field_book_network: usize,
}

impl Default for BuildingQuotas {
    fn default() -> Self {
        Self {
            farm: 2,
            trading: 2,
            research: 3,
            theater: 2,
            social: 2,
            market: 2,
            science_lab: 2,
            music_player: 1,
            analytics_dashboard: 1,
            field_book_network: 2,
        }
    }
}

impl BuildingQuotas {
    /// Cap for a building type.
    pub const fn for_type(&self, building_type: BuildingType) -> usize {
        match building_type {
            BuildingType::Farm => self.farm,
            BuildingType::Trading => self.trading,
            BuildingType::Research => self.research,
            BuildingType::Theater => self.theater,
            BuildingType::Social => self.social,
            BuildingType::Market => self.market,
        }
    }

    /// Cap for a dashboard module.
    pub const fn for_module(&self, kind: ModuleKind) -> usize {
        match kind {
            ModuleKind::ScienceLab => self.science_lab,
            ModuleKind::MusicPlayer => self.music_player,
            ModuleKind::AnalyticsDashboard => self.analytics_dashboard,
            ModuleKind::FieldBookNetwork => self.field_book_network,
        }
    }
}

/// Job placement rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPolicy {
    /// Chance of looking for work while needy.
    pub needy_seek_chance: f64,
    /// Chance of looking for work otherwise.
    pub seek_chance: f64,
    /// Consciousness gained on hire.
    pub consciousness_boost: f64,
    /// Social bond gained on hire.
    pub social_boost: f64,
    /// Salary floor.
    pub base_salary: f64,
    /// Salary per unit of consciousness.
    pub consciousness_salary: f64,
    /// Salary per unit of social bond.
    pub social_salary: f64,
}

impl Default for JobPolicy {
    fn default() -> Self {
        Self {
            needy_seek_chance: 0.5,
            seek_chance: 0.3,
            consciousness_boost: 0.02,
            social_boost: 0.01,
            base_salary: 100.0,
            consciousness_salary: 50.0,
            social_salary: 30.0,
        }
    }
}

/// Daily activity boosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyPolicy {
    /// Happiness from an activity mentioning "social".
    pub social_happiness: f64,
    /// Happiness from any other activity.
    pub happiness: f64,
    /// Resources from gathering or trading.
    pub gathering_resources: f64,
    /// Manhattan radius within which buildings add boosts.
    pub nearby_radius: u32,
    /// Happiness near a social building or field book network.
    pub social_nearby_happiness: f64,
    /// Happiness near a theater.
    pub theater_nearby_happiness: f64,
    /// Resources near a farm.
    pub farm_nearby_resources: f64,
    /// Resources near a trading post.
    pub trading_nearby_resources: f64,
    /// Consciousness gained per daily activity.
    pub consciousness_boost: f64,
    /// Social bond gained per daily activity.
    pub social_boost: f64,
    /// Consciousness above which an agent feels fulfilled.
    pub fulfilled_above: f64,
}

impl Default for DailyPolicy {
    fn default() -> Self {
        Self {
            social_happiness: 2.0,
            happiness: 1.0,
            gathering_resources: 3.0,
            nearby_radius: 2,
            social_nearby_happiness: 3.0,
            theater_nearby_happiness: 2.0,
            farm_nearby_resources: 2.0,
            trading_nearby_resources: 1.0,
            consciousness_boost: 0.001,
            social_boost: 0.002,
            fulfilled_above: 0.8,
        }
    }
}

/// Role-keyed action rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolePolicy {
    /// Most crops taken per harvest.
    pub harvest_max: i64,
    /// Nutrients a farm must hold above to plant.
    pub plant_nutrients_above: i64,
    /// Nutrients spent per planting.
    pub plant_nutrient_cost: i64,
    /// Crops added per planting.
    pub plant_crop_yield: i64,
    /// Other agents a trader considers per tick.
    pub trade_partners: usize,
    /// Relationship a trade partner needs.
    pub trade_relationship_above: f64,
    /// Chance of proposing to a qualifying partner.
    pub trade_chance: f64,
    /// Relationship gained per proposal.
    pub trade_relationship_boost: f64,
    /// Research points a lab must hold above.
    pub research_points_above: i64,
    /// Research points spent per breakthrough.
    pub research_cost: i64,
    /// Inspiration a theater must hold above.
    pub performance_inspiration_above: i64,
    /// Chance of performing.
    pub performance_chance: f64,
    /// Inspiration spent per performance.
    pub performance_cost: i64,
    /// Audience members are closer than this on both axes.
    pub audience_radius: u32,
    /// Social bond the performer gains.
    pub performance_social_boost: f64,
    /// Chance a wanderer moves.
    pub move_chance: f64,
}

impl Default for RolePolicy {
    fn default() -> Self {
        Self {
            harvest_max: 15,
            plant_nutrients_above: 10,
            plant_nutrient_cost: 10,
            plant_crop_yield: 20,
            trade_partners: 2,
            trade_relationship_above: 0.6,
            trade_chance: 0.3,
            trade_relationship_boost: 0.1,
            research_points_above: 50,
            research_cost: 50,
            performance_inspiration_above: 20,
            performance_chance: 0.4,
            performance_cost: 20,
            audience_radius: 3,
            performance_social_boost: 0.05,
            move_chance: 0.3,
        }
    }
}

/// Weights of the aggregate metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricWeights {
    /// Collective intelligence per unit of consciousness.
    pub intelligence: f64,
    /// Economic activity per trading or harvesting agent.
    pub economic: f64,
    /// Research progress per researcher.
    pub research: f64,
    /// Cultural harmony per unit of mean social bond.
    pub harmony: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            intelligence: 100.0,
            economic: 1000.0,
            research: 15.0,
            harmony: 100.0,
        }
    }
}

/// Draw against `probability`. Values outside `0..=1` saturate instead of
/// panicking, so any configured number is safe.
pub fn chance(rng: &mut impl Rng, probability: f64) -> bool {
    rng.random::<f64>() < probability
}
