//! Role-keyed action planning.
//!
//! Each personality type maps to a [`Role`] and each role looks at the
//! city for things to do: farmers tend their farms, traders court their
//! best contacts, researchers spend lab points, performers take the stage,
//! and wanderers roam. Planning only reads the store; see
//! [`actions::execute`](crate::actions::execute) for the effects.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::json;
use universe_city::CityStore;
use universe_types::{ActivityType, Agent, AgentId, BuildingId, BuildingType, Position, Role};

use crate::policy::{RolePolicy, chance};

/// Research topics a breakthrough can be in.
pub const DISCOVERIES: [&str; 4] = [
    "consciousness frequency pattern",
    "neural pathway optimization",
    "quantum cognition theory",
    "emergent behavior model",
];

/// Titles of theater performances.
pub const PERFORMANCES: [&str; 4] = [
    "Quantum Dreams",
    "Neural Symphony",
    "Consciousness Ballet",
    "Digital Emotions",
];

/// Crop type sown by a planting.
pub const CROP_TYPE: &str = "quantum-grain";

/// What an action does, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Take up to `amount` crops from a farm.
    Harvest {
        /// The farm.
        farm: BuildingId,
        /// Most crops to take.
        amount: i64,
    },
    /// Spend nutrients to grow crops.
    Plant {
        /// The farm.
        farm: BuildingId,
        /// Nutrients spent.
        nutrients_used: i64,
        /// Crops added.
        crops_added: i64,
    },
    /// Propose a trade to another agent.
    Trade {
        /// The counterparty.
        partner: AgentId,
    },
    /// Spend lab points on a breakthrough.
    Research {
        /// The lab.
        lab: BuildingId,
        /// Topic of the breakthrough.
        discovery: &'static str,
        /// Points spent.
        points_used: i64,
    },
    /// Perform at a theater.
    Performance {
        /// The theater.
        theater: BuildingId,
        /// Piece performed.
        title: &'static str,
        /// Agents watching.
        audience: usize,
        /// Inspiration spent.
        inspiration_used: i64,
    },
    /// Step to a neighboring cell.
    Move {
        /// Starting cell.
        from: Position,
        /// Destination cell.
        to: Position,
    },
}

/// A planned action of one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityAction {
    /// The acting agent.
    pub agent_id: AgentId,
    /// What it does.
    pub kind: ActionKind,
    /// Log text.
    pub description: String,
}

impl CityAction {
    /// Activity log tag.
    pub const fn activity_type(&self) -> ActivityType {
        match self.kind {
            ActionKind::Harvest { .. } => ActivityType::Harvest,
            ActionKind::Plant { .. } => ActivityType::Plant,
            ActionKind::Trade { .. } => ActivityType::Trade,
            ActionKind::Research { .. } => ActivityType::Research,
            ActionKind::Performance { .. } => ActivityType::Performance,
            ActionKind::Move { .. } => ActivityType::Move,
        }
    }

    /// Building the action happens at, if any.
    pub const fn building_id(&self) -> Option<BuildingId> {
        match self.kind {
            ActionKind::Harvest { farm, .. } | ActionKind::Plant { farm, .. } => Some(farm),
            ActionKind::Research { lab, .. } => Some(lab),
            ActionKind::Performance { theater, .. } => Some(theater),
            ActionKind::Trade { .. } | ActionKind::Move { .. } => None,
        }
    }

    /// Payload stored on the activity log entry.
    pub fn data(&self) -> serde_json::Value {
        match &self.kind {
            ActionKind::Harvest { amount, .. } => json!({ "amount": amount }),
            ActionKind::Plant { nutrients_used, .. } => {
                json!({ "cropType": CROP_TYPE, "nutrientsUsed": nutrients_used })
            }
            ActionKind::Trade { partner } => json!({
                "partnerId": partner,
                "offer": { "quantum-crystals": 5 },
                "request": { "research-data": 2 },
            }),
            ActionKind::Research {
                discovery,
                points_used,
                ..
            } => json!({ "discovery": discovery, "pointsUsed": points_used }),
            ActionKind::Performance {
                title,
                audience,
                inspiration_used,
                ..
            } => json!({
                "title": title,
                "audience": audience,
                "inspirationUsed": inspiration_used,
            }),
            ActionKind::Move { from, to } => json!({ "from": from, "to": to }),
        }
    }
}

/// Plan this tick's role actions for `agent_id`. Unknown agents plan
/// nothing.
pub fn plan_actions(
    store: &CityStore,
    agent_id: AgentId,
    policy: &RolePolicy,
    rng: &mut impl Rng,
) -> Vec<CityAction> {
    let Some(agent) = store.agent(agent_id) else {
        return Vec::new();
    };
    match agent.personality_type.role() {
        Role::Farmer => farming(store, agent, policy),
        Role::Trader => trading(store, agent, policy, rng),
        Role::Researcher => research(store, agent, policy, rng),
        Role::Performer => performing(store, agent, policy, rng),
        Role::Wanderer => wandering(store, agent, policy, rng),
    }
}

fn farming(store: &CityStore, agent: &Agent, policy: &RolePolicy) -> Vec<CityAction> {
    let mut actions = Vec::new();
    for farm in store.owned_by(agent.id) {
        if farm.building_type != BuildingType::Farm {
            continue;
        }
        let crops = farm.resource("quantum-crops");
        if crops > 0 {
            actions.push(CityAction {
                agent_id: agent.id,
                kind: ActionKind::Harvest {
                    farm: farm.id,
                    amount: crops.min(policy.harvest_max),
                },
                description: format!("{} harvested quantum crops from {}", agent.name, farm.name),
            });
        }
        if farm.resource("nutrients") > policy.plant_nutrients_above {
            actions.push(CityAction {
                agent_id: agent.id,
                kind: ActionKind::Plant {
                    farm: farm.id,
                    nutrients_used: policy.plant_nutrient_cost,
                    crops_added: policy.plant_crop_yield,
                },
                description: format!("{} planted new quantum crops in {}", agent.name, farm.name),
            });
        }
    }
    actions
}

fn trading(
    store: &CityStore,
    agent: &Agent,
    policy: &RolePolicy,
    rng: &mut impl Rng,
) -> Vec<CityAction> {
    store
        .active_agents()
        .into_iter()
        .filter(|other| other.id != agent.id)
        .take(policy.trade_partners)
        .filter(|other| {
            agent.relationship_with(other.id) > policy.trade_relationship_above
                && chance(rng, policy.trade_chance)
        })
        .map(|other| CityAction {
            agent_id: agent.id,
            kind: ActionKind::Trade { partner: other.id },
            description: format!("{} proposed trade with {}", agent.name, other.name),
        })
        .collect()
}

fn research(
    store: &CityStore,
    agent: &Agent,
    policy: &RolePolicy,
    rng: &mut impl Rng,
) -> Vec<CityAction> {
    let mut actions = Vec::new();
    for lab in store.owned_by(agent.id) {
        if lab.building_type != BuildingType::Research
            || lab.resource("research-points") <= policy.research_points_above
        {
            continue;
        }
        let discovery = DISCOVERIES.choose(rng).copied().unwrap_or("emergent behavior model");
        actions.push(CityAction {
            agent_id: agent.id,
            kind: ActionKind::Research {
                lab: lab.id,
                discovery,
                points_used: policy.research_cost,
            },
            description: format!("{} made a research breakthrough in {}", agent.name, lab.name),
        });
    }
    actions
}

fn performing(
    store: &CityStore,
    agent: &Agent,
    policy: &RolePolicy,
    rng: &mut impl Rng,
) -> Vec<CityAction> {
    let mut actions = Vec::new();
    for theater in store.owned_by(agent.id) {
        if theater.building_type != BuildingType::Theater
            || theater.resource("inspiration") <= policy.performance_inspiration_above
            || !chance(rng, policy.performance_chance)
        {
            continue;
        }
        let title = PERFORMANCES.choose(rng).copied().unwrap_or("Quantum Dreams");
        let audience = store
            .active_agents()
            .into_iter()
            .filter(|a| {
                a.id != agent.id && a.position.chebyshev(theater.position) < policy.audience_radius
            })
            .count();
        actions.push(CityAction {
            agent_id: agent.id,
            kind: ActionKind::Performance {
                theater: theater.id,
                title,
                audience,
                inspiration_used: policy.performance_cost,
            },
            description: format!(
                "{} performed for {audience} agents at {}",
                agent.name, theater.name
            ),
        });
    }
    actions
}

fn wandering(
    store: &CityStore,
    agent: &Agent,
    policy: &RolePolicy,
    rng: &mut impl Rng,
) -> Vec<CityAction> {
    if !chance(rng, policy.move_chance) {
        return Vec::new();
    }
    let from = agent.position;
    let to = store.grid().clamp(Position::new(
        from.x.saturating_add(rng.random_range(-1..=1)),
        from.y.saturating_add(rng.random_range(-1..=1)),
    ));
    vec![CityAction {
        agent_id: agent.id,
        kind: ActionKind::Move { from, to },
        description: format!("{} moved to new location", agent.name),
    }]
}
