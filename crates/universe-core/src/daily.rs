//! Daily activities.
//!
//! When an agent neither builds nor looks for work it goes about its day:
//! one activity drawn from its type's list, plus whatever the surrounding
//! buildings add to its happiness and resources.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use universe_city::wellbeing::{
    boost_consciousness, boost_happiness, boost_resources, boost_social_bond,
};
use universe_city::{CityError, CityStore};
use universe_types::{Agent, AgentId, BuildingType, ModuleKind, NeedsCategory, PersonalityType};

use crate::needs;
use crate::policy::DailyPolicy;

/// Activities specific to a personality type.
pub const fn type_activities(kind: PersonalityType) -> &'static [&'static str] {
    match kind {
        PersonalityType::Generator => &[
            "Waiting for opportunity to respond to",
            "Generating sustainable energy for the city",
            "Working on hydroponic farm projects",
            "Collaborating on trade optimization",
            "Responding to market demands",
        ],
        PersonalityType::ManifestingGenerator => &[
            "Multi-tasking between farming and trading",
            "Responding to opportunities then informing others",
            "Innovating new cultivation techniques",
            "Managing multiple resource streams",
            "Coordinating with other agents",
        ],
        PersonalityType::Projector => &[
            "Waiting for invitation to share insights",
            "Studying consciousness patterns",
            "Analyzing city data quietly",
            "Observing agent interactions",
            "Preparing research proposals",
        ],
        PersonalityType::Manifestor => &[
            "Initiating new city projects",
            "Informing agents about performance plans",
            "Creating artistic expressions",
            "Leading community initiatives",
            "Directing energy toward goals",
        ],
        PersonalityType::Reflector => &[
            "Sampling the city's auric field",
            "Waiting 28 days cycle for clarity",
            "Reflecting collective consciousness",
            "Documenting community patterns",
            "Connecting agents through stories",
        ],
    }
}

/// Every activity open to `agent` given its current need.
pub fn daily_activities(agent: &Agent, needs: NeedsCategory) -> Vec<String> {
    let mut activities = vec![
        format!("Reflecting on {} strategy", agent.strategy),
        format!("Maintaining {} auric field", agent.glyph.trait_name),
        format!("Connecting with {} elemental energy", agent.element),
    ];
    activities.extend(type_activities(agent.personality_type).iter().map(|a| String::from(*a)));
    activities.extend(needs::activities_for(needs).iter().map(|a| String::from(*a)));
    activities
}

/// Happiness and resource boosts from buildings near `agent`.
fn nearby_boosts(store: &CityStore, agent: &Agent, policy: &DailyPolicy) -> (f64, f64) {
    let mut happiness = 0.0;
    let mut resources = 0.0;
    for building in store.buildings() {
        if building.position.manhattan(agent.position) > policy.nearby_radius {
            continue;
        }
        if building.building_type == BuildingType::Social
            || building.module_kind() == Some(ModuleKind::FieldBookNetwork)
        {
            happiness += policy.social_nearby_happiness;
        }
        match building.building_type {
            BuildingType::Farm => resources += policy.farm_nearby_resources,
            BuildingType::Theater => happiness += policy.theater_nearby_happiness,
            BuildingType::Trading => resources += policy.trading_nearby_resources,
            _ => {}
        }
    }
    (happiness, resources)
}

/// Pick and perform a daily activity, returning its text.
pub fn perform_daily(
    store: &mut CityStore,
    agent_id: AgentId,
    needs: NeedsCategory,
    policy: &DailyPolicy,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Result<String, CityError> {
    let agent = store
        .agent(agent_id)
        .ok_or(CityError::AgentNotFound(agent_id))?;
    let activities = daily_activities(agent, needs);
    let activity = activities
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| format!("Reflecting on {} strategy", agent.strategy));

    let happiness = if activity.contains("social") {
        policy.social_happiness
    } else {
        policy.happiness
    };
    let resources = if activity.contains("gathering") || activity.contains("trading") {
        policy.gathering_resources
    } else {
        0.0
    };
    let (near_happiness, near_resources) = nearby_boosts(store, agent, policy);
    let feeling = if agent.consciousness > policy.fulfilled_above {
        "fulfilled"
    } else {
        "steady"
    };
    let memory = format!("{activity} - feeling {feeling}");

    let agent = store.agent_mut(agent_id)?;
    agent.current_activity.clone_from(&activity);
    boost_consciousness(agent, policy.consciousness_boost);
    boost_social_bond(agent, policy.social_boost);
    boost_happiness(agent, happiness + near_happiness);
    boost_resources(agent, resources + near_resources);
    store.remember(agent_id, memory, now)?;
    Ok(activity)
}
