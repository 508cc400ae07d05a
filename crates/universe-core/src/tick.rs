//! The tick: one pass of the simulation over every active agent.
//!
//! For each active agent, in creation order:
//!
//! 1. **Needs** -- classify what the agent lacks.
//! 2. **Proposal** -- scientists and Reflectors may build a module.
//! 3. **Work or leisure** -- otherwise the agent looks for a job or spends
//!    the tick on a daily activity.
//! 4. **Role actions** -- the agent's role plans actions, which are applied
//!    and logged.
//! 5. **Reflection** -- each accomplishment logged this tick raises the
//!    agent's consciousness.
//!
//! Then radioactive field friends decay and the city metrics are
//! recomputed.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};
use universe_city::wellbeing::boost_consciousness;
use universe_city::{CityError, CityStore};
use universe_types::{Activity, AgentId, Building, CityMetrics, NeedsCategory};

use crate::construction::{self, BuildOutcome};
use crate::jobs::{self, Hire};
use crate::policy::{BehaviorPolicy, chance};
use crate::{actions, behavior, daily, metrics, needs};

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A store operation failed for an agent.
    #[error("store error for agent {agent_id}: {source}")]
    Agent {
        /// The agent being processed.
        agent_id: AgentId,
        /// The underlying store error.
        source: CityError,
    },
}

/// Summary of a single tick.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick number.
    pub tick: u64,
    /// Active agents processed.
    pub agents_processed: usize,
    /// Activities logged, in order.
    pub activities: Vec<Activity>,
    /// Buildings agents built.
    pub buildings_created: Vec<Building>,
    /// Job placements.
    pub hires: Vec<Hire>,
    /// Radioactive field friends that decayed.
    pub decayed_friends: usize,
    /// Metrics after the tick.
    pub metrics: CityMetrics,
}

/// Per-agent results of the tick.
#[derive(Debug, Default)]
struct AgentTurn {
    activities: Vec<Activity>,
    building: Option<Building>,
    hire: Option<Hire>,
}

/// Execute one complete tick.
pub fn run_tick(
    store: &mut CityStore,
    policy: &BehaviorPolicy,
    rng: &mut impl Rng,
    tick: u64,
    now: DateTime<Utc>,
) -> Result<TickSummary, TickError> {
    let agent_ids = store.active_agent_ids();
    debug!(tick, agents = agent_ids.len(), "tick started");

    let mut activities = Vec::new();
    let mut buildings_created = Vec::new();
    let mut hires = Vec::new();

    for agent_id in &agent_ids {
        let turn = agent_turn(store, *agent_id, policy, rng, now).map_err(|source| {
            TickError::Agent {
                agent_id: *agent_id,
                source,
            }
        })?;
        activities.extend(turn.activities);
        buildings_created.extend(turn.building);
        hires.extend(turn.hire);
    }

    let decayed_friends = store.shells_mut().decay_radioactive(now);
    let metrics = metrics::compute(store, &policy.metrics, now);
    store.set_metrics(metrics.clone());

    info!(
        tick,
        agents = agent_ids.len(),
        activities = activities.len(),
        built = buildings_created.len(),
        hired = hires.len(),
        decayed = decayed_friends,
        "tick complete"
    );

    Ok(TickSummary {
        tick,
        agents_processed: agent_ids.len(),
        activities,
        buildings_created,
        hires,
        decayed_friends,
        metrics,
    })
}

fn agent_turn(
    store: &mut CityStore,
    agent_id: AgentId,
    policy: &BehaviorPolicy,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Result<AgentTurn, CityError> {
    let mut turn = AgentTurn::default();

    // --- Needs and proposal ---
    let agent = store
        .agent(agent_id)
        .ok_or(CityError::AgentNotFound(agent_id))?;
    let needs = needs::assess(agent, &policy.needs);
    let proposal = construction::propose(store, agent, needs, &policy.build, rng, now);

    // --- Work or leisure ---
    if let Some(kind) = proposal {
        if let BuildOutcome::Built(building) =
            construction::build(store, agent_id, kind, &policy.build, rng, now)?
        {
            turn.building = Some(building);
        }
    } else {
        let seek = if needs == NeedsCategory::General {
            policy.jobs.seek_chance
        } else {
            policy.jobs.needy_seek_chance
        };
        if chance(rng, seek) {
            turn.hire = jobs::assign_job(store, agent_id, &policy.jobs)?;
        } else {
            daily::perform_daily(store, agent_id, needs, &policy.daily, rng, now)?;
        }
    }

    // --- Role actions ---
    let planned = behavior::plan_actions(store, agent_id, &policy.roles, rng);
    for action in &planned {
        turn.activities
            .push(actions::execute(store, action, &policy.roles, now)?);
    }

    // --- Reflection ---
    let accomplishments = turn
        .activities
        .iter()
        .filter(|a| a.activity_type.is_accomplishment())
        .count();
    if accomplishments > 0 {
        let agent = store.agent_mut(agent_id)?;
        #[allow(clippy::cast_precision_loss)]
        let count = accomplishments as f64;
        boost_consciousness(agent, policy.reflection_boost * count);
    }

    Ok(turn)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use universe_city::seed_city;
    use universe_types::{ActivityType, PersonalityType};

    use super::*;
    use crate::testing::{add_agent, always_build, store};

    #[test]
    fn tick_recomputes_metrics() {
        let mut city = store();
        seed_city(&mut city, Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(41);
        let summary = run_tick(&mut city, &BehaviorPolicy::default(), &mut rng, 1, Utc::now())
            .unwrap();
        assert_eq!(summary.tick, 1);
        assert_eq!(summary.agents_processed, 4);
        assert_eq!(summary.metrics.population, 4);
        assert_eq!(city.metrics().buildings_count, city.building_count());
        assert_eq!(city.metrics(), &summary.metrics);
    }

    #[test]
    fn farmer_reflects_on_harvest() {
        let mut city = store();
        let founders = seed_city(&mut city, Utc::now()).unwrap();
        let mut policy = BehaviorPolicy::default();
        policy.jobs.seek_chance = 1.0;
        let before = city.agent(founders.alex).unwrap().consciousness;
        let mut rng = StdRng::seed_from_u64(42);
        let summary = run_tick(&mut city, &policy, &mut rng, 1, Utc::now()).unwrap();

        let harvested = summary
            .activities
            .iter()
            .any(|a| a.agent_id == founders.alex && a.activity_type == ActivityType::Harvest);
        assert!(harvested);
        let after = city.agent(founders.alex).unwrap().consciousness;
        assert!(after > before);
    }

    #[test]
    fn inactive_agents_are_skipped() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Reflector, false);
        city.agent_mut(id).unwrap().is_active = false;
        let mut rng = StdRng::seed_from_u64(43);
        let summary = run_tick(&mut city, &BehaviorPolicy::default(), &mut rng, 1, Utc::now())
            .unwrap();
        assert_eq!(summary.agents_processed, 0);
        assert!(summary.activities.is_empty());
        assert!(city.agent(id).unwrap().memory_stream.is_empty());
    }

    #[test]
    fn eager_scientist_builds_in_tick() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Projector, true);
        let policy = BehaviorPolicy {
            build: always_build(),
            ..BehaviorPolicy::default()
        };
        let mut rng = StdRng::seed_from_u64(44);
        let summary = run_tick(&mut city, &policy, &mut rng, 1, Utc::now()).unwrap();
        assert_eq!(summary.buildings_created.len(), 1);
        assert_eq!(city.owned_by(id).len(), 1);
        assert_eq!(summary.metrics.buildings_count, 1);
    }
}
