//! Agent building proposals.
//!
//! Only two kinds of agent ever build. Scientists propose dashboard modules
//! for research buildings, steered by Synthia's most recent command.
//! Reflectors, after a quiet spell, propose field book networks.
//!
//! Every proposal is gated by the build cooldown, the agent's ownership
//! quota (also enforced by the store), and the citywide quotas of both the module and its host building
//! type.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::{info, warn};
use universe_city::catalog::{module_config, module_description, module_resources, module_title};
use universe_city::{CityError, CityStore, NewBuilding};
use universe_types::{
    Agent, AgentId, Building, ModuleKind, NeedsCategory, PersonalityType, Position, Size,
};

use crate::policy::{BuildPolicy, chance};

/// Marker text of a successful-build memory.
pub const BUILT_MARKER: &str = "Successfully built";

/// What came of a proposal.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// The building now exists.
    Built(Building),
    /// The store refused it; the agent will try again later.
    Failed(CityError),
}

impl BuildOutcome {
    /// The new building, when construction succeeded.
    pub const fn building(&self) -> Option<&Building> {
        match self {
            Self::Built(building) => Some(building),
            Self::Failed(_) => None,
        }
    }
}

/// Whether the cooldown since the agent's latest successful build has
/// passed.
pub fn cooled_down(agent: &Agent, cooldown: Duration, now: DateTime<Utc>) -> bool {
    agent
        .memory_stream
        .iter()
        .rev()
        .find(|m| m.event.contains(BUILT_MARKER))
        .is_none_or(|m| now.signed_duration_since(m.timestamp) > cooldown)
}

/// Whether another `kind` module fits under the citywide quotas.
pub fn module_has_room(store: &CityStore, kind: ModuleKind, policy: &BuildPolicy) -> bool {
    store.count_module(kind) < policy.quotas.for_module(kind)
        && store.count_type(kind.host_type()) < policy.quotas.for_type(kind.host_type())
}

/// Decide whether `agent` proposes a building this tick, and which module.
pub fn propose(
    store: &CityStore,
    agent: &Agent,
    needs: NeedsCategory,
    policy: &BuildPolicy,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Option<ModuleKind> {
    if !cooled_down(agent, Duration::seconds(policy.cooldown_secs), now) {
        return None;
    }
    if store.owned_by(agent.id).len() >= store.limits().ownership_quota(agent.is_scientist) {
        return None;
    }

    if agent.is_scientist {
        propose_module(store, policy, rng, now)
    } else if agent.personality_type == PersonalityType::Reflector {
        propose_field_book(store, agent, needs, policy, rng, now)
    } else {
        None
    }
}

fn propose_module(
    store: &CityStore,
    policy: &BuildPolicy,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Option<ModuleKind> {
    let synthia = store.synthia();
    let commanded =
        synthia.has_command_within(now, Duration::seconds(policy.command_window_secs));
    let probability = if commanded {
        policy.commanded_chance
    } else {
        policy.scientist_chance
    };
    if !chance(rng, probability) {
        return None;
    }

    let mut kind = ModuleKind::ScienceLab;
    if commanded && let Some(command) = synthia.current_command.as_deref() {
        let command = command.to_lowercase();
        let wants_music = ["music", "player", "entertainment"]
            .iter()
            .any(|w| command.contains(w));
        let wants_analytics = ["analytics", "visualization", "data viz"]
            .iter()
            .any(|w| command.contains(w));
        if wants_music {
            if module_has_room(store, ModuleKind::MusicPlayer, policy) {
                kind = ModuleKind::MusicPlayer;
            }
        } else if wants_analytics && module_has_room(store, ModuleKind::AnalyticsDashboard, policy)
        {
            kind = ModuleKind::AnalyticsDashboard;
        }
    }

    module_has_room(store, kind, policy).then_some(kind)
}

fn propose_field_book(
    store: &CityStore,
    agent: &Agent,
    needs: NeedsCategory,
    policy: &BuildPolicy,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Option<ModuleKind> {
    let quiet = Duration::seconds(policy.reflector_quiet_secs);
    let cutoff = now.checked_sub_signed(quiet).unwrap_or(now);
    let settled = agent.last_memory().is_none_or(|m| m.timestamp < cutoff);
    if !settled {
        return None;
    }
    let probability = if needs == NeedsCategory::SocialConnection {
        policy.reflector_lonely_chance
    } else {
        policy.reflector_chance
    };
    if !chance(rng, probability) {
        return None;
    }
    module_has_room(store, ModuleKind::FieldBookNetwork, policy)
        .then_some(ModuleKind::FieldBookNetwork)
}

/// Construct the proposed module at a random cell and record the outcome in
/// the agent's memory and activity.
///
/// A store refusal is not an error of the tick: the agent remembers the
/// failure and keeps planning.
pub fn build(
    store: &mut CityStore,
    agent_id: AgentId,
    kind: ModuleKind,
    policy: &BuildPolicy,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Result<BuildOutcome, CityError> {
    let (name, strategy) = store
        .agent(agent_id)
        .map(|a| (a.name.clone(), a.strategy.clone()))
        .ok_or(CityError::AgentNotFound(agent_id))?;
    let grid = store.grid();
    let title = module_title(kind);
    let position = Position::new(
        rng.random_range(0..grid.width.max(1)),
        rng.random_range(0..grid.height.max(1)),
    );

    let created = store.insert_building(
        NewBuilding {
            name: String::from(title),
            building_type: kind.host_type(),
            position,
            size: Size::square(policy.building_side),
            owner_id: Some(agent_id),
            resources: module_resources(kind),
            module_config: module_config(kind),
        },
        now,
    );

    match created {
        Ok(building) => {
            info!(
                agent = %name,
                module = %kind,
                building_id = %building.id,
                "agent built a module"
            );
            store.remember(
                agent_id,
                format!(
                    "{BUILT_MARKER} {title} using {strategy} strategy - Building ID: {}",
                    building.id
                ),
                now,
            )?;
            store.agent_mut(agent_id)?.current_activity =
                format!("Operating {title} - {}", module_description(kind));
            Ok(BuildOutcome::Built(building))
        }
        Err(err) => {
            warn!(agent = %name, module = %kind, error = %err, "build refused");
            store.remember(
                agent_id,
                format!("Failed to build {title} - will try again later"),
                now,
            )?;
            store.agent_mut(agent_id)?.current_activity = format!("Planning {title} proposal");
            Ok(BuildOutcome::Failed(err))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use universe_types::{BuildingType, MemoryEntry};

    use super::*;
    use crate::testing::{add_agent, always_build, store};

    #[test]
    fn scientist_builds_science_lab_by_default() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Projector, true);
        let policy = always_build();
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc::now();

        let agent = city.agent(id).unwrap().clone();
        let kind = propose(&city, &agent, NeedsCategory::General, &policy, &mut rng, now).unwrap();
        assert_eq!(kind, ModuleKind::ScienceLab);

        let outcome = build(&mut city, id, kind, &policy, &mut rng, now).unwrap();
        let building = outcome.building().unwrap();
        assert_eq!(building.building_type, BuildingType::Research);
        assert_eq!(building.size, Size::square(3));
        assert_eq!(building.owner_id, Some(id));

        let agent = city.agent(id).unwrap();
        assert!(agent.last_memory().unwrap().event.starts_with(BUILT_MARKER));
        assert!(agent.current_activity.starts_with("Operating Science Lab Dashboard"));
    }

    #[test]
    fn music_command_selects_music_player() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Generator, true);
        let now = Utc::now();
        city.command_synthia("universe", "Build an ENTERTAINMENT hub", now);
        let agent = city.agent(id).unwrap().clone();
        let mut rng = StdRng::seed_from_u64(2);
        let kind = propose(
            &city,
            &agent,
            NeedsCategory::General,
            &always_build(),
            &mut rng,
            now,
        );
        assert_eq!(kind, Some(ModuleKind::MusicPlayer));
    }

    #[test]
    fn analytics_falls_back_when_full() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Generator, true);
        let other = add_agent(&mut city, PersonalityType::Generator, true);
        let policy = always_build();
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(3);
        build(&mut city, other, ModuleKind::AnalyticsDashboard, &policy, &mut rng, now).unwrap();

        city.command_synthia("universe", "need data viz", now);
        let agent = city.agent(id).unwrap().clone();
        let kind = propose(&city, &agent, NeedsCategory::General, &policy, &mut rng, now);
        assert_eq!(kind, Some(ModuleKind::ScienceLab));
    }

    #[test]
    fn stale_command_is_ignored() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Generator, true);
        let now = Utc::now();
        city.command_synthia("universe", "music please", now - Duration::seconds(61));
        let agent = city.agent(id).unwrap().clone();
        let mut policy = always_build();
        policy.commanded_chance = 0.0;
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            propose(&city, &agent, NeedsCategory::General, &policy, &mut rng, now),
            Some(ModuleKind::ScienceLab)
        );
    }

    #[test]
    fn cooldown_blocks_recent_builders() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Generator, true);
        let now = Utc::now();
        city.remember(id, "Successfully built Quantum Music Player", now - Duration::seconds(299))
            .unwrap();
        let agent = city.agent(id).unwrap().clone();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(
            propose(&city, &agent, NeedsCategory::General, &always_build(), &mut rng, now)
                .is_none()
        );

        let mut later = agent;
        later.memory_stream = vec![MemoryEntry::new(
            now - Duration::seconds(301),
            "Successfully built Quantum Music Player",
        )];
        assert!(cooled_down(&later, Duration::seconds(300), now));
    }

    #[test]
    fn ownership_quota_is_enforced() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Reflector, false);
        let policy = always_build();
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(6);
        build(&mut city, id, ModuleKind::FieldBookNetwork, &policy, &mut rng, now).unwrap();

        let later = now + Duration::seconds(3600);
        let agent = city.agent(id).unwrap().clone();
        assert!(
            propose(&city, &agent, NeedsCategory::SocialConnection, &policy, &mut rng, later)
                .is_none()
        );
    }

    #[test]
    fn refused_build_is_remembered_and_replanned() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Reflector, false);
        let policy = always_build();
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(10);
        build(&mut city, id, ModuleKind::FieldBookNetwork, &policy, &mut rng, now).unwrap();

        let outcome =
            build(&mut city, id, ModuleKind::FieldBookNetwork, &policy, &mut rng, now).unwrap();
        assert!(matches!(
            outcome,
            BuildOutcome::Failed(CityError::OwnershipQuota { quota: 1, .. })
        ));
        assert!(outcome.building().is_none());

        let agent = city.agent(id).unwrap();
        assert_eq!(
            agent.last_memory().unwrap().event,
            "Failed to build Field Book Network - will try again later"
        );
        assert_eq!(agent.current_activity, "Planning Field Book Network proposal");
        assert_eq!(city.owned_by(id).len(), 1);
    }

    #[test]
    fn reflector_waits_for_quiet() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Reflector, false);
        let now = Utc::now();
        city.remember(id, "Sampling the city's auric field", now - Duration::seconds(10))
            .unwrap();
        let agent = city.agent(id).unwrap().clone();
        let policy = always_build();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(propose(&city, &agent, NeedsCategory::General, &policy, &mut rng, now).is_none());
        let later = now + Duration::seconds(30);
        assert_eq!(
            propose(&city, &agent, NeedsCategory::General, &policy, &mut rng, later),
            Some(ModuleKind::FieldBookNetwork)
        );
    }

    #[test]
    fn regular_agents_never_propose() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Manifestor, false);
        let agent = city.agent(id).unwrap().clone();
        let mut rng = StdRng::seed_from_u64(8);
        assert!(
            propose(&city, &agent, NeedsCategory::General, &always_build(), &mut rng, Utc::now())
                .is_none()
        );
    }

    #[test]
    fn host_type_quota_blocks_modules() {
        let mut city = store();
        let mut policy = always_build();
        policy.quotas.research = 1;
        let first = add_agent(&mut city, PersonalityType::Projector, true);
        let second = add_agent(&mut city, PersonalityType::Projector, true);
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(9);
        build(&mut city, first, ModuleKind::ScienceLab, &policy, &mut rng, now).unwrap();
        let agent = city.agent(second).unwrap().clone();
        assert!(propose(&city, &agent, NeedsCategory::General, &policy, &mut rng, now).is_none());
    }
}
