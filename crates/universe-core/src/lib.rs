//! Tick cycle, behavior policy, and loop control for the YOU-N-I-VERSE
//! agent city.
//!
//! Each tick walks the active agents in creation order: needs are
//! assessed, scientists and Reflectors may propose dashboard modules,
//! everyone else works or spends the tick on leisure, and each role plans
//! and executes its actions. Metrics are recomputed at the end.
//!
//! # Modules
//!
//! - [`actions`] -- Applies planned actions to the store and logs them.
//! - [`behavior`] -- Role-based action planning.
//! - [`config`] -- Configuration loading from `universe-config.yaml`.
//! - [`construction`] -- Module proposals and building placement.
//! - [`control`] -- Start/stop and single-flight state of the loop.
//! - [`daily`] -- Personality-driven leisure activities.
//! - [`jobs`] -- Job matching and salaries.
//! - [`metrics`] -- City-wide aggregates.
//! - [`needs`] -- Needs assessment.
//! - [`policy`] -- Tunable thresholds, chances, and quotas.
//! - [`runner`] -- The timed simulation loop.
//! - [`tick`] -- One pass over every active agent.

pub mod actions;
pub mod behavior;
pub mod config;
pub mod construction;
pub mod control;
pub mod daily;
pub mod jobs;
pub mod metrics;
pub mod needs;
pub mod policy;
pub mod runner;
pub mod tick;

pub use config::{CityConfig, ConfigError};
pub use control::{ControlStatus, SimulationControl};
pub use policy::BehaviorPolicy;
pub use runner::{NoOpCallback, SimulationEndReason, SimulationResult, TickCallback, run_simulation};
pub use tick::{TickError, TickSummary, run_tick};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
pub(crate) mod testing {
    use chrono::Utc;
    use universe_city::{CityLimits, CityStore, NewAgent};
    use universe_types::{Agent, AgentId, GridSize, PersonalityType};

    use crate::policy::BuildPolicy;

    pub fn store() -> CityStore {
        CityStore::new(GridSize::default(), CityLimits::default(), Utc::now())
    }

    /// A detached agent with neutral traits.
    pub fn agent() -> Agent {
        store()
            .insert_agent(NewAgent::of_type("Sage-1", PersonalityType::Generator), Utc::now())
            .unwrap()
    }

    pub fn add_agent(
        city: &mut CityStore,
        personality_type: PersonalityType,
        is_scientist: bool,
    ) -> AgentId {
        let name = format!("{personality_type}-{}", city.agent_count() + 1);
        let mut new = NewAgent::of_type(name, personality_type);
        new.is_scientist = is_scientist;
        city.insert_agent(new, Utc::now()).unwrap().id
    }

    /// A build policy whose proposal draws always succeed.
    pub fn always_build() -> BuildPolicy {
        BuildPolicy {
            scientist_chance: 1.0,
            commanded_chance: 1.0,
            reflector_chance: 1.0,
            reflector_lonely_chance: 1.0,
            ..BuildPolicy::default()
        }
    }
}
