//! Job placement.
//!
//! A building hires when it has no owner or advertises `job_openings`. The
//! first hiring building that matches the agent's category takes them on,
//! raising its `employees` and `productivity` resources.

use tracing::info;
use universe_city::wellbeing::{boost_consciousness, boost_social_bond};
use universe_city::{CityError, CityStore};
use universe_types::{Agent, AgentId, Building, BuildingId, BuildingType, ModuleKind, PersonalityType};

use crate::policy::JobPolicy;

/// A completed placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hire {
    /// The new employee.
    pub agent_id: AgentId,
    /// The employer.
    pub building_id: BuildingId,
    /// Job title.
    pub title: &'static str,
    /// Productivity added to the building.
    pub salary: i64,
}

/// Whether `building` wants workers like `agent`.
pub fn is_match(agent: &Agent, building: &Building) -> bool {
    let kind = agent.personality_type;
    match building.module_kind() {
        Some(ModuleKind::ScienceLab) if agent.is_scientist => return true,
        Some(ModuleKind::MusicPlayer) if kind == PersonalityType::Manifestor => return true,
        Some(ModuleKind::AnalyticsDashboard) if kind == PersonalityType::Projector => return true,
        Some(ModuleKind::FieldBookNetwork) if kind == PersonalityType::Reflector => return true,
        _ => {}
    }
    match building.building_type {
        BuildingType::Farm => matches!(
            kind,
            PersonalityType::Generator | PersonalityType::ManifestingGenerator
        ),
        BuildingType::Market => kind == PersonalityType::ManifestingGenerator,
        _ => false,
    }
}

/// Title of a job at `building`.
pub const fn job_title(building: &Building) -> &'static str {
    match building.module_kind() {
        Some(ModuleKind::ScienceLab) => "Research Scientist",
        Some(ModuleKind::MusicPlayer) => "Audio Engineer",
        Some(ModuleKind::AnalyticsDashboard) => "Data Analyst",
        Some(ModuleKind::FieldBookNetwork) => "Community Manager",
        None => match building.building_type {
            BuildingType::Farm => "Agricultural Specialist",
            BuildingType::Market => "Trade Coordinator",
            _ => "General Worker",
        },
    }
}

/// Productivity an agent brings: the base salary plus bonuses for
/// consciousness and social bond, rounded down.
#[allow(clippy::cast_possible_truncation)]
pub fn salary(agent: &Agent, policy: &JobPolicy) -> i64 {
    let raw = policy.social_salary.mul_add(
        agent.social_bond,
        policy
            .consciousness_salary
            .mul_add(agent.consciousness, policy.base_salary),
    );
    raw.floor() as i64
}

/// First hiring building suited to `agent`, in creation order.
pub fn suitable_job<'a>(store: &'a CityStore, agent: &Agent) -> Option<&'a Building> {
    store
        .buildings()
        .into_iter()
        .find(|b| b.is_hiring() && is_match(agent, b))
}

/// Place `agent_id` in a suitable job, if any building will have them.
pub fn assign_job(
    store: &mut CityStore,
    agent_id: AgentId,
    policy: &JobPolicy,
) -> Result<Option<Hire>, CityError> {
    let agent = store
        .agent(agent_id)
        .ok_or(CityError::AgentNotFound(agent_id))?;
    let Some(building) = suitable_job(store, agent) else {
        return Ok(None);
    };
    let hire = Hire {
        agent_id,
        building_id: building.id,
        title: job_title(building),
        salary: salary(agent, policy),
    };
    let building_name = building.name.clone();

    let agent = store.agent_mut(agent_id)?;
    agent.current_activity = format!("Working as {} at {building_name}", hire.title);
    boost_consciousness(agent, policy.consciousness_boost);
    boost_social_bond(agent, policy.social_boost);
    let agent_name = agent.name.clone();

    let building = store.building_mut(hire.building_id)?;
    building.adjust_resource("employees", 1);
    building.adjust_resource("productivity", hire.salary);

    info!(
        agent = %agent_name,
        title = hire.title,
        building = %building_name,
        "agent hired"
    );
    Ok(Some(hire))
}
