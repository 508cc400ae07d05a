//! City-wide aggregate metrics.

use chrono::{DateTime, Utc};
use universe_city::CityStore;
use universe_types::{CityMetrics, Role};

use crate::policy::MetricWeights;

/// Recompute the aggregates from the active agents and all buildings.
///
/// Economic activity counts agents whose activity text contains the
/// lowercase words `trade` or `harvest`, matched literally.
#[allow(clippy::cast_precision_loss)] // head counts stay far below 2^52
pub fn compute(store: &CityStore, weights: &MetricWeights, now: DateTime<Utc>) -> CityMetrics {
    let agents = store.active_agents();
    let total_consciousness: f64 = agents.iter().map(|a| a.consciousness).sum();
    let total_social_bond: f64 = agents.iter().map(|a| a.social_bond).sum();
    let economic = agents
        .iter()
        .filter(|a| a.current_activity.contains("trade") || a.current_activity.contains("harvest"))
        .count();
    let researchers = agents
        .iter()
        .filter(|a| a.personality_type.role() == Role::Researcher)
        .count();
    let cultural_harmony = if agents.is_empty() {
        0.0
    } else {
        total_social_bond / agents.len() as f64 * weights.harmony
    };

    CityMetrics {
        collective_intelligence: total_consciousness * weights.intelligence,
        economic_activity: economic as f64 * weights.economic,
        research_progress: researchers as f64 * weights.research,
        cultural_harmony,
        population: agents.len(),
        buildings_count: store.building_count(),
        timestamp: now,
    }
}
