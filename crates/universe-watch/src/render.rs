//! One-line summaries of push messages.

use universe_types::CityEvent;

/// Render `event` as a single log line.
pub fn describe(event: &CityEvent) -> String {
    match event {
        CityEvent::Connection { message } => format!("connection: {message}"),
        CityEvent::AgentCreated(agent)
        | CityEvent::AgentUpdated(agent)
        | CityEvent::AgentSpawned(agent) => format!(
            "{}: {} ({}) at ({}, {}) doing {}",
            event.kind(),
            agent.name,
            agent.personality_type,
            agent.position.x,
            agent.position.y,
            agent.current_activity,
        ),
        CityEvent::BuildingCreated(building) => format!(
            "building_created: {} [{}] at ({}, {})",
            building.name, building.building_type, building.position.x, building.position.y,
        ),
        CityEvent::CityUpdate(update) => format!(
            "city_update: population {} buildings {} intelligence {:.2} harmony {:.2}, {} recent activities",
            update.metrics.population,
            update.metrics.buildings_count,
            update.metrics.collective_intelligence,
            update.metrics.cultural_harmony,
            update.activities.len(),
        ),
        CityEvent::SynthiaCommand(synthia) => format!(
            "synthia_command: {} ({})",
            synthia.current_command.as_deref().unwrap_or("-"),
            synthia.mood,
        ),
        CityEvent::ConsciousnessUpdate { agent_id, friend } => format!(
            "consciousness_update: {agent_id} bonded {} in orbital {}",
            friend.name, friend.orbital_position,
        ),
        CityEvent::ConsciousnessActivity {
            agent_id,
            activity_type,
            result,
        } => format!(
            "consciousness_activity: {agent_id} played {activity_type}: {} (coherence {})",
            if result.success { "success" } else { "failed" },
            result.coherence_level,
        ),
    }
}
