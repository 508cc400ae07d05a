//! Messages pushed to dashboard subscribers.
//!
//! Every message is a JSON object `{"type": ..., "data": ...}`. The channel
//! is publish-only: subscribers never send commands back.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::AgentId;
use crate::shell::{FieldFriend, ShellActivityOutcome};
use crate::structs::{Activity, Agent, Building, CityMetrics, SynthiaState};

/// Greeting sent when a subscriber connects.
pub const CONNECTION_GREETING: &str = "Connected to YOU-N-I-VERSE Agent City";

/// Snapshot pushed after every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CityUpdate {
    /// Active agents.
    pub agents: Vec<Agent>,
    /// Most recent activities, newest first.
    pub activities: Vec<Activity>,
    /// Latest metrics.
    pub metrics: CityMetrics,
    /// Synthia's state.
    pub synthia: SynthiaState,
}

/// A message on the push channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CityEvent {
    /// Greeting on connect.
    Connection {
        /// Greeting text.
        message: String,
    },
    /// An agent was created through the API.
    AgentCreated(Box<Agent>),
    /// An agent was updated through the API.
    AgentUpdated(Box<Agent>),
    /// A random agent was spawned.
    AgentSpawned(Box<Agent>),
    /// A building was placed, by an agent or through the API.
    BuildingCreated(Box<Building>),
    /// Post-tick snapshot.
    CityUpdate(Box<CityUpdate>),
    /// Synthia received a command.
    SynthiaCommand(Box<SynthiaState>),
    /// A field friend bonded.
    #[serde(rename_all = "camelCase")]
    ConsciousnessUpdate {
        /// The shell's agent.
        agent_id: AgentId,
        /// The new friend.
        friend: Box<FieldFriend>,
    },
    /// A consciousness minigame was played.
    #[serde(rename_all = "camelCase")]
    ConsciousnessActivity {
        /// The shell's agent.
        agent_id: AgentId,
        /// Activity name.
        activity_type: String,
        /// Its outcome.
        result: ShellActivityOutcome,
    },
}

impl CityEvent {
    /// The greeting sent to a new subscriber.
    pub fn greeting() -> Self {
        Self::Connection {
            message: String::from(CONNECTION_GREETING),
        }
    }

    /// The `type` tag of the message.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "connection",
            Self::AgentCreated(_) => "agent_created",
            Self::AgentUpdated(_) => "agent_updated",
            Self::AgentSpawned(_) => "agent_spawned",
            Self::BuildingCreated(_) => "building_created",
            Self::CityUpdate(_) => "city_update",
            Self::SynthiaCommand(_) => "synthia_command",
            Self::ConsciousnessUpdate { .. } => "consciousness_update",
            Self::ConsciousnessActivity { .. } => "consciousness_activity",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn greeting_wire_shape() {
        let json = serde_json::to_value(CityEvent::greeting()).unwrap();
        assert_eq!(json["type"], "connection");
        assert_eq!(json["data"]["message"], CONNECTION_GREETING);
    }

    #[test]
    fn kind_matches_serialized_tag() {
        let event = CityEvent::ConsciousnessActivity {
            agent_id: AgentId::new(),
            activity_type: String::from("meditation"),
            result: ShellActivityOutcome {
                success: true,
                coherence_gained: 7,
                message: String::from("ok"),
                coherence_level: 7,
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.kind());
        assert_eq!(json["data"]["activityType"], "meditation");
        assert!(json["data"]["agentId"].is_string());
        assert_eq!(json["data"]["result"]["coherenceGained"], 7);
    }
}
