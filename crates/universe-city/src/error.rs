//! Error types for the `universe-city` crate.

use universe_types::{AgentId, BuildingId, Position};

/// Errors returned by [`CityStore`](crate::CityStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CityError {
    /// No agent with this id.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// No building with this id.
    #[error("building not found: {0}")]
    BuildingNotFound(BuildingId),

    /// A new building names an owner that does not exist.
    #[error("owner agent not found: {0}")]
    OwnerNotFound(AgentId),

    /// The owner already holds as many buildings as it may.
    #[error("agent {owner} already owns its quota of {quota} buildings")]
    OwnershipQuota {
        /// The would-be owner.
        owner: AgentId,
        /// Buildings it may own.
        quota: usize,
    },

    /// A position lies outside the city grid.
    #[error("position ({}, {}) is outside the city grid", .0.x, .0.y)]
    OffGrid(Position),

    /// A field value was rejected.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}
