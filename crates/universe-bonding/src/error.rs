//! Error types for the `universe-bonding` crate.

use universe_types::{AgentId, Orbital, ShellType};

/// Errors that can occur while bonding field friends or playing activities.
#[derive(Debug, thiserror::Error)]
pub enum BondingError {
    /// The agent has no consciousness shell.
    #[error("consciousness shell not found for agent {0}")]
    ShellNotFound(AgentId),

    /// Every slot of the shell is taken.
    #[error("{shell_type} shell is full ({max_friends} friends)")]
    ShellFull {
        /// The full shell's category.
        shell_type: ShellType,
        /// Its capacity.
        max_friends: u32,
    },

    /// The requested orbital bucket is at capacity.
    #[error("{orbital}-orbital is full ({capacity} friends)")]
    OrbitalFull {
        /// The full bucket.
        orbital: Orbital,
        /// Its capacity.
        capacity: u32,
    },
}
