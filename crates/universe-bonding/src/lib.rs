//! Consciousness shells for the YOU-N-I-VERSE agent city.
//!
//! Every agent owns a shell modelled on an atom's electron configuration.
//! Field friends bond into orbital buckets (s, p, d, f), minigames build
//! coherence, and a full shell at its graduation threshold reaches the
//! noble gas state and unlocks teaching.
//!
//! # Modules
//!
//! - [`tables`] -- Shell categories, isotope traits, names, and frequencies.
//! - [`coherence`] -- Structural coherence and the graduation check.
//! - [`activity`] -- Minigame rules.
//! - [`registry`] -- [`ShellRegistry`], one shell per agent.
//! - [`error`] -- [`BondingError`].

pub mod activity;
pub mod coherence;
pub mod error;
pub mod registry;
pub mod tables;

pub use activity::ShellActivity;
pub use error::BondingError;
pub use registry::ShellRegistry;
pub use tables::{ShellConfig, shell_config, shell_type_for};
