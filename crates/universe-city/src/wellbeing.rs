//! Trait clamping and memory stream upkeep.
//!
//! Every mutation of an agent's traits goes through these helpers so the
//! ranges hold no matter which code path wrote them.

use universe_types::{Agent, MemoryEntry};

/// Upper bound of `consciousness` and `social_bond`.
pub const UNIT_MAX: f64 = 1.0;

/// Upper bound of `happiness` and `resources`.
pub const PERCENT_MAX: f64 = 100.0;

/// Clamp to 0.0..=1.0. NaN becomes 0.0.
pub const fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, UNIT_MAX) }
}

/// Clamp to 0.0..=100.0. NaN becomes 0.0.
pub const fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, PERCENT_MAX) }
}

/// Add `delta` to the agent's consciousness, clamped.
pub const fn boost_consciousness(agent: &mut Agent, delta: f64) {
    agent.consciousness = clamp_unit(agent.consciousness + delta);
}

/// Add `delta` to the agent's social bond, clamped.
pub const fn boost_social_bond(agent: &mut Agent, delta: f64) {
    agent.social_bond = clamp_unit(agent.social_bond + delta);
}

/// Add `delta` to the agent's happiness, clamped.
pub const fn boost_happiness(agent: &mut Agent, delta: f64) {
    agent.happiness = clamp_percent(agent.happiness + delta);
}

/// Add `delta` to the agent's resources, clamped.
pub const fn boost_resources(agent: &mut Agent, delta: f64) {
    agent.resources = clamp_percent(agent.resources + delta);
}

/// Re-clamp all four traits.
pub const fn clamp_traits(agent: &mut Agent) {
    agent.consciousness = clamp_unit(agent.consciousness);
    agent.social_bond = clamp_unit(agent.social_bond);
    agent.happiness = clamp_percent(agent.happiness);
    agent.resources = clamp_percent(agent.resources);
}

/// Append `entry` to the memory stream, dropping the oldest entries beyond
/// `capacity`.
pub fn remember(agent: &mut Agent, entry: MemoryEntry, capacity: usize) {
    agent.memory_stream.push(entry);
    trim_memory(agent, capacity);
}

/// Drop the oldest memories beyond `capacity`.
pub fn trim_memory(agent: &mut Agent, capacity: usize) {
    let excess = agent.memory_stream.len().saturating_sub(capacity);
    if excess > 0 {
        agent.memory_stream.drain(..excess);
    }
}
