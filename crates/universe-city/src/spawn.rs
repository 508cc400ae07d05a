//! Random agent generation.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use universe_types::{Glyph, GridSize, MemoryEntry, PersonalityType, Position};

use crate::store::NewAgent;

/// Name stems of spawned agents.
pub const NAME_STEMS: [&str; 10] = [
    "Zeta", "Nova", "Flux", "Echo", "Vex", "Kai", "Nyx", "Orb", "Sage", "Ember",
];

/// Share of spawned agents that are scientists.
pub const SCIENTIST_CHANCE: f64 = 0.15;

/// Draw a personality type: Reflector 1%, Manifesting Generator 33%,
/// Generator 37%, Projector 20%, Manifestor 9%.
pub fn roll_personality(rng: &mut impl Rng) -> PersonalityType {
    let roll: f64 = rng.random_range(0.0..100.0);
    if roll < 1.0 {
        PersonalityType::Reflector
    } else if roll < 34.0 {
        PersonalityType::ManifestingGenerator
    } else if roll < 71.0 {
        PersonalityType::Generator
    } else if roll < 91.0 {
        PersonalityType::Projector
    } else {
        PersonalityType::Manifestor
    }
}

/// A random agent ready for [`CityStore::insert_agent`].
///
/// Consciousness and social bond fall in 0.3..0.7; the position is a
/// uniform cell of `grid`.
///
/// [`CityStore::insert_agent`]: crate::CityStore::insert_agent
pub fn random_agent(rng: &mut impl Rng, grid: GridSize, now: DateTime<Utc>) -> NewAgent {
    let personality = roll_personality(rng);
    let is_scientist = rng.random_bool(SCIENTIST_CHANCE);
    let stem = NAME_STEMS.choose(rng).copied().unwrap_or("Zeta");
    let name = format!("{stem}-{}", rng.random_range(0..99));

    let mut agent = NewAgent::of_type(name, personality);
    agent.is_scientist = is_scientist;
    agent.glyph = Glyph::auric_field(if is_scientist {
        "analytical"
    } else {
        personality.glyph_trait()
    });
    agent.consciousness = rng.random_range(0.3..0.7);
    agent.social_bond = rng.random_range(0.3..0.7);
    agent.position = Position::new(
        rng.random_range(0..grid.width.max(1)),
        rng.random_range(0..grid.height.max(1)),
    );
    agent.memory_stream.push(MemoryEntry::new(
        now,
        format!("Spawned as {personality} with {} element", agent.element),
    ));
    agent
}
