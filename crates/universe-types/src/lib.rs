//! Shared type definitions for the YOU-N-I-VERSE agent city.
//!
//! This crate is the single source of truth for every record the city
//! store holds and the JSON API serves. Types flow downstream to
//! `TypeScript` via `ts-rs` for the dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Closed enumerations (personality types, building kinds, orbitals)
//! - [`structs`] -- City records (agents, buildings, activities, metrics, Synthia)
//! - [`shell`] -- Consciousness shell and field friend records
//! - [`events`] -- Messages pushed to dashboard subscribers

pub mod enums;
pub mod events;
pub mod ids;
pub mod shell;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ActivityType, BuildingType, ChartLayer, Element, Isotope, ModuleKind, NeedsCategory, Orbital,
    PersonalityType, Role, ShellType,
};
pub use events::{CityEvent, CityUpdate, CONNECTION_GREETING};
pub use ids::{ActivityId, AgentId, BuildingId, FriendId, ShellId};
pub use shell::{ConsciousnessShell, FieldFriend, OrbitalFill, ShellActivityOutcome};
pub use structs::{
    Activity, Agent, Building, CityMetrics, DashboardModule, FarmSettings, Glyph, GridSize,
    MemoryEntry, ModuleConfig, Position, ResearchSettings, Size, SynthiaState, TheaterSettings,
    TradingSettings,
};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    //! `TypeScript` binding generation for the dashboard.

    #[test]
    fn export_bindings() {
        // The generated files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::AgentId::export_all();
        let _ = crate::ids::BuildingId::export_all();
        let _ = crate::ids::ActivityId::export_all();
        let _ = crate::ids::ShellId::export_all();
        let _ = crate::ids::FriendId::export_all();

        // Enums
        let _ = crate::enums::PersonalityType::export_all();
        let _ = crate::enums::Element::export_all();
        let _ = crate::enums::BuildingType::export_all();
        let _ = crate::enums::ModuleKind::export_all();
        let _ = crate::enums::ActivityType::export_all();
        let _ = crate::enums::ShellType::export_all();
        let _ = crate::enums::Orbital::export_all();
        let _ = crate::enums::Isotope::export_all();
        let _ = crate::enums::ChartLayer::export_all();

        // Structs
        let _ = crate::structs::Agent::export_all();
        let _ = crate::structs::Building::export_all();
        let _ = crate::structs::Activity::export_all();
        let _ = crate::structs::CityMetrics::export_all();
        let _ = crate::structs::SynthiaState::export_all();
        let _ = crate::structs::ModuleConfig::export_all();

        // Shells
        let _ = crate::shell::ConsciousnessShell::export_all();
        let _ = crate::shell::FieldFriend::export_all();
        let _ = crate::shell::ShellActivityOutcome::export_all();

        // Push channel
        let _ = crate::events::CityEvent::export_all();
        let _ = crate::events::CityUpdate::export_all();
    }
}
