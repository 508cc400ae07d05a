//! In-memory store for the YOU-N-I-VERSE agent city.
//!
//! # Modules
//!
//! - [`store`] -- [`CityStore`], the owned collection of every city record.
//! - [`wellbeing`] -- Trait clamping and memory stream upkeep.
//! - [`catalog`] -- Building templates and dashboard module tables.
//! - [`spawn`] -- Random agent generation.
//! - [`seed`] -- The four-agent starter city.
//! - [`error`] -- [`CityError`].

pub mod catalog;
pub mod error;
pub mod seed;
pub mod spawn;
pub mod store;
pub mod wellbeing;

pub use error::CityError;
pub use seed::{Founders, seed_city};
pub use spawn::random_agent;
pub use store::{AgentUpdate, CityLimits, CityStore, NewActivity, NewAgent, NewBuilding};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use universe_types::{
        Agent, AgentId, BuildingType, GridSize, ModuleConfig, PersonalityType, Position, Size,
    };

    use crate::catalog::{starter_template, stock};
    use crate::store::{CityLimits, CityStore, NewAgent, NewBuilding};

    pub fn empty_store() -> CityStore {
        CityStore::new(GridSize::default(), CityLimits::default(), Utc::now())
    }

    pub fn sample_agent() -> Agent {
        let new = NewAgent::of_type("Sage-1", PersonalityType::Generator);
        Agent {
            id: AgentId::new(),
            name: new.name,
            personality_type: new.personality_type,
            element: new.element,
            strategy: new.strategy,
            is_scientist: false,
            consciousness: 0.5,
            social_bond: 0.5,
            happiness: 50.0,
            resources: 50.0,
            current_activity: new.current_activity,
            position: Position::new(3, 3),
            glyph: new.glyph,
            memory_stream: Vec::new(),
            relationships: BTreeMap::new(),
            inventory: BTreeMap::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn new_farm(owner: Option<AgentId>) -> NewBuilding {
        let template = starter_template(BuildingType::Farm).unwrap();
        NewBuilding {
            name: String::from("Farm α-1"),
            building_type: BuildingType::Farm,
            position: Position::new(1, 1),
            size: Size::square(2),
            owner_id: owner,
            resources: stock(template.resources),
            module_config: ModuleConfig::Basic,
        }
    }
}
