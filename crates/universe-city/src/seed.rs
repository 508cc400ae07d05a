//! The starter city: four founding agents, their four buildings, and the
//! opening metrics snapshot.

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use universe_types::{
    AgentId, BuildingType, CityMetrics, Element, FarmSettings, Glyph, MemoryEntry, ModuleConfig,
    PersonalityType, Position, ResearchSettings, Size, TheaterSettings, TradingSettings,
};

use crate::catalog::stock;
use crate::error::CityError;
use crate::store::{CityStore, NewAgent, NewBuilding};

/// Ids of the founding agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Founders {
    /// Alex-7, the farmer.
    pub alex: AgentId,
    /// Zara-3, the trader.
    pub zara: AgentId,
    /// Dr. Neural-9, the researcher.
    pub neural: AgentId,
    /// Luna-5, the performer.
    pub luna: AgentId,
}

fn memories(now: DateTime<Utc>, events: &[(i64, &str)]) -> Vec<MemoryEntry> {
    events
        .iter()
        .map(|(hours_ago, event)| {
            let at = now
                .checked_sub_signed(Duration::hours(*hours_ago))
                .unwrap_or(now);
            MemoryEntry::new(at, *event)
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn founder(
    name: &str,
    personality: PersonalityType,
    element: Element,
    is_scientist: bool,
    traits: (f64, f64),
    activity: &str,
    position: Position,
    glyph_trait: &str,
) -> NewAgent {
    let mut agent = NewAgent::of_type(name, personality);
    agent.element = element;
    agent.is_scientist = is_scientist;
    agent.consciousness = traits.0;
    agent.social_bond = traits.1;
    agent.current_activity = String::from(activity);
    agent.position = position;
    agent.glyph = Glyph {
        kind: String::from("orc_field"),
        trait_name: String::from(glyph_trait),
    };
    agent
}

/// Populate `store` with the starter city.
pub fn seed_city(store: &mut CityStore, now: DateTime<Utc>) -> Result<Founders, CityError> {
    let mut alex = founder(
        "Alex-7",
        PersonalityType::Generator,
        Element::Oxygen,
        false,
        (0.94, 0.87),
        "Optimizing hydroponic nutrient cycles using Respond strategy",
        Position::new(2, 2),
        "sustaining",
    );
    alex.memory_stream = memories(
        now,
        &[
            (24, "Discovered new crop yield optimization"),
            (12, "Collaborated with Zara-3 on trade"),
            (6, "Successfully responded to market demand"),
        ],
    );
    alex.inventory = stock(&[("quantum-crops", 15), ("nutrients", 25)]);
    let alex = store.insert_agent(alex, now)?.id;

    let mut zara = founder(
        "Zara-3",
        PersonalityType::ManifestingGenerator,
        Element::Nitrogen,
        false,
        (0.89, 0.92),
        "Analyzing market trends and informing other agents",
        Position::new(8, 4),
        "innovative",
    );
    zara.memory_stream = memories(
        now,
        &[
            (20, "Successful trade with Alex-7"),
            (10, "Market volatility analysis complete"),
            (5, "Informed 3 agents about market opportunities"),
        ],
    );
    zara.inventory = stock(&[("quantum-crystals", 10), ("neural-data", 5)]);
    zara.relationships.insert(alex, 0.8);
    let zara = store.insert_agent(zara, now)?.id;

    let mut neural = founder(
        "Dr. Neural-9",
        PersonalityType::Projector,
        Element::Phosphorus,
        true,
        (0.97, 0.75),
        "Waiting for invitation while studying frequency patterns",
        Position::new(4, 9),
        "analytical",
    );
    neural.memory_stream = memories(
        now,
        &[
            (18, "Discovered new consciousness frequency"),
            (9, "Research breakthrough in trinodal patterns"),
            (4, "Received invitation from Luna-5 for collaboration"),
        ],
    );
    neural.inventory = stock(&[("research-data", 20), ("consciousness-samples", 8)]);
    let neural = store.insert_agent(neural, now)?.id;

    let mut luna = founder(
        "Luna-5",
        PersonalityType::Manifestor,
        Element::Carbon,
        false,
        (0.91, 0.96),
        "Informing agents about next performance preparation",
        Position::new(9, 8),
        "initiating",
    );
    luna.memory_stream = memories(
        now,
        &[
            (16, "Performed 'Quantum Dreams'"),
            (8, "Audience of 23 agents experienced consciousness shift"),
            (4, "Informed Dr. Neural-9 about collaboration opportunity"),
        ],
    );
    luna.inventory = stock(&[("performance-props", 12), ("inspiration", 15)]);
    luna.relationships.insert(alex, 0.7);
    luna.relationships.insert(zara, 0.8);
    let luna = store.insert_agent(luna, now)?.id;

    store.agent_mut(alex)?.relationships.insert(zara, 0.8);

    let buildings = [
        NewBuilding {
            name: String::from("Hydro Farm α-7"),
            building_type: BuildingType::Farm,
            position: Position::new(2, 2),
            size: Size::square(2),
            owner_id: Some(alex),
            resources: stock(&[("quantum-crops", 100), ("nutrients", 50)]),
            module_config: ModuleConfig::Farm(FarmSettings {
                harvest_rate: 15,
                efficiency: 0.9,
            }),
        },
        NewBuilding {
            name: String::from("Trade Hub β-3"),
            building_type: BuildingType::Trading,
            position: Position::new(8, 4),
            size: Size::square(2),
            owner_id: Some(zara),
            resources: stock(&[("quantum-crystals", 50), ("credits", 1000)]),
            module_config: ModuleConfig::Trading(TradingSettings {
                trade_volume: 200,
                market_access: true,
            }),
        },
        NewBuilding {
            name: String::from("Neural Lab γ-1"),
            building_type: BuildingType::Research,
            position: Position::new(4, 9),
            size: Size::square(2),
            owner_id: Some(neural),
            resources: stock(&[("research-points", 300), ("equipment", 15)]),
            module_config: ModuleConfig::Research(ResearchSettings {
                research_speed: 1.5,
                collaboration: true,
            }),
        },
        NewBuilding {
            name: String::from("Quantum Stage δ-5"),
            building_type: BuildingType::Theater,
            position: Position::new(9, 8),
            size: Size::square(2),
            owner_id: Some(luna),
            resources: stock(&[("inspiration", 80), ("audience-capacity", 50)]),
            module_config: ModuleConfig::Theater(TheaterSettings {
                performance_quality: 0.95,
                social_impact: 0.8,
            }),
        },
    ];
    for building in buildings {
        store.insert_building(building, now)?;
    }

    store.set_metrics(CityMetrics::opening(now));
    info!(
        agents = store.agent_count(),
        buildings = store.building_count(),
        "starter city seeded"
    );
    Ok(Founders {
        alex,
        zara,
        neural,
        luna,
    })
}
