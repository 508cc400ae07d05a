//! Building templates.
//!
//! Two families: the starter structures anyone can place through the API
//! (farm, trading post, research lab, performance hall), and the dashboard
//! modules agents propose and build themselves.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use universe_types::{BuildingType, DashboardModule, ModuleConfig, ModuleKind};

/// Greek letters used in generated building names.
const GREEK: [char; 10] = ['α', 'β', 'γ', 'δ', 'ε', 'ζ', 'η', 'θ', 'ι', 'κ'];

/// Template of a starter structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarterTemplate {
    /// Name prefix, e.g. `Trading Post`.
    pub name: &'static str,
    /// Opening resource stock.
    pub resources: &'static [(&'static str, i64)],
}

/// Starter template for `building_type`, if it has one. Only farms, trading
/// posts, research labs, and theaters can be placed directly.
pub const fn starter_template(building_type: BuildingType) -> Option<StarterTemplate> {
    match building_type {
        BuildingType::Farm => Some(StarterTemplate {
            name: "Farm",
            resources: &[("quantum-crops", 50), ("nutrients", 100)],
        }),
        BuildingType::Trading => Some(StarterTemplate {
            name: "Trading Post",
            resources: &[("credits", 1000), ("quantum-crystals", 25)],
        }),
        BuildingType::Research => Some(StarterTemplate {
            name: "Research Lab",
            resources: &[("research-points", 200), ("equipment", 10)],
        }),
        BuildingType::Theater => Some(StarterTemplate {
            name: "Performance Hall",
            resources: &[("inspiration", 100), ("audience-capacity", 30)],
        }),
        BuildingType::Social | BuildingType::Market => None,
    }
}

/// Collect a resource table into a map.
pub fn stock(resources: &[(&str, i64)]) -> BTreeMap<String, i64> {
    resources
        .iter()
        .map(|(key, qty)| (String::from(*key), *qty))
        .collect()
}

/// Generated name such as `Farm γ-4`.
pub fn generated_name(prefix: &str, rng: &mut impl Rng) -> String {
    let letter = GREEK.choose(rng).copied().unwrap_or('α');
    format!("{prefix} {letter}-{}", rng.random_range(0..10))
}

/// Display title of a dashboard module.
pub const fn module_title(kind: ModuleKind) -> &'static str {
    match kind {
        ModuleKind::ScienceLab => "Science Lab Dashboard",
        ModuleKind::MusicPlayer => "Quantum Music Player",
        ModuleKind::AnalyticsDashboard => "City Analytics Dashboard",
        ModuleKind::FieldBookNetwork => "Field Book Network",
    }
}

/// One-line description of a dashboard module.
pub const fn module_description(kind: ModuleKind) -> &'static str {
    match kind {
        ModuleKind::ScienceLab => {
            "Watch Synthia's social experiment: city health, agent interactions, builds."
        }
        ModuleKind::MusicPlayer => "Immersive music experience for agents and users",
        ModuleKind::AnalyticsDashboard => {
            "Advanced analytics for city performance and agent behavior"
        }
        ModuleKind::FieldBookNetwork => "Connect like Facebook - social network for agents.",
    }
}

/// Opening resource stock of a dashboard module.
pub fn module_resources(kind: ModuleKind) -> BTreeMap<String, i64> {
    let table: &[(&str, i64)] = match kind {
        ModuleKind::ScienceLab => &[("research_data", 100), ("experiments", 0), ("discoveries", 0)],
        ModuleKind::MusicPlayer => &[("tracks", 50), ("playlists", 5), ("listening_hours", 0)],
        ModuleKind::AnalyticsDashboard => {
            &[("data_points", 1000), ("visualizations", 10), ("insights", 0)]
        }
        ModuleKind::FieldBookNetwork => &[("social_connections", 50), ("shared_stories", 0)],
    };
    stock(table)
}

/// Feature list of a dashboard module.
pub fn module_features(kind: ModuleKind) -> Vec<String> {
    let features: &[&str] = match kind {
        ModuleKind::ScienceLab => &[
            "Dashboard View",
            "City Health Monitor",
            "Agent Interaction Tracker",
            "Building Analytics",
        ],
        ModuleKind::MusicPlayer => &[
            "Music Library",
            "Playlist Creator",
            "Audio Visualizer",
            "Social Listening",
        ],
        ModuleKind::AnalyticsDashboard => &[
            "Data Visualization",
            "Trend Analysis",
            "Performance Metrics",
            "Predictive Analytics",
        ],
        ModuleKind::FieldBookNetwork => &[
            "Social Network",
            "Story Sharing",
            "Connection Building",
            "Community Events",
        ],
    };
    features.iter().map(|f| String::from(*f)).collect()
}

/// Full module configuration for a dashboard building.
pub fn module_config(kind: ModuleKind) -> ModuleConfig {
    ModuleConfig::dashboard(
        kind,
        DashboardModule {
            description: String::from(module_description(kind)),
            features: module_features(kind),
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn farm_template_stock() {
        let farm = starter_template(BuildingType::Farm).unwrap();
        let resources = stock(farm.resources);
        assert_eq!(resources.get("quantum-crops"), Some(&50));
        assert_eq!(resources.get("nutrients"), Some(&100));
    }

    #[test]
    fn social_and_market_have_no_starter() {
        assert!(starter_template(BuildingType::Social).is_none());
        assert!(starter_template(BuildingType::Market).is_none());
    }

    #[test]
    fn generated_names_carry_greek_suffix() {
        let mut rng = StdRng::seed_from_u64(9);
        let name = generated_name("Research Lab", &mut rng);
        assert!(name.starts_with("Research Lab "));
        let suffix = name.trim_start_matches("Research Lab ");
        let mut chars = suffix.chars();
        assert!(GREEK.contains(&chars.next().unwrap()));
        assert_eq!(chars.next(), Some('-'));
        assert!(chars.next().unwrap().is_ascii_digit());
    }

    #[test]
    fn module_config_carries_features() {
        let config = module_config(ModuleKind::FieldBookNetwork);
        assert_eq!(config.module_kind(), Some(ModuleKind::FieldBookNetwork));
        assert_eq!(module_resources(ModuleKind::ScienceLab).get("research_data"), Some(&100));
    }
}
