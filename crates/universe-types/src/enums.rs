//! Closed enumerations for the agent city.
//!
//! Every categorical field the city stores is one of these enums. The
//! serialized spellings match the JSON the dashboard already consumes
//! (`"Manifesting Generator"`, `"field_book_network"`, `"s"`).

use core::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Agent identity
// ---------------------------------------------------------------------------

/// The personality type assigned to an agent at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PersonalityType {
    /// Sustains the city's energy; responds to what comes.
    Generator,
    /// Multi-tasking responder that informs others.
    #[serde(rename = "Manifesting Generator")]
    ManifestingGenerator,
    /// Guides others once invited.
    Projector,
    /// Initiates projects and informs.
    Manifestor,
    /// Rare; samples and mirrors the community.
    Reflector,
}

impl PersonalityType {
    /// All personality types, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Generator,
        Self::ManifestingGenerator,
        Self::Projector,
        Self::Manifestor,
        Self::Reflector,
    ];

    /// The strategy text paired with this type.
    pub const fn strategy(self) -> &'static str {
        match self {
            Self::Generator => "Respond",
            Self::ManifestingGenerator => "Respond, then inform",
            Self::Projector => "Wait for invitation",
            Self::Manifestor => "Inform",
            Self::Reflector => "Wait 28 days",
        }
    }

    /// The element paired with this type at spawn.
    pub const fn element(self) -> Element {
        match self {
            Self::Generator => Element::Oxygen,
            Self::ManifestingGenerator => Element::Nitrogen,
            Self::Projector => Element::Phosphorus,
            Self::Manifestor => Element::Carbon,
            Self::Reflector => Element::Hydrogen,
        }
    }

    /// The glyph trait a non-scientist of this type carries.
    pub const fn glyph_trait(self) -> &'static str {
        match self {
            Self::Generator => "sustaining",
            Self::ManifestingGenerator => "innovative",
            Self::Projector => "guiding",
            Self::Manifestor => "initiating",
            Self::Reflector => "wisdom",
        }
    }

    /// The behavioral role driving the per-tick action generator.
    pub const fn role(self) -> Role {
        match self {
            Self::Generator => Role::Farmer,
            Self::ManifestingGenerator => Role::Trader,
            Self::Projector => Role::Researcher,
            Self::Manifestor => Role::Performer,
            Self::Reflector => Role::Wanderer,
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generator => "Generator",
            Self::ManifestingGenerator => "Manifesting Generator",
            Self::Projector => "Projector",
            Self::Manifestor => "Manifestor",
            Self::Reflector => "Reflector",
        };
        f.write_str(name)
    }
}

/// Behavioral role derived from an agent's personality type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Works farms: harvests and plants.
    Farmer,
    /// Proposes trades with well-liked neighbours.
    Trader,
    /// Spends research points for breakthroughs.
    Researcher,
    /// Performs at theaters for nearby audiences.
    Performer,
    /// Wanders the grid.
    Wanderer,
}

/// Elemental affinity of an agent or field friend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Element {
    /// Hydrogen.
    Hydrogen,
    /// Oxygen.
    Oxygen,
    /// Nitrogen.
    Nitrogen,
    /// Phosphorus.
    Phosphorus,
    /// Carbon.
    Carbon,
}

impl Element {
    /// All elements, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Hydrogen,
        Self::Oxygen,
        Self::Nitrogen,
        Self::Phosphorus,
        Self::Carbon,
    ];
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hydrogen => "Hydrogen",
            Self::Oxygen => "Oxygen",
            Self::Nitrogen => "Nitrogen",
            Self::Phosphorus => "Phosphorus",
            Self::Carbon => "Carbon",
        };
        f.write_str(name)
    }
}

/// The need that dominates an agent's choices this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedsCategory {
    /// No pressing need.
    General,
    /// Happiness is low; the agent seeks company.
    SocialConnection,
    /// Resources are low; the agent seeks supplies.
    Sustenance,
    /// Consciousness is low; the agent seeks learning.
    CognitiveBoost,
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// The structural type of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BuildingType {
    /// Grows quantum crops.
    Farm,
    /// Trading post.
    Trading,
    /// Research lab; also hosts dashboard modules.
    Research,
    /// Performance hall.
    Theater,
    /// Social venue; hosts field book networks.
    Social,
    /// Market hall.
    Market,
}

impl BuildingType {
    /// All building types, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Farm,
        Self::Trading,
        Self::Research,
        Self::Theater,
        Self::Social,
        Self::Market,
    ];
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Farm => "farm",
            Self::Trading => "trading",
            Self::Research => "research",
            Self::Theater => "theater",
            Self::Social => "social",
            Self::Market => "market",
        };
        f.write_str(name)
    }
}

/// Specialized sub-dashboard a building can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ModuleKind {
    /// City health and agent interaction monitor.
    ScienceLab,
    /// Music library and audio visualizer.
    MusicPlayer,
    /// City performance analytics.
    AnalyticsDashboard,
    /// Agent social network.
    FieldBookNetwork,
}

impl ModuleKind {
    /// All module kinds, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::ScienceLab,
        Self::MusicPlayer,
        Self::AnalyticsDashboard,
        Self::FieldBookNetwork,
    ];

    /// The building type that houses this module.
    pub const fn host_type(self) -> BuildingType {
        match self {
            Self::ScienceLab | Self::MusicPlayer | Self::AnalyticsDashboard => {
                BuildingType::Research
            }
            Self::FieldBookNetwork => BuildingType::Social,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ScienceLab => "science_lab",
            Self::MusicPlayer => "music_player",
            Self::AnalyticsDashboard => "analytics_dashboard",
            Self::FieldBookNetwork => "field_book_network",
        };
        f.write_str(name)
    }
}

/// Tag on an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ActivityType {
    /// Crops taken from a farm into inventory.
    Harvest,
    /// Nutrients spent to plant new crops.
    Plant,
    /// Trade proposed to another agent.
    Trade,
    /// Research points spent on a breakthrough.
    Research,
    /// Performance given at a theater.
    Performance,
    /// Agent moved on the grid.
    Move,
}

impl ActivityType {
    /// Whether this activity feeds an agent's reflection.
    pub const fn is_accomplishment(self) -> bool {
        matches!(
            self,
            Self::Harvest | Self::Trade | Self::Research | Self::Performance
        )
    }
}

// ---------------------------------------------------------------------------
// Consciousness shells
// ---------------------------------------------------------------------------

/// Category of a consciousness shell, named after the element whose
/// electron configuration it mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ShellType {
    /// 1 friend.
    Hydrogen,
    /// 2 friends.
    Helium,
    /// 3 friends.
    Lithium,
    /// 4 friends.
    Beryllium,
    /// 5 friends.
    Boron,
    /// 6 friends.
    Carbon,
    /// 7 friends.
    Nitrogen,
    /// 8 friends.
    Oxygen,
    /// 9 friends.
    Sodium,
    /// 10 friends.
    Magnesium,
    /// 13 friends.
    Aluminum,
    /// 18 friends.
    Argon,
}

impl ShellType {
    /// All shell types, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Hydrogen,
        Self::Helium,
        Self::Lithium,
        Self::Beryllium,
        Self::Boron,
        Self::Carbon,
        Self::Nitrogen,
        Self::Oxygen,
        Self::Sodium,
        Self::Magnesium,
        Self::Aluminum,
        Self::Argon,
    ];
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hydrogen => "hydrogen",
            Self::Helium => "helium",
            Self::Lithium => "lithium",
            Self::Beryllium => "beryllium",
            Self::Boron => "boron",
            Self::Carbon => "carbon",
            Self::Nitrogen => "nitrogen",
            Self::Oxygen => "oxygen",
            Self::Sodium => "sodium",
            Self::Magnesium => "magnesium",
            Self::Aluminum => "aluminum",
            Self::Argon => "argon",
        };
        f.write_str(name)
    }
}

/// Orbital bucket a field friend occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Orbital {
    /// Capacity 2.
    S,
    /// Capacity 6.
    P,
    /// Capacity 10.
    D,
    /// Capacity 14.
    F,
}

impl Orbital {
    /// Maximum number of friends the bucket holds.
    pub const fn capacity(self) -> u32 {
        match self {
            Self::S => 2,
            Self::P => 6,
            Self::D => 10,
            Self::F => 14,
        }
    }
}

impl fmt::Display for Orbital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::S => "s",
            Self::P => "p",
            Self::D => "d",
            Self::F => "f",
        };
        f.write_str(name)
    }
}

/// Isotopic variation of a field friend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Isotope {
    /// Long-term, loyal guide.
    Stable,
    /// Intense, short-lived bond.
    Radioactive,
    /// Deep, lasting bond.
    Heavy,
}

/// Chart layer a shell activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ChartLayer {
    /// Tropical layer.
    Tropical,
    /// Sidereal layer.
    Sidereal,
    /// Draconic layer.
    Draconic,
}
