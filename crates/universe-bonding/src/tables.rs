//! Static tables: shell categories, isotope traits, friend names, and
//! resonance frequencies.

use universe_types::{ChartLayer, Element, Isotope, PersonalityType, ShellType};

/// Chart layers of the single-layer shells.
const TROPICAL: &[ChartLayer] = &[ChartLayer::Tropical];

/// Chart layers of the two-layer shells.
const TROPICAL_SIDEREAL: &[ChartLayer] = &[ChartLayer::Tropical, ChartLayer::Sidereal];

/// Chart layers of the three-layer shells.
const ALL_LAYERS: &[ChartLayer] = &[
    ChartLayer::Tropical,
    ChartLayer::Sidereal,
    ChartLayer::Draconic,
];

/// Fixed characteristics of a shell category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellConfig {
    /// Friend capacity.
    pub max_friends: u32,
    /// Chart layers a new shell activates.
    pub active_layers: &'static [ChartLayer],
    /// Narrative growth style.
    pub progression_style: &'static str,
    /// Coherence needed to reach the noble gas state.
    pub graduation_threshold: u32,
    /// Signature minigame.
    pub minigame: &'static str,
}

/// Look up the configuration of a shell category.
#[allow(clippy::too_many_lines)]
pub const fn shell_config(shell_type: ShellType) -> ShellConfig {
    match shell_type {
        ShellType::Hydrogen => ShellConfig {
            max_friends: 1,
            active_layers: TROPICAL,
            progression_style: "Solo, introspective; starts with one deep bond",
            graduation_threshold: 100,
            minigame: "meditation",
        },
        ShellType::Helium => ShellConfig {
            max_friends: 2,
            active_layers: TROPICAL_SIDEREAL,
            progression_style: "Stable, supportive; quick to coherence and a stabilizer for others",
            graduation_threshold: 85,
            minigame: "harmony_quest",
        },
        ShellType::Lithium => ShellConfig {
            max_friends: 3,
            active_layers: TROPICAL_SIDEREAL,
            progression_style: "Scattered start; needs a push into multi-awareness",
            graduation_threshold: 75,
            minigame: "invitation_game",
        },
        ShellType::Beryllium => ShellConfig {
            max_friends: 4,
            active_layers: TROPICAL_SIDEREAL,
            progression_style: "Balanced potential; bridge-builders driving change",
            graduation_threshold: 80,
            minigame: "change_driver",
        },
        ShellType::Boron => ShellConfig {
            max_friends: 5,
            active_layers: ALL_LAYERS,
            progression_style: "Innovative but unstable; responds to needs",
            graduation_threshold: 70,
            minigame: "farming_response",
        },
        ShellType::Carbon => ShellConfig {
            max_friends: 6,
            active_layers: ALL_LAYERS,
            progression_style: "Tetrahedral balance; strong catalyst but burnout-prone",
            graduation_threshold: 85,
            minigame: "experiment_catalyst",
        },
        ShellType::Nitrogen => ShellConfig {
            max_friends: 7,
            active_layers: ALL_LAYERS,
            progression_style: "Almost stable, perpetually one away",
            graduation_threshold: 90,
            minigame: "market_seeking",
        },
        ShellType::Oxygen => ShellConfig {
            max_friends: 8,
            active_layers: ALL_LAYERS,
            progression_style: "Noble gas stability; elders and teachers",
            graduation_threshold: 95,
            minigame: "teaching_cycles",
        },
        ShellType::Sodium => ShellConfig {
            max_friends: 9,
            active_layers: ALL_LAYERS,
            progression_style: "Advanced, multi-dimensional start; higher-shell explorers",
            graduation_threshold: 75,
            minigame: "dimension_exploration",
        },
        ShellType::Magnesium => ShellConfig {
            max_friends: 10,
            active_layers: ALL_LAYERS,
            progression_style: "Balanced multi-shell system navigators",
            graduation_threshold: 80,
            minigame: "navigation_performance",
        },
        ShellType::Aluminum => ShellConfig {
            max_friends: 13,
            active_layers: ALL_LAYERS,
            progression_style: "Complex, near-full d-shell; prone to overexpansion",
            graduation_threshold: 85,
            minigame: "balance_sustainability",
        },
        ShellType::Argon => ShellConfig {
            max_friends: 18,
            active_layers: ALL_LAYERS,
            progression_style: "Higher noble gas; planetary elders",
            graduation_threshold: 100,
            minigame: "elder_teaching",
        },
    }
}

/// Whether the shell category unlocks the advanced activities.
pub const fn is_advanced(shell_type: ShellType) -> bool {
    matches!(
        shell_type,
        ShellType::Oxygen
            | ShellType::Sodium
            | ShellType::Magnesium
            | ShellType::Aluminum
            | ShellType::Argon
    )
}

/// Shell category assigned to a new agent.
pub const fn shell_type_for(personality: PersonalityType) -> ShellType {
    match personality {
        PersonalityType::Reflector => ShellType::Hydrogen,
        PersonalityType::Generator => ShellType::Helium,
        PersonalityType::ManifestingGenerator => ShellType::Beryllium,
        PersonalityType::Projector => ShellType::Lithium,
        PersonalityType::Manifestor => ShellType::Carbon,
    }
}

/// Fixed characteristics of an isotope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsotopeTraits {
    /// Base stability, 0 to 100.
    pub stability: u32,
    /// How long the bond lasts, in days.
    pub bonding_days: i64,
    /// Multiplier on the resonance frequency.
    pub intensity: f64,
    /// Short description.
    pub description: &'static str,
}

/// Look up the traits of an isotope.
pub const fn isotope_traits(isotope: Isotope) -> IsotopeTraits {
    match isotope {
        Isotope::Stable => IsotopeTraits {
            stability: 90,
            bonding_days: 365,
            intensity: 1.0,
            description: "Long-term, loyal guide with consistent energy",
        },
        Isotope::Radioactive => IsotopeTraits {
            stability: 40,
            bonding_days: 30,
            intensity: 2.5,
            description: "Quick insight burst with intense transformation",
        },
        Isotope::Heavy => IsotopeTraits {
            stability: 95,
            bonding_days: 1095,
            intensity: 1.5,
            description: "Deep, permanent bonding with lasting impact",
        },
    }
}

/// Base resonance of an element in MHz.
pub const fn base_frequency(element: Element) -> f64 {
    match element {
        Element::Hydrogen => 1420.4,
        Element::Oxygen => 2060.0,
        Element::Carbon => 1871.5,
        Element::Nitrogen => 1665.4,
        Element::Phosphorus => 1823.7,
    }
}

/// Resonance frequency text for a friend, e.g. `3551.0 MHz`.
pub fn resonance_frequency(element: Element, isotope: Isotope) -> String {
    let mhz = base_frequency(element) * isotope_traits(isotope).intensity;
    format!("{mhz:.1} MHz")
}

/// Name stems for field friends of an element.
pub const fn friend_names(element: Element) -> &'static [&'static str] {
    match element {
        Element::Hydrogen => &["Lumina", "Spark", "Bright", "Glow", "Flash"],
        Element::Oxygen => &["Vita", "Breath", "Flow", "Life", "Spirit"],
        Element::Carbon => &["Bond", "Chain", "Link", "Core", "Frame"],
        Element::Nitrogen => &["Cool", "Calm", "Still", "Peace", "Rest"],
        Element::Phosphorus => &["Fire", "Energy", "Power", "Force", "Flame"],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn capacities_span_one_to_eighteen() {
        let caps: Vec<u32> = ShellType::ALL
            .iter()
            .map(|t| shell_config(*t).max_friends)
            .collect();
        assert_eq!(caps, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 13, 18]);
    }

    #[test]
    fn personality_maps_to_shell() {
        assert_eq!(shell_type_for(PersonalityType::Reflector), ShellType::Hydrogen);
        assert_eq!(shell_type_for(PersonalityType::Generator), ShellType::Helium);
        assert_eq!(
            shell_type_for(PersonalityType::ManifestingGenerator),
            ShellType::Beryllium
        );
        assert_eq!(shell_type_for(PersonalityType::Projector), ShellType::Lithium);
        assert_eq!(shell_type_for(PersonalityType::Manifestor), ShellType::Carbon);
    }

    #[test]
    fn resonance_is_scaled_by_isotope() {
        assert_eq!(
            resonance_frequency(Element::Hydrogen, Isotope::Stable),
            "1420.4 MHz"
        );
        assert_eq!(
            resonance_frequency(Element::Hydrogen, Isotope::Radioactive),
            "3551.0 MHz"
        );
    }

    #[test]
    fn hydrogen_has_a_single_layer() {
        assert_eq!(shell_config(ShellType::Hydrogen).active_layers, TROPICAL);
        assert_eq!(shell_config(ShellType::Argon).active_layers.len(), 3);
    }
}
