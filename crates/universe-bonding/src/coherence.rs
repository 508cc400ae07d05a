//! Coherence of a consciousness shell.
//!
//! Coherence has two parts. The derived part comes from the shell's
//! structure: how full it is, whether the orbitals were filled in order,
//! and how stable the bonded isotopes are. The practice part accumulates
//! from minigames. Their sum is clamped to 0..=100.

use universe_types::{ConsciousnessShell, OrbitalFill};

use crate::tables::isotope_traits;

/// Highest possible coherence.
pub const MAX_COHERENCE: i32 = 100;

/// Penalty factor for orbitals filled out of order.
///
/// An s bucket below 2 while any higher bucket is used costs 0.8; a p bucket
/// below 6 with s full and d or f used costs 0.9; a d bucket below 10 with p
/// full and f used costs 0.9. Penalties multiply.
pub const fn orbital_balance(fill: &OrbitalFill) -> f64 {
    let mut balance = 1.0;
    if fill.s < 2 && (fill.p > 0 || fill.d > 0 || fill.f > 0) {
        balance *= 0.8;
    }
    if fill.p < 6 && fill.s == 2 && (fill.d > 0 || fill.f > 0) {
        balance *= 0.9;
    }
    if fill.d < 10 && fill.p == 6 && fill.f > 0 {
        balance *= 0.9;
    }
    balance
}

/// Mean isotope stability of the bonded friends, as a fraction. Zero for an
/// empty shell.
pub fn stability_factor(shell: &ConsciousnessShell) -> f64 {
    if shell.field_friends.is_empty() {
        return 0.0;
    }
    let total: f64 = shell
        .field_friends
        .iter()
        .map(|friend| f64::from(isotope_traits(friend.isotope_type).stability) / 100.0)
        .sum();
    #[allow(clippy::cast_precision_loss)] // at most 118 friends
    let count = shell.field_friends.len() as f64;
    total / count
}

/// Structural coherence: `min(100, fill% * balance * stability)`.
pub fn derived_coherence(shell: &ConsciousnessShell) -> f64 {
    if shell.max_friends == 0 {
        return 0.0;
    }
    let fill = f64::from(shell.current_friends) / f64::from(shell.max_friends) * 100.0;
    let value = fill * orbital_balance(&shell.orbital_structure) * stability_factor(shell);
    value.min(f64::from(MAX_COHERENCE))
}

/// Recompute `coherence_level` and the graduation flags of `shell`.
///
/// The noble gas flag is set once the shell is full and its coherence
/// reaches the graduation threshold; it is never cleared. Teaching unlocks
/// with it. Returns `true` when this call set the flag.
pub fn refresh(shell: &mut ConsciousnessShell) -> bool {
    #[allow(clippy::cast_possible_truncation)]
    let derived = derived_coherence(shell).floor() as i32;
    let level = derived
        .saturating_add(shell.practice)
        .clamp(0, MAX_COHERENCE);
    shell.coherence_level = u32::try_from(level).unwrap_or(0);

    let graduated = !shell.noble_gas_state
        && shell.is_full()
        && shell.coherence_level >= shell.graduation_threshold;
    if graduated {
        shell.noble_gas_state = true;
        tracing::info!(
            agent_id = %shell.agent_id,
            shell_type = %shell.shell_type,
            "shell reached noble gas state, teaching unlocked"
        );
    }
    shell.teaching_unlocked = shell.teaching_unlocked || shell.noble_gas_state;
    graduated
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use chrono::Utc;
    use universe_types::{
        AgentId, ChartLayer, Element, FieldFriend, FriendId, Isotope, Orbital, ShellId, ShellType,
    };

    use super::*;

    fn shell(max_friends: u32, threshold: u32) -> ConsciousnessShell {
        let now = Utc::now();
        ConsciousnessShell {
            id: ShellId::new(),
            agent_id: AgentId::new(),
            shell_type: ShellType::Helium,
            current_friends: 0,
            max_friends,
            orbital_structure: OrbitalFill::default(),
            active_layers: vec![ChartLayer::Tropical],
            coherence_level: 0,
            practice: 0,
            noble_gas_state: false,
            teaching_unlocked: false,
            field_friends: Vec::new(),
            progression_style: String::new(),
            graduation_threshold: threshold,
            minigame_type: String::from("harmony_quest"),
            last_update: now,
            created_at: now,
        }
    }

    fn add_friend(shell: &mut ConsciousnessShell, orbital: Orbital, isotope: Isotope) {
        shell.field_friends.push(FieldFriend {
            id: FriendId::new(),
            shell_id: shell.id,
            name: String::from("Glow-1"),
            element: Element::Hydrogen,
            isotope_type: isotope,
            bonding_energy: 60,
            stability: 90,
            resonance_frequency: String::from("1420.4 MHz"),
            orbital_position: orbital,
            activation_layer: ChartLayer::Tropical,
            bonded_since: Utc::now(),
            interactions: 0,
            synergy: 80,
        });
        shell.current_friends += 1;
        *shell.orbital_structure.get_mut(orbital) += 1;
    }

    #[test]
    fn balance_penalizes_skipping_s() {
        let fill = OrbitalFill {
            s: 1,
            p: 1,
            d: 0,
            f: 0,
        };
        assert!((orbital_balance(&fill) - 0.8).abs() < 1e-9);
        assert!((orbital_balance(&OrbitalFill::default()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_shell_has_zero_coherence() {
        let mut s = shell(2, 85);
        refresh(&mut s);
        assert_eq!(s.coherence_level, 0);
        assert!(!s.noble_gas_state);
    }

    #[test]
    fn full_stable_shell_scores_ninety() {
        let mut s = shell(2, 85);
        add_friend(&mut s, Orbital::S, Isotope::Stable);
        add_friend(&mut s, Orbital::S, Isotope::Stable);
        let graduated = refresh(&mut s);
        assert_eq!(s.coherence_level, 90);
        assert!(graduated);
        assert!(s.noble_gas_state);
        assert!(s.teaching_unlocked);
    }

    #[test]
    fn practice_adds_and_clamps() {
        let mut s = shell(2, 85);
        s.practice = 250;
        refresh(&mut s);
        assert_eq!(s.coherence_level, 100);
        s.practice = -40;
        refresh(&mut s);
        assert_eq!(s.coherence_level, 0);
    }

    #[test]
    fn noble_gas_is_sticky() {
        let mut s = shell(1, 50);
        add_friend(&mut s, Orbital::S, Isotope::Heavy);
        refresh(&mut s);
        assert!(s.noble_gas_state);

        s.field_friends.clear();
        s.current_friends = 0;
        s.orbital_structure = OrbitalFill::default();
        let graduated = refresh(&mut s);
        assert!(!graduated);
        assert!(s.noble_gas_state);
        assert!(s.teaching_unlocked);
    }
}
