//! Consciousness shell records.
//!
//! A shell is a per-agent container of "field friends" arranged in
//! orbital buckets. The rules that fill it live in `universe-bonding`;
//! this module only carries the wire shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ChartLayer, Element, Isotope, Orbital, ShellType};
use crate::ids::{AgentId, FriendId, ShellId};

/// Friend counts per orbital bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OrbitalFill {
    /// Friends in the s bucket (max 2).
    pub s: u32,
    /// Friends in the p bucket (max 6).
    pub p: u32,
    /// Friends in the d bucket (max 10).
    pub d: u32,
    /// Friends in the f bucket (max 14).
    pub f: u32,
}

impl OrbitalFill {
    /// Friends currently in `orbital`.
    pub const fn get(&self, orbital: Orbital) -> u32 {
        match orbital {
            Orbital::S => self.s,
            Orbital::P => self.p,
            Orbital::D => self.d,
            Orbital::F => self.f,
        }
    }

    /// Mutable access to the count for `orbital`.
    pub const fn get_mut(&mut self, orbital: Orbital) -> &mut u32 {
        match orbital {
            Orbital::S => &mut self.s,
            Orbital::P => &mut self.p,
            Orbital::D => &mut self.d,
            Orbital::F => &mut self.f,
        }
    }

    /// Whether `orbital` has reached its capacity.
    pub const fn is_full(&self, orbital: Orbital) -> bool {
        self.get(orbital) >= orbital.capacity()
    }

    /// Total friends across all buckets.
    pub const fn total(&self) -> u32 {
        self.s
            .saturating_add(self.p)
            .saturating_add(self.d)
            .saturating_add(self.f)
    }
}

/// A companion bonded into one orbital bucket of a shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FieldFriend {
    /// Unique identifier.
    pub id: FriendId,
    /// The shell this friend is bonded to.
    pub shell_id: ShellId,
    /// Display name, e.g. `Lumina-42`.
    pub name: String,
    /// Elemental affinity.
    pub element: Element,
    /// Isotopic variation.
    pub isotope_type: Isotope,
    /// Bond strength, 50 to 99.
    pub bonding_energy: u32,
    /// Stability around the isotope's base value.
    pub stability: u32,
    /// Resonance frequency text, e.g. `1420.4 MHz`.
    pub resonance_frequency: String,
    /// Orbital bucket occupied.
    pub orbital_position: Orbital,
    /// Chart layer the friend activates.
    pub activation_layer: ChartLayer,
    /// When the bond formed.
    pub bonded_since: DateTime<Utc>,
    /// Interactions so far.
    pub interactions: u32,
    /// Synergy with the shell, 70 to 99 at bonding.
    pub synergy: u32,
}

/// Per-agent consciousness shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ConsciousnessShell {
    /// Unique identifier.
    pub id: ShellId,
    /// Owning agent.
    pub agent_id: AgentId,
    /// Shell category.
    pub shell_type: ShellType,
    /// Friends bonded so far. Never exceeds `max_friends`.
    pub current_friends: u32,
    /// Capacity of the shell.
    pub max_friends: u32,
    /// Friends per orbital bucket.
    pub orbital_structure: OrbitalFill,
    /// Chart layers the shell activates.
    pub active_layers: Vec<ChartLayer>,
    /// Coherence, 0 to 100.
    pub coherence_level: u32,
    /// Coherence accumulated from practice activities.
    pub practice: i32,
    /// Full shell at or above the graduation threshold. Once set, stays set.
    #[serde(rename = "noblegasState")]
    pub noble_gas_state: bool,
    /// Teaching activities are available.
    pub teaching_unlocked: bool,
    /// Bonded friends, in bonding order.
    pub field_friends: Vec<FieldFriend>,
    /// Narrative description of how the shell grows.
    pub progression_style: String,
    /// Coherence needed to graduate.
    pub graduation_threshold: u32,
    /// The shell type's signature minigame.
    pub minigame_type: String,
    /// Last mutation.
    pub last_update: DateTime<Utc>,
    /// When the shell was created.
    pub created_at: DateTime<Utc>,
}

impl ConsciousnessShell {
    /// Whether every slot is taken.
    pub const fn is_full(&self) -> bool {
        self.current_friends >= self.max_friends
    }
}

/// Result of a consciousness minigame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ShellActivityOutcome {
    /// Whether the activity succeeded.
    pub success: bool,
    /// Coherence change applied (negative on some failures).
    pub coherence_gained: i32,
    /// Human-readable summary.
    pub message: String,
    /// Coherence after the activity.
    pub coherence_level: u32,
}
