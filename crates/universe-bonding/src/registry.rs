//! The shell registry: one consciousness shell per agent.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info};
use universe_types::{
    AgentId, ChartLayer, ConsciousnessShell, Element, FieldFriend, FriendId, Isotope, Orbital,
    OrbitalFill, PersonalityType, ShellActivityOutcome, ShellId,
};

use crate::activity::{ShellActivity, roll};
use crate::coherence::refresh;
use crate::error::BondingError;
use crate::tables::{
    friend_names, is_advanced, isotope_traits, resonance_frequency, shell_config, shell_type_for,
};

/// All consciousness shells, keyed by owning agent.
#[derive(Debug, Clone, Default)]
pub struct ShellRegistry {
    shells: BTreeMap<AgentId, ConsciousnessShell>,
}

impl ShellRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            shells: BTreeMap::new(),
        }
    }

    /// Return the agent's shell, creating it from the personality type if
    /// the agent has none yet.
    pub fn ensure_shell(
        &mut self,
        agent_id: AgentId,
        personality: PersonalityType,
        now: DateTime<Utc>,
    ) -> &ConsciousnessShell {
        self.shells.entry(agent_id).or_insert_with(|| {
            let shell_type = shell_type_for(personality);
            let config = shell_config(shell_type);
            debug!(%agent_id, %shell_type, "created consciousness shell");
            ConsciousnessShell {
                id: ShellId::new(),
                agent_id,
                shell_type,
                current_friends: 0,
                max_friends: config.max_friends,
                orbital_structure: OrbitalFill::default(),
                active_layers: config.active_layers.to_vec(),
                coherence_level: 0,
                practice: 0,
                noble_gas_state: false,
                teaching_unlocked: false,
                field_friends: Vec::new(),
                progression_style: String::from(config.progression_style),
                graduation_threshold: config.graduation_threshold,
                minigame_type: String::from(config.minigame),
                last_update: now,
                created_at: now,
            }
        })
    }

    /// All shells, ordered by agent id.
    pub fn shells(&self) -> Vec<&ConsciousnessShell> {
        self.shells.values().collect()
    }

    /// Number of shells.
    pub fn len(&self) -> usize {
        self.shells.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.shells.is_empty()
    }

    /// The agent's shell, if any.
    pub fn shell(&self, agent_id: AgentId) -> Option<&ConsciousnessShell> {
        self.shells.get(&agent_id)
    }

    /// Friends bonded to the agent's shell.
    pub fn friends(&self, agent_id: AgentId) -> Result<&[FieldFriend], BondingError> {
        self.shells
            .get(&agent_id)
            .map(|shell| shell.field_friends.as_slice())
            .ok_or(BondingError::ShellNotFound(agent_id))
    }

    /// Activities the agent's shell can play: its signature minigame, the
    /// universal practices, and the advanced ones for higher shells.
    pub fn available_activities(&self, agent_id: AgentId) -> Result<Vec<String>, BondingError> {
        let shell = self
            .shells
            .get(&agent_id)
            .ok_or(BondingError::ShellNotFound(agent_id))?;
        let mut activities = vec![
            shell.minigame_type.clone(),
            String::from("meditation"),
            String::from("consciousness_boost"),
        ];
        if is_advanced(shell.shell_type) {
            activities.push(String::from("teaching_cycles"));
            activities.push(String::from("dimension_exploration"));
        }
        Ok(activities)
    }

    /// Whether a friend could be bonded into `orbital` right now.
    pub fn can_recruit(&self, agent_id: AgentId, orbital: Orbital) -> bool {
        self.shells
            .get(&agent_id)
            .is_some_and(|shell| check_capacity(shell, orbital).is_ok())
    }

    /// Bond a new field friend into `orbital`.
    ///
    /// Rejected when the shell is full or the bucket is at capacity; the
    /// shell is left unchanged in that case.
    pub fn bond_friend(
        &mut self,
        agent_id: AgentId,
        orbital: Orbital,
        isotope: Isotope,
        rng: &mut impl Rng,
        now: DateTime<Utc>,
    ) -> Result<FieldFriend, BondingError> {
        let shell = self
            .shells
            .get_mut(&agent_id)
            .ok_or(BondingError::ShellNotFound(agent_id))?;
        check_capacity(shell, orbital)?;

        let friend = generate_friend(shell, orbital, isotope, rng, now);
        shell.current_friends = shell.current_friends.saturating_add(1);
        let bucket = shell.orbital_structure.get_mut(orbital);
        *bucket = bucket.saturating_add(1);
        shell.field_friends.push(friend.clone());
        shell.last_update = now;
        refresh(shell);

        info!(
            %agent_id,
            friend = %friend.name,
            isotope = ?friend.isotope_type,
            %orbital,
            shell_type = %shell.shell_type,
            "field friend bonded"
        );
        Ok(friend)
    }

    /// Play a minigame.
    ///
    /// On success, friends in `orbital_target` (or all friends when no
    /// target is given) record an interaction.
    pub fn perform_activity(
        &mut self,
        agent_id: AgentId,
        activity: &ShellActivity,
        orbital_target: Option<Orbital>,
        rng: &mut impl Rng,
        now: DateTime<Utc>,
    ) -> Result<ShellActivityOutcome, BondingError> {
        let shell = self
            .shells
            .get_mut(&agent_id)
            .ok_or(BondingError::ShellNotFound(agent_id))?;
        let result = roll(activity, shell, rng);

        if result.success {
            for friend in &mut shell.field_friends {
                if orbital_target.is_none_or(|target| friend.orbital_position == target) {
                    friend.interactions = friend.interactions.saturating_add(1);
                }
            }
        }
        if result.coherence_delta != 0 {
            shell.practice = shell.practice.saturating_add(result.coherence_delta);
            shell.last_update = now;
        }
        refresh(shell);

        debug!(
            %agent_id,
            %activity,
            success = result.success,
            delta = result.coherence_delta,
            coherence = shell.coherence_level,
            "consciousness activity played"
        );
        Ok(ShellActivityOutcome {
            success: result.success,
            coherence_gained: result.coherence_delta,
            message: String::from(result.message),
            coherence_level: shell.coherence_level,
        })
    }

    /// Release radioactive friends whose bond has outlived the isotope's
    /// bonding duration. Returns how many friends decayed.
    pub fn decay_radioactive(&mut self, now: DateTime<Utc>) -> usize {
        let lifetime = Duration::days(isotope_traits(Isotope::Radioactive).bonding_days);
        let mut decayed: usize = 0;
        for shell in self.shells.values_mut() {
            let before = shell.field_friends.len();
            shell.field_friends.retain(|friend| {
                friend.isotope_type != Isotope::Radioactive
                    || now.signed_duration_since(friend.bonded_since) < lifetime
            });
            let removed = before.saturating_sub(shell.field_friends.len());
            if removed == 0 {
                continue;
            }

            let mut fill = OrbitalFill::default();
            for friend in &shell.field_friends {
                let bucket = fill.get_mut(friend.orbital_position);
                *bucket = bucket.saturating_add(1);
            }
            shell.orbital_structure = fill;
            shell.current_friends = fill.total();
            shell.last_update = now;
            refresh(shell);
            info!(agent_id = %shell.agent_id, removed, "radioactive field friends decayed");
            decayed = decayed.saturating_add(removed);
        }
        decayed
    }
}

fn check_capacity(shell: &ConsciousnessShell, orbital: Orbital) -> Result<(), BondingError> {
    if shell.is_full() {
        return Err(BondingError::ShellFull {
            shell_type: shell.shell_type,
            max_friends: shell.max_friends,
        });
    }
    if shell.orbital_structure.is_full(orbital) {
        return Err(BondingError::OrbitalFull {
            orbital,
            capacity: orbital.capacity(),
        });
    }
    Ok(())
}

fn generate_friend(
    shell: &ConsciousnessShell,
    orbital: Orbital,
    isotope: Isotope,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> FieldFriend {
    let element = Element::ALL.choose(rng).copied().unwrap_or(Element::Hydrogen);
    let layer = shell
        .active_layers
        .choose(rng)
        .copied()
        .unwrap_or(ChartLayer::Tropical);
    let stem = friend_names(element).choose(rng).copied().unwrap_or("Friend");
    let base_stability = isotope_traits(isotope).stability;

    FieldFriend {
        id: FriendId::new(),
        shell_id: shell.id,
        name: format!("{stem}-{}", rng.random_range(0..999)),
        element,
        isotope_type: isotope,
        bonding_energy: rng.random_range(50..100),
        stability: base_stability
            .saturating_sub(10)
            .saturating_add(rng.random_range(0..20))
            .min(100),
        resonance_frequency: resonance_frequency(element, isotope),
        orbital_position: orbital,
        activation_layer: layer,
        bonded_since: now,
        interactions: 0,
        synergy: rng.random_range(70..100),
    }
}
