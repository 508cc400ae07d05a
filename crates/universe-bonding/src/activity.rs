//! Consciousness minigames.
//!
//! Each activity has a success chance, optional preconditions, and a
//! coherence range awarded on success. Unknown activity names fall back to
//! general practice.

use core::fmt;

use rand::Rng;
use universe_types::ConsciousnessShell;

/// A minigame a shell can play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellActivity {
    /// Solo meditation.
    Meditation,
    /// Balances at least two friends.
    HarmonyQuest,
    /// Waiting for an invitation; failure costs coherence.
    InvitationGame,
    /// Catalytic experiment with at least four friends.
    ExperimentCatalyst,
    /// Teaching others; requires the noble gas state.
    TeachingCycles,
    /// Any other named practice.
    General(String),
}

impl ShellActivity {
    /// Parse an activity name. Names without dedicated rules become
    /// [`ShellActivity::General`].
    pub fn parse(name: &str) -> Self {
        match name {
            "meditation" => Self::Meditation,
            "harmony_quest" => Self::HarmonyQuest,
            "invitation_game" => Self::InvitationGame,
            "experiment_catalyst" => Self::ExperimentCatalyst,
            "teaching_cycles" => Self::TeachingCycles,
            other => Self::General(String::from(other)),
        }
    }

    /// The wire name of the activity.
    pub fn name(&self) -> &str {
        match self {
            Self::Meditation => "meditation",
            Self::HarmonyQuest => "harmony_quest",
            Self::InvitationGame => "invitation_game",
            Self::ExperimentCatalyst => "experiment_catalyst",
            Self::TeachingCycles => "teaching_cycles",
            Self::General(name) => name,
        }
    }
}

impl fmt::Display for ShellActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one roll, before it is applied to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roll {
    /// Whether the activity succeeded.
    pub success: bool,
    /// Coherence change to apply.
    pub coherence_delta: i32,
    /// Summary line.
    pub message: &'static str,
}

/// Roll an activity against the current state of `shell`.
pub fn roll(activity: &ShellActivity, shell: &ConsciousnessShell, rng: &mut impl Rng) -> Roll {
    match activity {
        ShellActivity::Meditation => {
            let success = rng.random_bool(0.7);
            Roll {
                success,
                coherence_delta: if success { rng.random_range(5..=19) } else { 0 },
                message: if success {
                    "Deep meditation increased shell coherence"
                } else {
                    "Meditation was disrupted"
                },
            }
        }
        ShellActivity::HarmonyQuest => {
            let success = shell.current_friends >= 2 && rng.random_bool(0.8);
            Roll {
                success,
                coherence_delta: if success { rng.random_range(10..=29) } else { 0 },
                message: if success {
                    "Harmony quest balanced field friends"
                } else {
                    "Quest failed - need more friends"
                },
            }
        }
        ShellActivity::InvitationGame => {
            let success = rng.random_bool(0.5);
            Roll {
                success,
                coherence_delta: if success { rng.random_range(5..=29) } else { -5 },
                message: if success {
                    "Received invitation - coherence increased"
                } else {
                    "Still waiting for invitation"
                },
            }
        }
        ShellActivity::ExperimentCatalyst => {
            let success = shell.current_friends >= 4 && rng.random_bool(0.75);
            Roll {
                success,
                coherence_delta: if success { rng.random_range(10..=39) } else { 0 },
                message: if success {
                    "Catalytic experiment boosted coherence"
                } else {
                    "Experiment needs more field friends"
                },
            }
        }
        ShellActivity::TeachingCycles => {
            let success = shell.noble_gas_state && rng.random_bool(0.9);
            Roll {
                success,
                coherence_delta: if success { rng.random_range(20..=59) } else { 0 },
                message: if success {
                    "Teaching others amplified coherence"
                } else {
                    "Teaching requires noble gas state"
                },
            }
        }
        ShellActivity::General(_) => {
            let success = rng.random_bool(0.6);
            Roll {
                success,
                coherence_delta: if success { rng.random_range(3..=12) } else { 0 },
                message: if success {
                    "General consciousness work completed"
                } else {
                    "Activity had no effect"
                },
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use universe_types::{AgentId, ChartLayer, OrbitalFill, ShellId, ShellType};

    use super::*;

    fn empty_shell() -> ConsciousnessShell {
        let now = Utc::now();
        ConsciousnessShell {
            id: ShellId::new(),
            agent_id: AgentId::new(),
            shell_type: ShellType::Carbon,
            current_friends: 0,
            max_friends: 6,
            orbital_structure: OrbitalFill::default(),
            active_layers: vec![ChartLayer::Tropical],
            coherence_level: 0,
            practice: 0,
            noble_gas_state: false,
            teaching_unlocked: false,
            field_friends: Vec::new(),
            progression_style: String::new(),
            graduation_threshold: 85,
            minigame_type: String::from("experiment_catalyst"),
            last_update: now,
            created_at: now,
        }
    }

    #[test]
    fn parse_falls_back_to_general() {
        assert_eq!(ShellActivity::parse("meditation"), ShellActivity::Meditation);
        assert_eq!(
            ShellActivity::parse("consciousness_boost"),
            ShellActivity::General(String::from("consciousness_boost"))
        );
        assert_eq!(ShellActivity::parse("change_driver").name(), "change_driver");
    }

    #[test]
    fn preconditions_block_success() {
        let shell = empty_shell();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let harmony = roll(&ShellActivity::HarmonyQuest, &shell, &mut rng);
            assert!(!harmony.success);
            assert_eq!(harmony.coherence_delta, 0);
            let catalyst = roll(&ShellActivity::ExperimentCatalyst, &shell, &mut rng);
            assert!(!catalyst.success);
            let teaching = roll(&ShellActivity::TeachingCycles, &shell, &mut rng);
            assert!(!teaching.success);
        }
    }

    #[test]
    fn deltas_stay_in_range() {
        let mut shell = empty_shell();
        shell.current_friends = 6;
        shell.noble_gas_state = true;
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let r = roll(&ShellActivity::Meditation, &shell, &mut rng);
            assert!(r.coherence_delta == 0 || (5..=19).contains(&r.coherence_delta));
            let r = roll(&ShellActivity::InvitationGame, &shell, &mut rng);
            assert!(r.coherence_delta == -5 || (5..=29).contains(&r.coherence_delta));
            let r = roll(&ShellActivity::TeachingCycles, &shell, &mut rng);
            assert!(r.coherence_delta == 0 || (20..=59).contains(&r.coherence_delta));
            let r = roll(&ShellActivity::General(String::from("x")), &shell, &mut rng);
            assert!(r.coherence_delta == 0 || (3..=12).contains(&r.coherence_delta));
        }
    }
}
