//! Needs assessment.

use universe_types::{Agent, NeedsCategory};

use crate::policy::NeedsThresholds;

/// Classify what an agent lacks most. Social connection wins over
/// sustenance, which wins over a cognitive boost.
pub const fn assess(agent: &Agent, thresholds: &NeedsThresholds) -> NeedsCategory {
    if agent.happiness < thresholds.social_happiness_below {
        NeedsCategory::SocialConnection
    } else if agent.resources < thresholds.sustenance_resources_below {
        NeedsCategory::Sustenance
    } else if agent.consciousness < thresholds.cognitive_consciousness_below {
        NeedsCategory::CognitiveBoost
    } else {
        NeedsCategory::General
    }
}

/// Extra daily activities offered for a need.
pub const fn activities_for(needs: NeedsCategory) -> &'static [&'static str] {
    match needs {
        NeedsCategory::General => &[],
        NeedsCategory::SocialConnection => &[
            "social gathering at plaza",
            "community building",
            "collaborative work",
        ],
        NeedsCategory::Sustenance => &[
            "resource gathering",
            "trading for supplies",
            "farming assistance",
        ],
        NeedsCategory::CognitiveBoost => &[
            "learning new skills",
            "research activities",
            "knowledge sharing",
        ],
    }
}
