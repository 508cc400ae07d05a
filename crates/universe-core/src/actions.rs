//! Action execution.
//!
//! Applies a planned [`CityAction`] to the store and appends it to the
//! activity log. Quantities are re-read at execution time, so an action
//! planned against a stale view never drives a stock negative.

use chrono::{DateTime, Utc};
use tracing::debug;
use universe_city::wellbeing::boost_social_bond;
use universe_city::{CityError, CityStore, NewActivity};
use universe_types::Activity;

use crate::behavior::{ActionKind, CityAction};
use crate::policy::RolePolicy;

/// Apply `action` and log it.
pub fn execute(
    store: &mut CityStore,
    action: &CityAction,
    policy: &RolePolicy,
    now: DateTime<Utc>,
) -> Result<Activity, CityError> {
    let agent_id = action.agent_id;
    match &action.kind {
        ActionKind::Harvest { farm, amount } => {
            let building = store.building_mut(*farm)?;
            let taken = building.resource("quantum-crops").min(*amount).max(0);
            building.adjust_resource("quantum-crops", taken.saturating_neg());
            let agent = store.agent_mut(agent_id)?;
            let held = agent.inventory.entry(String::from("quantum-crops")).or_insert(0);
            *held = held.saturating_add(taken);
            agent.current_activity = String::from("Harvesting quantum crops");
        }
        ActionKind::Plant {
            farm,
            nutrients_used,
            crops_added,
        } => {
            let building = store.building_mut(*farm)?;
            let spent = building.resource("nutrients").min(*nutrients_used).max(0);
            building.adjust_resource("nutrients", spent.saturating_neg());
            building.adjust_resource("quantum-crops", *crops_added);
        }
        ActionKind::Trade { partner } => {
            if store.agent(*partner).is_none() {
                return Err(CityError::AgentNotFound(*partner));
            }
            let agent = store.agent_mut(agent_id)?;
            let score = (agent.relationship_with(*partner) + policy.trade_relationship_boost).min(1.0);
            agent.relationships.insert(*partner, score);
            agent.current_activity = String::from("Trading with other agents");
        }
        ActionKind::Research {
            lab,
            discovery,
            points_used,
        } => {
            let building = store.building_mut(*lab)?;
            let spent = building.resource("research-points").min(*points_used).max(0);
            building.adjust_resource("research-points", spent.saturating_neg());
            store.agent_mut(agent_id)?.current_activity = format!("Researching {discovery}");
        }
        ActionKind::Performance {
            theater,
            title,
            inspiration_used,
            ..
        } => {
            let building = store.building_mut(*theater)?;
            let spent = building.resource("inspiration").min(*inspiration_used).max(0);
            building.adjust_resource("inspiration", spent.saturating_neg());
            let agent = store.agent_mut(agent_id)?;
            agent.current_activity = format!("Performing {title}");
            boost_social_bond(agent, policy.performance_social_boost);
        }
        ActionKind::Move { to, .. } => {
            let grid = store.grid();
            let agent = store.agent_mut(agent_id)?;
            agent.position = grid.clamp(*to);
            agent.current_activity = String::from("Moving around the city");
        }
    }

    debug!(
        agent_id = %agent_id,
        activity = ?action.activity_type(),
        "action applied"
    );
    Ok(store.log_activity(
        NewActivity {
            agent_id,
            building_id: action.building_id(),
            activity_type: action.activity_type(),
            description: action.description.clone(),
            data: action.data(),
        },
        now,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use universe_city::seed_city;
    use universe_types::{ActivityType, AgentId, BuildingId, PersonalityType, Position};

    use super::*;
    use crate::testing::{add_agent, store};

    fn farm_of(city: &CityStore, owner: AgentId) -> BuildingId {
        city.owned_by(owner).first().unwrap().id
    }

    #[test]
    fn harvest_moves_crops_into_inventory() {
        let mut city = store();
        let founders = seed_city(&mut city, Utc::now()).unwrap();
        let farm = farm_of(&city, founders.alex);
        let action = CityAction {
            agent_id: founders.alex,
            kind: ActionKind::Harvest { farm, amount: 15 },
            description: String::from("harvest"),
        };
        let activity = execute(&mut city, &action, &RolePolicy::default(), Utc::now()).unwrap();
        assert_eq!(activity.activity_type, ActivityType::Harvest);
        assert_eq!(activity.building_id, Some(farm));
        assert_eq!(city.building(farm).unwrap().resource("quantum-crops"), 85);
        let alex = city.agent(founders.alex).unwrap();
        assert_eq!(alex.inventory.get("quantum-crops"), Some(&30));
        assert_eq!(alex.current_activity, "Harvesting quantum crops");
        assert_eq!(city.activity_count(), 1);
    }

    #[test]
    fn harvest_never_overdraws() {
        let mut city = store();
        let founders = seed_city(&mut city, Utc::now()).unwrap();
        let farm = farm_of(&city, founders.alex);
        city.building_mut(farm)
            .unwrap()
            .resources
            .insert(String::from("quantum-crops"), 4);
        let action = CityAction {
            agent_id: founders.alex,
            kind: ActionKind::Harvest { farm, amount: 15 },
            description: String::from("harvest"),
        };
        execute(&mut city, &action, &RolePolicy::default(), Utc::now()).unwrap();
        assert_eq!(city.building(farm).unwrap().resource("quantum-crops"), 0);
    }

    #[test]
    fn planting_spends_nutrients() {
        let mut city = store();
        let founders = seed_city(&mut city, Utc::now()).unwrap();
        let farm = farm_of(&city, founders.alex);
        let action = CityAction {
            agent_id: founders.alex,
            kind: ActionKind::Plant {
                farm,
                nutrients_used: 10,
                crops_added: 20,
            },
            description: String::from("plant"),
        };
        execute(&mut city, &action, &RolePolicy::default(), Utc::now()).unwrap();
        let building = city.building(farm).unwrap();
        assert_eq!(building.resource("nutrients"), 40);
        assert_eq!(building.resource("quantum-crops"), 120);
    }

    #[test]
    fn trade_raises_relationship_to_cap() {
        let mut city = store();
        let founders = seed_city(&mut city, Utc::now()).unwrap();
        let action = CityAction {
            agent_id: founders.zara,
            kind: ActionKind::Trade {
                partner: founders.alex,
            },
            description: String::from("trade"),
        };
        let policy = RolePolicy::default();
        for _ in 0..5 {
            execute(&mut city, &action, &policy, Utc::now()).unwrap();
        }
        let zara = city.agent(founders.zara).unwrap();
        assert!((zara.relationship_with(founders.alex) - 1.0).abs() < f64::EPSILON);
        assert_eq!(zara.current_activity, "Trading with other agents");
    }

    #[test]
    fn trade_with_unknown_partner_fails() {
        let mut city = store();
        let trader = add_agent(&mut city, PersonalityType::ManifestingGenerator, false);
        let action = CityAction {
            agent_id: trader,
            kind: ActionKind::Trade {
                partner: AgentId::new(),
            },
            description: String::from("trade"),
        };
        let err = execute(&mut city, &action, &RolePolicy::default(), Utc::now()).unwrap_err();
        assert!(matches!(err, CityError::AgentNotFound(_)));
        assert_eq!(city.activity_count(), 0);
    }

    #[test]
    fn performance_lifts_social_bond() {
        let mut city = store();
        let founders = seed_city(&mut city, Utc::now()).unwrap();
        let theater = farm_of(&city, founders.luna);
        let before = city.agent(founders.luna).unwrap().social_bond;
        let action = CityAction {
            agent_id: founders.luna,
            kind: ActionKind::Performance {
                theater,
                title: "Neural Symphony",
                audience: 0,
                inspiration_used: 20,
            },
            description: String::from("perform"),
        };
        execute(&mut city, &action, &RolePolicy::default(), Utc::now()).unwrap();
        let luna = city.agent(founders.luna).unwrap();
        assert!((luna.social_bond - (before + 0.05).min(1.0)).abs() < 1e-9);
        assert_eq!(luna.current_activity, "Performing Neural Symphony");
        assert_eq!(city.building(theater).unwrap().resource("inspiration"), 60);
    }

    #[test]
    fn move_updates_position() {
        let mut city = store();
        let id = add_agent(&mut city, PersonalityType::Reflector, false);
        let action = CityAction {
            agent_id: id,
            kind: ActionKind::Move {
                from: Position::new(0, 0),
                to: Position::new(1, 1),
            },
            description: String::from("move"),
        };
        let activity = execute(&mut city, &action, &RolePolicy::default(), Utc::now()).unwrap();
        assert_eq!(activity.building_id, None);
        assert_eq!(city.agent(id).unwrap().position, Position::new(1, 1));
    }
}
