//! Property tests: city invariants hold across random tick sequences.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use chrono::{Duration, Utc};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use universe_city::{CityLimits, CityStore, random_agent, seed_city};
use universe_core::BehaviorPolicy;
use universe_core::run_tick;
use universe_types::{BuildingType, GridSize, ModuleKind};

fn eager_policy(build_chance: f64) -> BehaviorPolicy {
    let mut policy = BehaviorPolicy::default();
    policy.build.scientist_chance = build_chance;
    policy.build.commanded_chance = build_chance;
    policy.build.reflector_chance = build_chance;
    policy.build.reflector_lonely_chance = build_chance;
    policy.build.cooldown_secs = 0;
    policy
}

fn check_invariants(city: &CityStore, policy: &BehaviorPolicy) {
    let limits = city.limits();
    let grid = city.grid();

    for agent in city.agents() {
        assert!((0.0..=1.0).contains(&agent.consciousness), "{}", agent.name);
        assert!((0.0..=1.0).contains(&agent.social_bond), "{}", agent.name);
        assert!((0.0..=100.0).contains(&agent.happiness), "{}", agent.name);
        assert!((0.0..=100.0).contains(&agent.resources), "{}", agent.name);
        assert!(agent.memory_stream.len() <= limits.memory_capacity);
        assert!(grid.contains(agent.position), "{} off grid", agent.name);
        assert!(
            agent.relationships.values().all(|r| (0.0..=1.0).contains(r)),
            "{} relationship out of range",
            agent.name
        );
        assert!(
            city.owned_by(agent.id).len() <= city.limits().ownership_quota(agent.is_scientist),
            "{} over ownership quota",
            agent.name
        );
    }

    for building in city.buildings() {
        assert!(
            building.resources.values().all(|v| *v >= 0),
            "{} has negative stock",
            building.name
        );
    }

    for building_type in BuildingType::ALL {
        assert!(city.count_type(building_type) <= policy.build.quotas.for_type(building_type));
    }
    for kind in ModuleKind::ALL {
        assert!(city.count_module(kind) <= policy.build.quotas.for_module(kind));
    }

    assert!(city.activity_count() <= limits.activity_capacity);

    let metrics = city.metrics();
    assert_eq!(metrics.population, city.active_agents().len());
    assert_eq!(metrics.buildings_count, city.building_count());
    assert!(metrics.cultural_harmony >= 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn invariants_hold_across_ticks(
        seed in any::<u64>(),
        extra_agents in 0usize..6,
        ticks in 10u64..25,
        build_chance in prop_oneof![Just(0.0), Just(0.5), Just(1.0)],
        small_log in any::<bool>(),
    ) {
        let limits = if small_log {
            CityLimits { memory_capacity: 3, activity_capacity: 20, ..CityLimits::default() }
        } else {
            CityLimits::default()
        };
        let start = Utc::now();
        let mut city = CityStore::new(GridSize::default(), limits, start);
        seed_city(&mut city, start).unwrap();

        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..extra_agents {
            let new = random_agent(&mut rng, city.grid(), start);
            city.insert_agent(new, start).unwrap();
        }

        let policy = eager_policy(build_chance);
        for tick in 1..=ticks {
            let now = start + Duration::seconds(i64::try_from(tick).unwrap() * 3);
            let summary = run_tick(&mut city, &policy, &mut rng, tick, now).unwrap();
            prop_assert_eq!(summary.tick, tick);
            prop_assert_eq!(&summary.metrics, city.metrics());
        }

        check_invariants(&city, &policy);
    }
}

#[test]
fn long_run_with_defaults_keeps_invariants() {
    let start = Utc::now();
    let mut city = CityStore::new(GridSize::default(), CityLimits::default(), start);
    seed_city(&mut city, start).unwrap();
    let policy = BehaviorPolicy::default();
    let mut rng = StdRng::seed_from_u64(2024);

    for tick in 1..=200 {
        let now = start + Duration::seconds(tick * 3);
        run_tick(&mut city, &policy, &mut rng, tick.unsigned_abs(), now).unwrap();
    }

    check_invariants(&city, &policy);
    assert!(city.activity_count() > 0);
}
