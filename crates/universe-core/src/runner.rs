//! Timed simulation loop with operator controls.
//!
//! [`run_simulation`] fires [`run_tick`] on a fixed interval against the
//! shared store:
//!
//! - **Start/stop**: a stopped loop waits without ticking until started.
//! - **Single flight**: a tick that comes due while another still holds
//!   the store is skipped, never queued.
//! - **Bounded runs**: an optional tick limit ends the loop.
//! - **Shutdown**: the loop exits at the next boundary.
//!
//! A failed tick is logged and the loop carries on with the next one.
//!
//! [`run_tick`]: crate::tick::run_tick

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tokio::sync::RwLock;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use universe_city::CityStore;

use crate::control::SimulationControl;
use crate::policy::BehaviorPolicy;
use crate::tick::{self, TickSummary};

/// Why the simulation loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// The configured tick limit was reached.
    MaxTicksReached,
    /// A shutdown was requested.
    Shutdown,
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the loop ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Ticks completed by this run.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// The engine uses this to push city updates to connected clients. The
/// callback sees the store under a read lock.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, store: &CityStore);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _store: &CityStore) {}
}

/// Run the simulation loop until the tick limit or a shutdown.
pub async fn run_simulation<R: Rng + Send>(
    store: Arc<RwLock<CityStore>>,
    policy: &BehaviorPolicy,
    control: Arc<SimulationControl>,
    rng: &mut R,
    callback: &mut dyn TickCallback,
) -> SimulationResult {
    let period = Duration::from_millis(control.tick_interval_ms());
    let first = Instant::now()
        .checked_add(period)
        .unwrap_or_else(Instant::now);
    let mut interval = tokio::time::interval_at(first, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        tick_interval_ms = control.tick_interval_ms(),
        running = control.is_running(),
        "Simulation starting"
    );

    loop {
        // --- Check shutdown ---
        if control.is_shutdown_requested() {
            info!("Shutdown requested");
            return SimulationResult {
                end_reason: SimulationEndReason::Shutdown,
                final_summary: last_summary,
                total_ticks,
            };
        }

        // --- Wait while stopped ---
        if !control.is_running() {
            info!("Simulation stopped, waiting for start...");
            control.wait_until_running().await;
            interval.reset();
            continue;
        }

        tokio::select! {
            _ = interval.tick() => {}
            () = control.shutdown_requested() => continue,
        }
        if !control.is_running() {
            continue;
        }

        // --- Single flight ---
        let Some(_guard) = control.try_begin_tick() else {
            debug!("previous tick still in flight, skipping");
            continue;
        };

        // --- Execute tick ---
        let tick_number = control.completed_ticks().saturating_add(1);
        let outcome = {
            let mut city = store.write().await;
            tick::run_tick(&mut city, policy, rng, tick_number, Utc::now())
        };
        let summary = match outcome {
            Ok(summary) => summary,
            Err(e) => {
                warn!(tick = tick_number, error = %e, "tick failed, continuing");
                continue;
            }
        };

        let completed = control.record_tick();
        total_ticks = total_ticks.saturating_add(1);

        // --- Notify callback ---
        {
            let city = store.read().await;
            callback.on_tick(&summary, &city);
        }

        // --- Check tick limit ---
        if control.tick_limit_reached(completed) {
            info!(tick = summary.tick, "Tick limit reached");
            return SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            };
        }

        last_summary = Some(summary);
    }
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            population = summary.metrics.population,
            buildings = summary.metrics.buildings_count,
            collective_intelligence = summary.metrics.collective_intelligence,
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use universe_city::seed_city;

    use super::*;
    use crate::testing::store;

    fn seeded_store() -> Arc<RwLock<CityStore>> {
        let mut city = store();
        seed_city(&mut city, Utc::now()).unwrap();
        Arc::new(RwLock::new(city))
    }

    struct CountCallback {
        count: u64,
    }

    impl TickCallback for CountCallback {
        fn on_tick(&mut self, _summary: &TickSummary, _store: &CityStore) {
            self.count = self.count.saturating_add(1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_by_max_ticks() {
        let city = seeded_store();
        let control = Arc::new(SimulationControl::new(3000, 5));
        let mut rng = StdRng::seed_from_u64(7);
        let mut cb = CountCallback { count: 0 };

        let result = run_simulation(
            Arc::clone(&city),
            &BehaviorPolicy::default(),
            Arc::clone(&control),
            &mut rng,
            &mut cb,
        )
        .await;

        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(cb.count, 5);
        assert_eq!(control.completed_ticks(), 5);
        assert_eq!(result.final_summary.unwrap().tick, 5);
        assert_eq!(city.read().await.metrics().population, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_before_first_tick() {
        let control = Arc::new(SimulationControl::new(3000, 0));
        control.request_shutdown();
        let mut rng = StdRng::seed_from_u64(8);

        let result = run_simulation(
            seeded_store(),
            &BehaviorPolicy::default(),
            control,
            &mut rng,
            &mut NoOpCallback,
        )
        .await;

        assert_eq!(result.end_reason, SimulationEndReason::Shutdown);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_loop_does_not_tick() {
        let control = Arc::new(SimulationControl::new(100, 0));
        control.stop();
        let handle = {
            let control = Arc::clone(&control);
            tokio::spawn(async move {
                let mut rng = StdRng::seed_from_u64(9);
                let policy = BehaviorPolicy::default();
                run_simulation(
                    seeded_store(),
                    &policy,
                    control,
                    &mut rng,
                    &mut NoOpCallback,
                )
                .await
            })
        };

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(control.completed_ticks(), 0);

        control.start();
        tokio::time::sleep(Duration::from_millis(350)).await;
        control.request_shutdown();
        let result = handle.await.unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::Shutdown);
        assert!(result.total_ticks >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_in_flight_is_skipped() {
        let control = Arc::new(SimulationControl::new(100, 0));
        let guard = control.try_begin_tick();
        assert!(guard.is_some());

        let handle = {
            let control = Arc::clone(&control);
            tokio::spawn(async move {
                let mut rng = StdRng::seed_from_u64(10);
                let policy = BehaviorPolicy::default();
                run_simulation(
                    seeded_store(),
                    &policy,
                    control,
                    &mut rng,
                    &mut NoOpCallback,
                )
                .await
            })
        };

        tokio::time::sleep(Duration::from_millis(1050)).await;
        assert_eq!(control.completed_ticks(), 0);
        drop(guard);

        control.request_shutdown();
        let result = handle.await.unwrap();
        assert_eq!(result.total_ticks, 0);
    }
}
