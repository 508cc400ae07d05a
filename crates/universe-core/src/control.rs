//! Operator control of the simulation loop.
//!
//! [`SimulationControl`] is shared (behind an [`Arc`](std::sync::Arc))
//! between the loop task and the HTTP handlers. The operator can stop the
//! loop and start it again, and the process can request a final shutdown.
//! Atomic fields keep the loop's hot path lock-free.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::Notify;

/// Shared control state of the simulation loop.
#[derive(Debug)]
pub struct SimulationControl {
    /// Whether ticks are currently firing.
    running: AtomicBool,

    /// Wakes the loop when the simulation is started again.
    start_notify: Notify,

    /// Whether the loop should exit.
    shutdown_requested: AtomicBool,

    /// Wakes the loop on shutdown.
    shutdown_notify: Notify,

    /// Set while a tick holds the store.
    in_flight: AtomicBool,

    /// Milliseconds between ticks.
    tick_interval_ms: u64,

    /// Stop after this many completed ticks (0 = unlimited).
    max_ticks: u64,

    /// Ticks completed so far.
    completed_ticks: AtomicU64,
}

/// Snapshot of the loop state for the operator API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlStatus {
    /// Whether ticks are firing.
    pub running: bool,
    /// Ticks completed.
    pub completed_ticks: u64,
    /// Milliseconds between ticks.
    pub tick_interval_ms: u64,
}

/// Releases the single-flight flag when dropped.
#[derive(Debug)]
pub struct TickGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl SimulationControl {
    /// A running loop with the given interval and tick bound.
    pub fn new(tick_interval_ms: u64, max_ticks: u64) -> Self {
        Self {
            running: AtomicBool::new(true),
            start_notify: Notify::new(),
            shutdown_requested: AtomicBool::new(false),
            shutdown_notify: Notify::new(),
            in_flight: AtomicBool::new(false),
            tick_interval_ms: tick_interval_ms.max(1),
            max_ticks,
            completed_ticks: AtomicU64::new(0),
        }
    }

    // -----------------------------------------------------------------------
    // Start / Stop
    // -----------------------------------------------------------------------

    /// Whether ticks are firing.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Start firing ticks. Returns `false` if already running.
    pub fn start(&self) -> bool {
        let was_running = self.running.swap(true, Ordering::AcqRel);
        if !was_running {
            self.start_notify.notify_waiters();
        }
        !was_running
    }

    /// Stop firing ticks. Returns `false` if already stopped.
    pub fn stop(&self) -> bool {
        self.running.swap(false, Ordering::AcqRel)
    }

    /// Wait until the simulation is running or a shutdown is requested.
    pub async fn wait_until_running(&self) {
        loop {
            let started = self.start_notify.notified();
            let shutdown = self.shutdown_notify.notified();
            tokio::pin!(started, shutdown);
            started.as_mut().enable();
            shutdown.as_mut().enable();
            if self.is_running() || self.is_shutdown_requested() {
                return;
            }
            tokio::select! {
                () = started => {}
                () = shutdown => {}
            }
        }
    }

    // -----------------------------------------------------------------------
    // Shutdown
    // -----------------------------------------------------------------------

    /// Ask the loop to exit.
    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::Release);
        self.shutdown_notify.notify_waiters();
    }

    /// Whether a shutdown has been requested.
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Resolves once a shutdown is requested.
    ///
    /// Any number of tasks may wait on this at once.
    pub async fn shutdown_requested(&self) {
        loop {
            let notified = self.shutdown_notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_shutdown_requested() {
                return;
            }
            notified.await;
        }
    }

    // -----------------------------------------------------------------------
    // Ticks
    // -----------------------------------------------------------------------

    /// Claim the single tick slot. `None` while another tick is running.
    pub fn try_begin_tick(&self) -> Option<TickGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TickGuard {
                flag: &self.in_flight,
            })
    }

    /// Record a completed tick and return the new count.
    pub fn record_tick(&self) -> u64 {
        self.completed_ticks
            .fetch_add(1, Ordering::AcqRel)
            .saturating_add(1)
    }

    /// Ticks completed so far.
    pub fn completed_ticks(&self) -> u64 {
        self.completed_ticks.load(Ordering::Acquire)
    }

    /// Milliseconds between ticks.
    pub const fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Whether `completed` reached the configured bound.
    pub const fn tick_limit_reached(&self, completed: u64) -> bool {
        self.max_ticks > 0 && completed >= self.max_ticks
    }

    /// Snapshot for the operator API.
    pub fn status(&self) -> ControlStatus {
        ControlStatus {
            running: self.is_running(),
            completed_ticks: self.completed_ticks(),
            tick_interval_ms: self.tick_interval_ms,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn single_flight_guard() {
        let control = SimulationControl::new(100, 0);
        let guard = control.try_begin_tick();
        assert!(guard.is_some());
        assert!(control.try_begin_tick().is_none());
        drop(guard);
        assert!(control.try_begin_tick().is_some());
    }

    #[test]
    fn start_and_stop_report_transitions() {
        let control = SimulationControl::new(100, 0);
        assert!(control.is_running());
        assert!(!control.start());
        assert!(control.stop());
        assert!(!control.stop());
        assert!(!control.is_running());
        assert!(control.start());
    }

    #[test]
    fn tick_limit() {
        let control = SimulationControl::new(100, 3);
        assert!(!control.tick_limit_reached(2));
        assert!(control.tick_limit_reached(3));
        assert!(!SimulationControl::new(100, 0).tick_limit_reached(u64::MAX));
    }

    #[test]
    fn zero_interval_is_raised() {
        assert_eq!(SimulationControl::new(0, 0).tick_interval_ms(), 1);
    }

    #[tokio::test]
    async fn shutdown_wakes_stopped_loop() {
        let control = std::sync::Arc::new(SimulationControl::new(100, 0));
        control.stop();
        let waiter = {
            let control = std::sync::Arc::clone(&control);
            tokio::spawn(async move { control.wait_until_running().await })
        };
        control.request_shutdown();
        waiter.await.unwrap();
        assert!(control.is_shutdown_requested());
    }
}
