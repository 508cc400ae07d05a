//! Shared application state for the city API.
//!
//! [`AppState`] holds the broadcast channel for push messages, the shared
//! [`CityStore`], and the loop control when a simulation is attached.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use universe_city::CityStore;
use universe_core::SimulationControl;
use universe_core::config::BroadcastSettings;
use universe_types::{CityEvent, CityUpdate};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for push messages.
    pub tx: broadcast::Sender<CityEvent>,
    /// The city.
    pub store: Arc<RwLock<CityStore>>,
    /// Loop control (present when the simulation is running).
    pub control: Option<Arc<SimulationControl>>,
    /// Activities included in a `city_update`.
    pub recent_activities: usize,
}

impl AppState {
    /// Create a new application state around `store`.
    pub fn new(store: Arc<RwLock<CityStore>>, settings: &BroadcastSettings) -> Self {
        let (tx, _) = broadcast::channel(settings.channel_capacity.max(1));
        Self {
            tx,
            store,
            control: None,
            recent_activities: settings.recent_activities,
        }
    }

    /// Attach the simulation loop control.
    #[must_use]
    pub fn with_control(mut self, control: Arc<SimulationControl>) -> Self {
        self.control = Some(control);
        self
    }

    /// Subscribe to the push channel.
    pub fn subscribe(&self) -> broadcast::Receiver<CityEvent> {
        self.tx.subscribe()
    }

    /// Publish a message to all connected subscribers.
    ///
    /// Returns the number of receivers, 0 when nobody is connected.
    pub fn broadcast(&self, event: CityEvent) -> usize {
        // send only fails when there are no receivers
        self.tx.send(event).unwrap_or(0)
    }
}

/// Post-tick snapshot: active agents, the newest activities, metrics, and
/// Synthia.
pub fn city_update(store: &CityStore, recent_activities: usize) -> CityUpdate {
    CityUpdate {
        agents: store.active_agents().into_iter().cloned().collect(),
        activities: store
            .recent_activities(recent_activities)
            .into_iter()
            .cloned()
            .collect(),
        metrics: store.metrics().clone(),
        synthia: store.synthia().clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use universe_city::{CityLimits, seed_city};
    use universe_types::GridSize;

    use super::*;

    fn state() -> AppState {
        let mut city = CityStore::new(GridSize::default(), CityLimits::default(), Utc::now());
        seed_city(&mut city, Utc::now()).unwrap();
        AppState::new(Arc::new(RwLock::new(city)), &BroadcastSettings::default())
    }

    #[test]
    fn broadcast_without_subscribers_is_zero() {
        assert_eq!(state().broadcast(CityEvent::greeting()), 0);
    }

    #[tokio::test]
    async fn subscribers_receive_messages() {
        let state = state();
        let mut a = state.subscribe();
        let mut b = state.subscribe();
        assert_eq!(state.broadcast(CityEvent::greeting()), 2);
        assert_eq!(a.recv().await.unwrap().kind(), "connection");
        assert_eq!(b.recv().await.unwrap().kind(), "connection");
    }

    #[tokio::test]
    async fn city_update_lists_active_agents() {
        let state = state();
        let mut city = state.store.write().await;
        let first = city.active_agent_ids().first().copied().unwrap();
        city.agent_mut(first).unwrap().is_active = false;
        let update = city_update(&city, 5);
        assert_eq!(update.agents.len(), 3);
        assert!(update.activities.len() <= 5);
    }
}
