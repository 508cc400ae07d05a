//! Tick callback that feeds the push channel.
//!
//! After each tick this callback announces buildings agents raised and
//! then pushes a `city_update` snapshot to every connected client.

use std::sync::Arc;

use tracing::debug;
use universe_city::CityStore;
use universe_core::{TickCallback, TickSummary};
use universe_observer::{AppState, city_update};
use universe_types::CityEvent;

/// Callback that bridges the tick loop to the city API.
pub struct ObserverCallback {
    state: Arc<AppState>,
}

impl ObserverCallback {
    /// Create a new observer callback backed by the given app state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl TickCallback for ObserverCallback {
    fn on_tick(&mut self, summary: &TickSummary, store: &CityStore) {
        for building in &summary.buildings_created {
            self.state
                .broadcast(CityEvent::BuildingCreated(Box::new(building.clone())));
        }

        let update = city_update(store, self.state.recent_activities);
        let receivers = self
            .state
            .broadcast(CityEvent::CityUpdate(Box::new(update)));
        debug!(tick = summary.tick, receivers, "City update sent");
    }
}
