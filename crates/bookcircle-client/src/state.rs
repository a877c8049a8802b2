//! Application state shared across all commands.
//!
//! The [`AppState`] struct is wrapped in `Arc<Mutex<>>` and handed to
//! every command; locks are held only for the synchronous store call,
//! never across a simulated delay.

use std::sync::{Arc, Mutex};

use bookcircle_store::Store;
use tokio::sync::broadcast;

use crate::config::ClientConfig;
use crate::events::AppEvent;

/// How many events a slow subscriber may lag behind before losing
/// the oldest.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Central application state: the store plus the event channel.
pub struct AppState {
    pub store: Store,
    pub config: ClientConfig,
    events: broadcast::Sender<AppEvent>,
}

/// Shared handle every command receives.
pub type SharedState = Arc<Mutex<AppState>>;

impl AppState {
    pub fn new(store: Store, config: ClientConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            config,
            events,
        }
    }

    /// Wrap into the shared handle commands expect.
    pub fn into_shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    /// Broadcast an event. Having no subscribers is not an error.
    pub fn emit(&self, event: AppEvent) {
        if self.events.send(event.clone()).is_err() {
            tracing::trace!(?event, "no event subscribers");
        }
    }
}
