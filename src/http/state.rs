//! Application state for the HTTP server.

use crate::services::{DeliveryTracker, Dispatcher};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle for enqueueing accepted calculations
    pub dispatcher: Dispatcher,
    /// Per-request delivery state store
    pub tracker: DeliveryTracker,
}

impl AppState {
    /// Create a new application state.
    pub fn new(dispatcher: Dispatcher, tracker: DeliveryTracker) -> Self {
        Self {
            dispatcher,
            tracker,
        }
    }
}
