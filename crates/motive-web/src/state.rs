//! Application state.

use motive_core::{Relay, Revision};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<dyn Relay>,
}

impl AppState {
    pub fn new(relay: Arc<dyn Relay>) -> Self {
        Self { relay }
    }

    pub fn revision(&self) -> Revision {
        self.relay.revision()
    }
}
