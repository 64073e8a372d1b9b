//! Application state for the web layer.

use std::sync::Arc;

use crate::pages::PageRepository;
use crate::schedule::PayloadPolicy;
use crate::sessions::PageSessions;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Schedule pages by route id
    pub pages: Arc<PageRepository>,

    /// Live page view stores
    pub sessions: PageSessions,

    /// How malformed map payloads are handled
    pub payload_policy: PayloadPolicy,
}

impl AppState {
    /// Create a new app state.
    pub fn new(pages: PageRepository, sessions: PageSessions, payload_policy: PayloadPolicy) -> Self {
        Self {
            pages: Arc::new(pages),
            sessions,
            payload_policy,
        }
    }
}
