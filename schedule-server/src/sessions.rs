//! Stores for live page views.
//!
//! Every browser page view gets its own [`ScheduleStore`], keyed by a
//! random page session id and the route being viewed. Stores are dropped
//! after a period of inactivity; a request for an expired page view simply
//! starts a fresh one.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::store::ScheduleStore;

/// Identifier of one browser page view.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// A fresh random id.
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SessionId)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A page view's store, shared between the requests of that page view.
pub type SharedStore = Arc<Mutex<ScheduleStore>>;

type SessionKey = (SessionId, String);

/// Configuration for the session cache.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Idle time after which a page view's store is dropped.
    pub ttl: Duration,

    /// Maximum number of stores held.
    pub max_capacity: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Page view stores keyed by (session, route).
#[derive(Clone)]
pub struct PageSessions {
    stores: MokaCache<SessionKey, SharedStore>,
}

impl PageSessions {
    pub fn new(config: &SessionConfig) -> Self {
        let stores = MokaCache::builder()
            .time_to_idle(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self { stores }
    }

    /// The store for a page view, creating an uninitialized one if needed.
    ///
    /// Returns `true` alongside the store when it was just created, i.e.
    /// when the page view still has to be mounted.
    pub async fn get_or_create(&self, session: SessionId, route_id: &str) -> (SharedStore, bool) {
        let entry = self
            .stores
            .entry((session, route_id.to_string()))
            .or_insert_with(async { Arc::new(Mutex::new(ScheduleStore::new())) })
            .await;
        let fresh = entry.is_fresh();
        (entry.into_value(), fresh)
    }

    /// The store for an existing page view.
    pub async fn get(&self, session: SessionId, route_id: &str) -> Option<SharedStore> {
        self.stores.get(&(session, route_id.to_string())).await
    }

    /// Number of live page views (approximate).
    pub fn entry_count(&self) -> u64 {
        self.stores.entry_count()
    }
}

impl fmt::Debug for PageSessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSessions")
            .field("entry_count", &self.stores.entry_count())
            .finish()
    }
}
