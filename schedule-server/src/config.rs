//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::schedule::PayloadPolicy;

/// Errors from reading configuration out of the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but its value can't be used
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Configuration for the schedule page server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Directory holding `{route_id}.json` page data files.
    pub data_dir: PathBuf,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// How long an idle page view keeps its store.
    pub session_ttl: Duration,

    /// Maximum number of page view stores held at once.
    pub session_capacity: u64,

    /// How malformed embedded map payloads are handled.
    pub payload_policy: PayloadPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("static"),
            session_ttl: Duration::from_secs(30 * 60),
            session_capacity: 10_000,
            payload_policy: PayloadPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from `SCHEDULE_*` environment variables, falling
    /// back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(addr) = lookup("SCHEDULE_BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|e| ConfigError::Invalid {
                var: "SCHEDULE_BIND_ADDR",
                message: format!("{e}"),
            })?;
        }
        if let Some(dir) = lookup("SCHEDULE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("SCHEDULE_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup("SCHEDULE_SESSION_TTL_SECS") {
            let secs: u64 = secs.parse().map_err(|e| ConfigError::Invalid {
                var: "SCHEDULE_SESSION_TTL_SECS",
                message: format!("{e}"),
            })?;
            config.session_ttl = Duration::from_secs(secs);
        }
        if let Some(capacity) = lookup("SCHEDULE_SESSION_CAPACITY") {
            config.session_capacity = capacity.parse().map_err(|e| ConfigError::Invalid {
                var: "SCHEDULE_SESSION_CAPACITY",
                message: format!("{e}"),
            })?;
        }
        if let Some(policy) = lookup("SCHEDULE_PAYLOAD_POLICY") {
            config.payload_policy = policy.parse().map_err(|message| ConfigError::Invalid {
                var: "SCHEDULE_PAYLOAD_POLICY",
                message,
            })?;
        }

        Ok(config)
    }
}
