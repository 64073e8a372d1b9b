//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DirectionId, SelectedOrigin};
use crate::store::ClientUiState;

/// A user interaction posted by the schedule finder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAction {
    /// Pick (or clear) the origin stop
    ChangeOrigin {
        #[serde(default)]
        origin: SelectedOrigin,
    },

    /// Switch direction; clears the origin
    ChangeDirection { direction: DirectionId },

    /// Show the origin picker
    OpenOriginSelect,

    /// Close the finder modal
    CloseModal,
}

/// Result of applying a [`UserAction`].
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Store state after the action (absent until the page view is mounted)
    pub state: Option<ClientUiState>,

    /// New address bar URL, if the action changed it
    pub url: Option<String>,
}

/// A page view's current store state.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub session: String,
    pub route_id: String,
    pub initialized: bool,
    pub revision: u64,
    pub state: Option<ClientUiState>,
}

/// Routes with schedule pages.
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
