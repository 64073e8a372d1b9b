//! Client UI state and partial-state patches.

use serde::{Deserialize, Serialize};

use crate::domain::{DirectionId, SelectedOrigin};

/// Which flow the schedule finder modal shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalMode {
    /// Picking an origin stop.
    Origin,
    /// Showing schedules from the chosen origin.
    #[default]
    Schedule,
}

/// Transient UI state of one schedule page view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUiState {
    pub selected_direction: DirectionId,
    pub selected_origin: SelectedOrigin,
    pub modal_open: bool,
    pub modal_mode: ModalMode,
}

impl ClientUiState {
    /// Default state with a preselected direction.
    pub fn with_direction(direction: DirectionId) -> Self {
        Self {
            selected_direction: direction,
            ..Default::default()
        }
    }

    /// Shallow-merge a patch: every field present in the patch replaces
    /// the current value.
    pub fn merge(&mut self, patch: StoreValues) {
        if let Some(direction) = patch.selected_direction {
            self.selected_direction = direction;
        }
        if let Some(origin) = patch.selected_origin {
            self.selected_origin = origin;
        }
        if let Some(open) = patch.modal_open {
            self.modal_open = open;
        }
        if let Some(mode) = patch.modal_mode {
            self.modal_mode = mode;
        }
    }
}

/// A partial state patch. Absent fields leave the state untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_direction: Option<DirectionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_origin: Option<SelectedOrigin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal_mode: Option<ModalMode>,
}
