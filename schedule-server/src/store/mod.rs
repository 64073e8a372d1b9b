//! Client state store for one schedule page view.
//!
//! The store holds transient UI state (selected direction and origin, modal
//! visibility and mode) and exposes a single transition entry point,
//! [`ScheduleStore::handle`]. Each page view owns its own store; nothing is
//! shared process-wide.
//!
//! A store starts out *uninitialized*: it carries a defaulted state so that
//! actions always have something to merge into, but
//! [`ScheduleStore::current_state`] reports nothing until the page view has
//! been mounted with an [`Action::Initialize`].

mod action;
mod state;

use tracing::debug;

pub use action::{Action, ActionKind};
pub use state::{ClientUiState, ModalMode, StoreValues};

/// Owned, injectable state container for a page view.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    state: ClientUiState,
    initialized: bool,
    revision: u64,
}

impl ScheduleStore {
    /// A store with default state, not yet initialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with pre-existing state, not yet initialized.
    ///
    /// The seeded values survive initialization unless the URL overrides
    /// them.
    pub fn with_state(state: ClientUiState) -> Self {
        Self {
            state,
            initialized: false,
            revision: 0,
        }
    }

    /// Apply an action. No action is rejected.
    pub fn handle(&mut self, action: Action) {
        let kind = action.kind();
        self.state.merge(action.patch());
        if kind == ActionKind::Initialize {
            self.initialized = true;
        }
        self.revision += 1;

        debug!(
            action = %kind,
            revision = self.revision,
            direction = %self.state.selected_direction,
            origin = %self.state.selected_origin,
            modal_open = self.state.modal_open,
            "schedule store updated"
        );
    }

    /// Snapshot of the current state, or `None` before initialization.
    pub fn current_state(&self) -> Option<ClientUiState> {
        self.initialized.then(|| self.state.clone())
    }

    /// The state as it stands, initialized or not. Used to seed
    /// initialization.
    pub fn raw_state(&self) -> &ClientUiState {
        &self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of actions handled so far. Changes whenever the state may
    /// have changed, so views can tell when to re-render.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
