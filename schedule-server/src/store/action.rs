//! Store actions.

use std::fmt;

use crate::domain::{DirectionId, SelectedOrigin};

use super::state::{ModalMode, StoreValues};

/// A state transition request.
///
/// Each variant carries its own payload; [`Action::patch`] turns it into
/// the partial state that the store shallow-merges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The rider picked (or cleared) an origin stop.
    ChangeOrigin { origin: SelectedOrigin },
    /// The selected direction changed. The origin is set alongside it,
    /// since an origin only makes sense for one direction.
    ChangeDirection {
        direction: DirectionId,
        origin: SelectedOrigin,
    },
    /// Open the schedule finder modal in the given mode.
    OpenModal { mode: ModalMode },
    /// Close the schedule finder modal.
    CloseModal,
    /// One-shot hydration when the page view mounts.
    Initialize(StoreValues),
}

impl Action {
    /// Wire tag of the action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::ChangeOrigin { .. } => ActionKind::ChangeOrigin,
            Action::ChangeDirection { .. } => ActionKind::ChangeDirection,
            Action::OpenModal { .. } => ActionKind::OpenModal,
            Action::CloseModal => ActionKind::CloseModal,
            Action::Initialize(_) => ActionKind::Initialize,
        }
    }

    /// The partial state this action merges into the store.
    pub fn patch(&self) -> StoreValues {
        match self {
            Action::ChangeOrigin { origin } => StoreValues {
                selected_origin: Some(origin.clone()),
                ..Default::default()
            },
            Action::ChangeDirection { direction, origin } => StoreValues {
                selected_direction: Some(*direction),
                selected_origin: Some(origin.clone()),
                ..Default::default()
            },
            Action::OpenModal { mode } => StoreValues {
                modal_open: Some(true),
                modal_mode: Some(*mode),
                ..Default::default()
            },
            Action::CloseModal => StoreValues {
                modal_open: Some(false),
                ..Default::default()
            },
            Action::Initialize(values) => values.clone(),
        }
    }
}

/// Action tags, as named by the page scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    ChangeOrigin,
    ChangeDirection,
    OpenModal,
    CloseModal,
    Initialize,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::ChangeOrigin => "CHANGE_ORIGIN",
            ActionKind::ChangeDirection => "CHANGE_DIRECTION",
            ActionKind::OpenModal => "OPEN_MODAL",
            ActionKind::CloseModal => "CLOSE_MODAL",
            ActionKind::Initialize => "INITIALIZE",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Action::CloseModal.kind().to_string(), "CLOSE_MODAL");
        assert_eq!(
            Action::Initialize(StoreValues::default()).kind().as_str(),
            "INITIALIZE"
        );
        assert_eq!(
            Action::OpenModal {
                mode: ModalMode::Origin
            }
            .kind(),
            ActionKind::OpenModal
        );
    }

    #[test]
    fn open_and_close_set_visibility() {
        let open = Action::OpenModal {
            mode: ModalMode::Origin,
        }
        .patch();
        assert_eq!(open.modal_open, Some(true));
        assert_eq!(open.modal_mode, Some(ModalMode::Origin));
        assert_eq!(open.selected_direction, None);

        let close = Action::CloseModal.patch();
        assert_eq!(close.modal_open, Some(false));
        assert_eq!(close.modal_mode, None);
    }

    #[test]
    fn change_direction_sets_origin_too() {
        let patch = Action::ChangeDirection {
            direction: DirectionId::Inbound,
            origin: SelectedOrigin::none(),
        }
        .patch();
        assert_eq!(patch.selected_direction, Some(DirectionId::Inbound));
        assert_eq!(patch.selected_origin, Some(SelectedOrigin::none()));
        assert_eq!(patch.modal_open, None);
    }

    #[test]
    fn change_origin_touches_only_origin() {
        let patch = Action::ChangeOrigin {
            origin: SelectedOrigin::from("place-north"),
        }
        .patch();
        assert_eq!(
            patch,
            StoreValues {
                selected_origin: Some(SelectedOrigin::from("place-north")),
                ..Default::default()
            }
        );
    }
}
