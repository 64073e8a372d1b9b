//! User interactions forwarded from the schedule finder.

use crate::domain::{DirectionId, SelectedOrigin};
use crate::store::{Action, ModalMode, ScheduleStore};

/// The rider picked an origin (or cleared it).
///
/// Reopens the modal on the results when an origin was chosen, or on the
/// origin picker when it was cleared.
pub fn change_origin(store: &mut ScheduleStore, origin: SelectedOrigin) {
    let mode = if origin.is_chosen() {
        ModalMode::Schedule
    } else {
        ModalMode::Origin
    };
    store.handle(Action::ChangeOrigin { origin });
    store.handle(Action::OpenModal { mode });
}

/// The rider switched direction. Any chosen origin is dropped.
pub fn change_direction(store: &mut ScheduleStore, direction: DirectionId) {
    store.handle(Action::ChangeDirection {
        direction,
        origin: SelectedOrigin::none(),
    });
}

/// The rider asked to pick an origin.
pub fn open_origin_select(store: &mut ScheduleStore) {
    store.handle(Action::OpenModal {
        mode: ModalMode::Origin,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreValues;

    fn store() -> ScheduleStore {
        let mut store = ScheduleStore::new();
        store.handle(Action::Initialize(StoreValues::default()));
        store
    }

    #[test]
    fn choosing_origin_opens_results() {
        let mut store = store();
        change_origin(&mut store, SelectedOrigin::from("place-north"));
        let state = store.current_state().unwrap();
        assert_eq!(state.selected_origin.as_str(), "place-north");
        assert!(state.modal_open);
        assert_eq!(state.modal_mode, ModalMode::Schedule);
    }

    #[test]
    fn clearing_origin_opens_picker() {
        let mut store = store();
        change_origin(&mut store, SelectedOrigin::from("place-north"));
        change_origin(&mut store, SelectedOrigin::none());
        let state = store.current_state().unwrap();
        assert!(!state.selected_origin.is_chosen());
        assert!(state.modal_open);
        assert_eq!(state.modal_mode, ModalMode::Origin);
    }

    #[test]
    fn changing_direction_drops_origin() {
        let mut store = store();
        change_origin(&mut store, SelectedOrigin::from("place-north"));
        change_direction(&mut store, DirectionId::Inbound);
        let state = store.current_state().unwrap();
        assert_eq!(state.selected_direction, DirectionId::Inbound);
        assert!(!state.selected_origin.is_chosen());
        // The modal is left as it was
        assert!(state.modal_open);
    }

    #[test]
    fn origin_select_opens_picker() {
        let mut store = store();
        open_origin_select(&mut store);
        let state = store.current_state().unwrap();
        assert!(state.modal_open);
        assert_eq!(state.modal_mode, ModalMode::Origin);
    }
}
