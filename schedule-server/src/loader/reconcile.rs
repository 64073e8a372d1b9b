//! Keeping the selected direction valid for the route.
//!
//! Some routes only run in one direction (or are suspended entirely). After
//! the store is hydrated from the URL, or when the page switches route, the
//! selected direction may not exist on the route; the reconciler moves it
//! to one that does.

use tracing::info;

use crate::schedule::SchedulePageData;
use crate::store::{Action, ClientUiState, ScheduleStore};

use super::url::UrlUpdater;

/// Bring the store's direction in line with the route's patterns and
/// return the state to render with.
///
/// Returns `None` while the store is uninitialized. Suspended routes have
/// no valid direction and are left untouched. Otherwise, when the selected
/// direction has no patterns, the lowest direction that does is selected
/// in the store and written to the URL together with the current origin.
/// A second call after a correction is a no-op.
pub fn reconcile_direction<U: UrlUpdater + ?Sized>(
    store: &mut ScheduleStore,
    url: &mut U,
    page: &SchedulePageData,
) -> Option<ClientUiState> {
    let state = store.current_state()?;

    if page.is_suspended() || page.has_direction(state.selected_direction) {
        return Some(state);
    }

    // Non-empty, so there is a first key
    let corrected = page.available_directions().next()?;

    info!(
        route = %page.route.id,
        from = %state.selected_direction,
        to = %corrected,
        "selected direction not served by route, correcting"
    );

    store.handle(Action::ChangeDirection {
        direction: corrected,
        origin: state.selected_origin.clone(),
    });
    url.update_url(&state.selected_origin, Some(corrected));

    store.current_state()
}
