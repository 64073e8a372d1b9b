//! Synchronization between the address bar and the store.
//!
//! On mount, the schedule-finder query parameters are read once and folded
//! into the store with a single `Initialize`. Afterwards the store is the
//! source of truth and the address bar is only written, through the
//! caller-supplied [`UrlUpdater`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{DirectionId, SelectedOrigin};
use crate::store::{Action, ModalMode, ScheduleStore, StoreValues};

/// Query parameter carrying the schedule finder's direction.
pub const FINDER_DIRECTION_PARAM: &str = "schedule_finder[direction_id]";
/// Query parameter carrying the direction view's direction.
pub const DIRECTION_VIEW_DIRECTION_PARAM: &str = "schedule_direction[direction_id]";
/// Query parameter carrying the schedule finder's origin stop.
pub const FINDER_ORIGIN_PARAM: &str = "schedule_finder[origin]";

/// Schedule page query parameters, as strings straight from the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScheduleQuery {
    #[serde(rename = "schedule_finder[direction_id]", default)]
    pub finder_direction_id: Option<String>,

    #[serde(rename = "schedule_direction[direction_id]", default)]
    pub direction_view_direction_id: Option<String>,

    #[serde(rename = "schedule_finder[origin]", default)]
    pub finder_origin: Option<String>,
}

impl ScheduleQuery {
    /// Direction requested by the URL, if any.
    ///
    /// The schedule finder's parameter wins over the direction view's.
    /// Empty values count as absent.
    pub fn direction(&self) -> Option<DirectionId> {
        let finder = self
            .finder_direction_id
            .as_deref()
            .and_then(DirectionId::from_query_value);
        finder.or_else(|| {
            self.direction_view_direction_id
                .as_deref()
                .and_then(DirectionId::from_query_value)
        })
    }

    /// Origin requested by the URL, if any. Empty values count as absent.
    pub fn origin(&self) -> Option<SelectedOrigin> {
        self.finder_origin
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(SelectedOrigin::from)
    }
}

/// Fold the URL's parameters into the store.
///
/// Must be called exactly once per page view, before the first render.
/// URL values override what the store already holds; a URL carrying both a
/// direction and an origin is a deep link into the schedule results, so
/// the modal is forced open in schedule mode.
pub fn initialize(store: &mut ScheduleStore, query: &ScheduleQuery) {
    let current = store.raw_state().clone();
    let url_direction = query.direction();
    let url_origin = query.origin();

    let (modal_open, modal_mode) = if url_direction.is_some() && url_origin.is_some() {
        (true, ModalMode::Schedule)
    } else {
        (current.modal_open, current.modal_mode)
    };

    debug!(
        ?url_direction,
        ?url_origin,
        deep_link = modal_open && !current.modal_open,
        "initializing schedule store from URL"
    );

    store.handle(Action::Initialize(StoreValues {
        selected_direction: Some(url_direction.unwrap_or(current.selected_direction)),
        selected_origin: Some(url_origin.unwrap_or(current.selected_origin)),
        modal_open: Some(modal_open),
        modal_mode: Some(modal_mode),
    }));
}

/// Writes schedule state back into the address bar.
pub trait UrlUpdater {
    /// Replace the schedule-finder parameters. An empty origin with no
    /// direction clears them.
    fn update_url(&mut self, origin: &SelectedOrigin, direction: Option<DirectionId>);
}

/// A recorded address bar update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlUpdate {
    pub origin: SelectedOrigin,
    pub direction: Option<DirectionId>,
}

impl UrlUpdate {
    /// Whether this update clears the schedule-finder parameters.
    pub fn is_clear(&self) -> bool {
        !self.origin.is_chosen() && self.direction.is_none()
    }

    /// The percent-encoded query string (without `?`) for this update.
    /// Empty when clearing.
    pub fn query_string(&self) -> String {
        let params = FinderParams {
            direction_id: self.direction.map(DirectionId::as_u8),
            origin: self.origin.stop_id(),
        };
        // A flat struct of integers and strings always serializes
        serde_urlencoded::to_string(&params).unwrap_or_default()
    }

    /// `path` with this update's query attached.
    pub fn apply_to(&self, path: &str) -> String {
        let query = self.query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }
}

/// The schedule-finder parameters as written to the address bar.
#[derive(Serialize)]
struct FinderParams<'a> {
    #[serde(rename = "schedule_finder[direction_id]", skip_serializing_if = "Option::is_none")]
    direction_id: Option<u8>,

    #[serde(rename = "schedule_finder[origin]", skip_serializing_if = "Option::is_none")]
    origin: Option<&'a str>,
}

impl UrlUpdater for Vec<UrlUpdate> {
    fn update_url(&mut self, origin: &SelectedOrigin, direction: Option<DirectionId>) {
        self.push(UrlUpdate {
            origin: origin.clone(),
            direction,
        });
    }
}

/// Close the schedule finder modal and clear its parameters from the URL.
pub fn close_modal<U: UrlUpdater + ?Sized>(store: &mut ScheduleStore, url: &mut U) {
    store.handle(Action::CloseModal);
    url.update_url(&SelectedOrigin::none(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ClientUiState;

    fn query(finder: Option<&str>, direction_view: Option<&str>, origin: Option<&str>) -> ScheduleQuery {
        ScheduleQuery {
            finder_direction_id: finder.map(str::to_string),
            direction_view_direction_id: direction_view.map(str::to_string),
            finder_origin: origin.map(str::to_string),
        }
    }

    #[test]
    fn deep_link_opens_schedule_modal() {
        let mut store = ScheduleStore::new();
        initialize(&mut store, &query(Some("0"), None, Some("place-north")));

        let state = store.current_state().unwrap();
        assert!(state.modal_open);
        assert_eq!(state.modal_mode, ModalMode::Schedule);
        assert_eq!(state.selected_direction, DirectionId::Outbound);
        assert_eq!(state.selected_origin.as_str(), "place-north");
    }

    #[test]
    fn url_direction_zero_overrides_store() {
        let mut store = ScheduleStore::with_state(ClientUiState::with_direction(DirectionId::Inbound));
        initialize(&mut store, &query(Some("0"), None, None));
        assert_eq!(
            store.current_state().unwrap().selected_direction,
            DirectionId::Outbound
        );
    }

    #[test]
    fn no_params_preserves_existing_state() {
        let existing = ClientUiState {
            selected_direction: DirectionId::Inbound,
            selected_origin: SelectedOrigin::from("place-sstat"),
            modal_open: false,
            modal_mode: ModalMode::Origin,
        };
        let mut store = ScheduleStore::with_state(existing.clone());
        initialize(&mut store, &ScheduleQuery::default());
        assert_eq!(store.current_state(), Some(existing));
    }

    #[test]
    fn direction_alone_does_not_open_modal() {
        let mut store = ScheduleStore::new();
        initialize(&mut store, &query(None, Some("1"), None));
        let state = store.current_state().unwrap();
        assert_eq!(state.selected_direction, DirectionId::Inbound);
        assert!(!state.modal_open);
    }

    #[test]
    fn origin_alone_does_not_open_modal() {
        let mut store = ScheduleStore::new();
        initialize(&mut store, &query(None, None, Some("place-north")));
        let state = store.current_state().unwrap();
        assert_eq!(state.selected_origin.as_str(), "place-north");
        assert!(!state.modal_open);
    }

    #[test]
    fn finder_direction_wins() {
        assert_eq!(
            query(Some("1"), Some("0"), None).direction(),
            Some(DirectionId::Inbound)
        );
        assert_eq!(
            query(Some(""), Some("0"), None).direction(),
            Some(DirectionId::Outbound)
        );
        assert_eq!(query(Some(""), Some(""), None).direction(), None);
    }

    #[test]
    fn empty_origin_is_absent() {
        assert_eq!(query(None, None, Some("")).origin(), None);
    }

    #[test]
    fn deserializes_bracketed_keys() {
        let q: ScheduleQuery = serde_json::from_value(serde_json::json!({
            "schedule_finder[direction_id]": "1",
            "schedule_finder[origin]": "place-north"
        }))
        .unwrap();
        assert_eq!(q.direction(), Some(DirectionId::Inbound));
        assert_eq!(q.origin(), Some(SelectedOrigin::from("place-north")));
        assert_eq!(q.direction_view_direction_id, None);
    }

    #[test]
    fn close_modal_clears_url() {
        let mut store = ScheduleStore::new();
        initialize(&mut store, &query(Some("1"), None, Some("place-north")));
        let mut updates: Vec<UrlUpdate> = Vec::new();

        close_modal(&mut store, &mut updates);

        assert!(!store.current_state().unwrap().modal_open);
        assert_eq!(
            updates,
            vec![UrlUpdate {
                origin: SelectedOrigin::none(),
                direction: None
            }]
        );
        assert!(updates[0].is_clear());
    }

    #[test]
    fn query_string_rendering() {
        let clear = UrlUpdate {
            origin: SelectedOrigin::none(),
            direction: None,
        };
        assert_eq!(clear.query_string(), "");
        assert_eq!(clear.apply_to("/schedules/Red"), "/schedules/Red");

        let full = UrlUpdate {
            origin: SelectedOrigin::from("place-north"),
            direction: Some(DirectionId::Inbound),
        };
        assert_eq!(
            full.apply_to("/schedules/Red"),
            "/schedules/Red?schedule_finder%5Bdirection_id%5D=1&schedule_finder%5Borigin%5D=place-north"
        );

        let direction_only = UrlUpdate {
            origin: SelectedOrigin::none(),
            direction: Some(DirectionId::Outbound),
        };
        assert_eq!(
            direction_only.query_string(),
            "schedule_finder%5Bdirection_id%5D=0"
        );
        assert!(!direction_only.is_clear());
    }

    #[test]
    fn origin_is_percent_encoded() {
        let update = UrlUpdate {
            origin: SelectedOrigin::from("a&schedule_finder[direction_id]=0"),
            direction: Some(DirectionId::Inbound),
        };
        let query = update.query_string();
        assert_eq!(query.matches('&').count(), 1);

        let parsed: ScheduleQuery = serde_urlencoded::from_str(&query).unwrap();
        assert_eq!(parsed.direction(), Some(DirectionId::Inbound));
        assert_eq!(
            parsed.origin(),
            Some(SelectedOrigin::from("a&schedule_finder[direction_id]=0"))
        );
    }

    #[test]
    fn encoded_url_is_ascii() {
        let update = UrlUpdate {
            origin: SelectedOrigin::from("Gare Saint-Lazare #2 é"),
            direction: None,
        };
        let url = update.apply_to("/schedules/Red");
        assert!(url.is_ascii());
        assert!(!url.contains(' '));
        assert!(!url.contains('#'));
    }
}
