//! Schedule page loader.
//!
//! Ties a page view's store to the route's page data:
//!
//! - [`url`] reads the schedule-finder query parameters once on mount and
//!   writes state back to the address bar,
//! - [`reconcile`] keeps the selected direction valid for the route,
//! - [`view`] picks the sub-view for a requested component,
//! - [`callbacks`] handle the finder's user interactions.
//!
//! The hosting controller calls [`ScheduleLoader::mount`] once per page view
//! and then [`ScheduleLoader::render`] for each component on the page.

pub mod callbacks;
pub mod reconcile;
pub mod url;
pub mod view;

use tracing::debug;

use crate::schedule::{EmbeddedPayloads, PayloadPolicy, SchedulePageData};
use crate::store::ScheduleStore;

pub use callbacks::{change_direction, change_origin, open_origin_select};
pub use reconcile::reconcile_direction;
pub use url::{ScheduleQuery, UrlUpdate, UrlUpdater, close_modal, initialize};
pub use view::{
    AdditionalLineInfo, ComponentToRender, DirectionView, FinderView, HoursOfOperation,
    ScheduleView, UnknownComponent, ViewError, select_view,
};

/// Renders one route's schedule page components.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleLoader<'a> {
    page: &'a SchedulePageData,
    payloads: &'a EmbeddedPayloads,
    policy: PayloadPolicy,
}

impl<'a> ScheduleLoader<'a> {
    pub fn new(
        page: &'a SchedulePageData,
        payloads: &'a EmbeddedPayloads,
        policy: PayloadPolicy,
    ) -> Self {
        Self {
            page,
            payloads,
            policy,
        }
    }

    /// Hydrate the store from the URL. Only the first call for a store has
    /// any effect; returns whether this call initialized it.
    pub fn mount(&self, store: &mut ScheduleStore, query: &ScheduleQuery) -> bool {
        if store.is_initialized() {
            debug!(route = %self.page.route.id, "store already mounted, ignoring URL");
            return false;
        }
        initialize(store, query);
        true
    }

    /// Render `component` against the store's current state.
    ///
    /// Before the store is mounted this is always [`ScheduleView::Empty`].
    /// Rendering may correct the store's direction (see
    /// [`reconcile_direction`]), in which case `url` is told.
    pub fn render<U: UrlUpdater + ?Sized>(
        &self,
        component: ComponentToRender,
        store: &mut ScheduleStore,
        url: &mut U,
    ) -> Result<ScheduleView<'a>, ViewError> {
        let Some(state) = reconcile_direction(store, url, self.page) else {
            debug!(%component, "store not initialized, rendering nothing");
            return Ok(ScheduleView::Empty);
        };

        select_view(component, self.page, &state, self.payloads, self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DirectionId, SelectedOrigin};
    use crate::schedule::fixtures::page;
    use crate::store::ModalMode;

    fn deep_link() -> ScheduleQuery {
        ScheduleQuery {
            finder_direction_id: Some("0".to_string()),
            direction_view_direction_id: None,
            finder_origin: Some("place-north".to_string()),
        }
    }

    #[test]
    fn empty_before_mount() {
        let page = page(3, &[DirectionId::Outbound, DirectionId::Inbound]);
        let payloads = EmbeddedPayloads::default();
        let loader = ScheduleLoader::new(&page, &payloads, PayloadPolicy::Strict);
        let mut store = ScheduleStore::new();
        let mut url: Vec<UrlUpdate> = Vec::new();

        for component in ComponentToRender::ALL {
            let view = loader.render(component, &mut store, &mut url).unwrap();
            assert!(view.is_empty(), "{component} rendered before mount");
        }
        assert!(url.is_empty());
    }

    #[test]
    fn mount_runs_once() {
        let page = page(3, &[DirectionId::Outbound, DirectionId::Inbound]);
        let payloads = EmbeddedPayloads::default();
        let loader = ScheduleLoader::new(&page, &payloads, PayloadPolicy::Strict);
        let mut store = ScheduleStore::new();

        assert!(loader.mount(&mut store, &deep_link()));
        close_modal(&mut store, &mut Vec::<UrlUpdate>::new());
        assert!(!loader.mount(&mut store, &deep_link()));

        // The second mount didn't reopen the modal
        assert!(!store.current_state().unwrap().modal_open);
    }

    #[test]
    fn deep_link_onto_unidirectional_route() {
        // Only direction 1 exists; the URL asks for direction 0
        let page = page(3, &[DirectionId::Inbound]);
        let payloads = EmbeddedPayloads::default();
        let loader = ScheduleLoader::new(&page, &payloads, PayloadPolicy::Strict);
        let mut store = ScheduleStore::new();
        let mut url: Vec<UrlUpdate> = Vec::new();

        loader.mount(&mut store, &deep_link());
        let view = loader
            .render(ComponentToRender::ScheduleFinder, &mut store, &mut url)
            .unwrap();

        match view {
            ScheduleView::ScheduleFinder(finder) => {
                assert_eq!(finder.direction, DirectionId::Inbound);
                assert_eq!(finder.origin.as_str(), "place-north");
                assert!(finder.modal_open);
                assert_eq!(finder.modal_mode, ModalMode::Schedule);
            }
            other => panic!("expected finder, got {other:?}"),
        }
        assert_eq!(
            url,
            vec![UrlUpdate {
                origin: SelectedOrigin::from("place-north"),
                direction: Some(DirectionId::Inbound),
            }]
        );

        // Later components see the corrected state without another update
        loader
            .render(ComponentToRender::ScheduleDirection, &mut store, &mut url)
            .unwrap();
        assert_eq!(url.len(), 1);
    }
}
