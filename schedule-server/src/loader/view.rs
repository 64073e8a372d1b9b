//! Choosing which schedule sub-view to produce.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DirectionId, Route, SelectedOrigin};
use crate::schedule::{
    Alert, EmbeddedPayloads, Fare, Holiday, MalformedPayload, MapData, PayloadPolicy, Pdf,
    RoutePattern, ScheduleNote, SchedulePageData, Service, SimpleStop, StaticMapData, StopTree,
    TypedRoutes,
};
use crate::store::{ClientUiState, ModalMode};

/// Which part of the schedule page to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentToRender {
    AdditionalLineInformation,
    ScheduleNote,
    ScheduleFinder,
    ScheduleDirection,
}

impl ComponentToRender {
    pub const ALL: [ComponentToRender; 4] = [
        ComponentToRender::AdditionalLineInformation,
        ComponentToRender::ScheduleNote,
        ComponentToRender::ScheduleFinder,
        ComponentToRender::ScheduleDirection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentToRender::AdditionalLineInformation => "ADDITIONAL_LINE_INFORMATION",
            ComponentToRender::ScheduleNote => "SCHEDULE_NOTE",
            ComponentToRender::ScheduleFinder => "SCHEDULE_FINDER",
            ComponentToRender::ScheduleDirection => "SCHEDULE_DIRECTION",
        }
    }
}

impl fmt::Display for ComponentToRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown component tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component: {0}")]
pub struct UnknownComponent(pub String);

impl FromStr for ComponentToRender {
    type Err = UnknownComponent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentToRender::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownComponent(s.to_string()))
    }
}

/// Errors from producing a view.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// An embedded map payload is present but unparseable (strict policy)
    #[error(transparent)]
    MalformedPayload(#[from] MalformedPayload),
}

/// Inputs of the schedule finder, seeded with the reconciled state.
#[derive(Debug, Clone)]
pub struct FinderView<'a> {
    pub route: &'a Route,
    pub stops: &'a BTreeMap<DirectionId, Vec<SimpleStop>>,
    pub services: &'a [Service],
    pub route_patterns_by_direction: &'a BTreeMap<DirectionId, Vec<RoutePattern>>,
    pub today: NaiveDate,
    pub schedule_note: Option<&'a ScheduleNote>,
    pub direction: DirectionId,
    pub origin: SelectedOrigin,
    pub modal_open: bool,
    pub modal_mode: ModalMode,
}

impl FinderView<'_> {
    /// Origin stops for the selected direction.
    pub fn origin_stops(&self) -> &[SimpleStop] {
        self.stops
            .get(&self.direction)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Services whose date range includes the page's service date.
    pub fn services_today(&self) -> impl Iterator<Item = &Service> + '_ {
        self.services.iter().filter(|s| s.covers(self.today))
    }

    /// Directions the rider can switch between.
    pub fn directions(&self) -> impl Iterator<Item = DirectionId> + '_ {
        self.route_patterns_by_direction.keys().copied()
    }
}

/// Hours of operation panel for subway routes.
#[derive(Debug, Clone)]
pub struct HoursOfOperation<'a> {
    pub route: &'a Route,
    pub pdfs: &'a [Pdf],
    pub hours: &'a str,
    pub schedule_note: &'a ScheduleNote,
}

/// The full "additional line information" section.
#[derive(Debug, Clone)]
pub struct AdditionalLineInfo<'a> {
    pub route: &'a Route,
    pub teasers: Option<&'a str>,
    pub pdfs: &'a [Pdf],
    pub connections: &'a [TypedRoutes],
    pub fares: &'a [Fare],
    pub fare_link: &'a str,
    pub holidays: &'a [Holiday],
    pub hours: &'a str,
    pub schedule_note: Option<&'a ScheduleNote>,
}

/// The route diagram for the selected direction.
#[derive(Debug, Clone)]
pub struct DirectionView<'a> {
    pub direction: DirectionId,
    pub route: &'a Route,
    pub route_patterns_by_direction: &'a BTreeMap<DirectionId, Vec<RoutePattern>>,
    pub map_data: Option<MapData>,
    pub static_map_data: Option<StaticMapData>,
    pub stop_tree: StopTree,
    pub alerts: &'a [Alert],
    pub bus_variant_id: Option<&'a str>,
}

impl DirectionView<'_> {
    /// Patterns running in the selected direction.
    pub fn route_patterns(&self) -> &[RoutePattern] {
        self.route_patterns_by_direction
            .get(&self.direction)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// What the loader decided to render.
#[derive(Debug, Clone)]
pub enum ScheduleView<'a> {
    /// Nothing (store not initialized, or the component doesn't apply).
    Empty,
    /// Teasers and upcoming holidays only, for suspended routes.
    SuspendedLineInfo {
        teasers: Option<&'a str>,
        holidays: &'a [Holiday],
    },
    AdditionalLineInfo(AdditionalLineInfo<'a>),
    /// Hours of operation (subway only) plus the finder modal when open.
    ScheduleNote {
        hours_of_operation: Option<HoursOfOperation<'a>>,
        finder_modal: Option<FinderView<'a>>,
    },
    ScheduleFinder(FinderView<'a>),
    /// Ferry routes get the finder and a static map instead of a diagram.
    FerryDirection {
        finder: FinderView<'a>,
        static_map_data: Option<StaticMapData>,
    },
    Direction(Box<DirectionView<'a>>),
}

impl ScheduleView<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, ScheduleView::Empty)
    }
}

fn finder_view<'a>(page: &'a SchedulePageData, state: &ClientUiState) -> FinderView<'a> {
    FinderView {
        route: &page.route,
        stops: &page.stops,
        services: &page.services,
        route_patterns_by_direction: &page.route_patterns_by_direction,
        today: page.today,
        schedule_note: page.schedule_note.as_ref(),
        direction: state.selected_direction,
        origin: state.selected_origin.clone(),
        modal_open: state.modal_open,
        modal_mode: state.modal_mode,
    }
}

/// Produce the sub-view for `component`.
///
/// `state` is the reconciled store state. Map payloads are only parsed for
/// [`ComponentToRender::ScheduleDirection`].
pub fn select_view<'a>(
    component: ComponentToRender,
    page: &'a SchedulePageData,
    state: &ClientUiState,
    payloads: &EmbeddedPayloads,
    policy: PayloadPolicy,
) -> Result<ScheduleView<'a>, ViewError> {
    let route = &page.route;

    let view = match component {
        ComponentToRender::AdditionalLineInformation => {
            if page.is_suspended() {
                ScheduleView::SuspendedLineInfo {
                    teasers: page.teasers.as_deref(),
                    holidays: &page.holidays,
                }
            } else {
                ScheduleView::AdditionalLineInfo(AdditionalLineInfo {
                    route,
                    teasers: page.teasers.as_deref(),
                    pdfs: &page.pdfs,
                    connections: &page.connections,
                    fares: &page.fares,
                    fare_link: &page.fare_link,
                    holidays: &page.holidays,
                    hours: &page.hours,
                    schedule_note: page.schedule_note.as_ref(),
                })
            }
        }

        ComponentToRender::ScheduleNote => match &page.schedule_note {
            None => ScheduleView::Empty,
            Some(note) => ScheduleView::ScheduleNote {
                hours_of_operation: route.is_subway().then(|| HoursOfOperation {
                    route,
                    pdfs: &page.pdfs,
                    hours: &page.hours,
                    schedule_note: note,
                }),
                finder_modal: state.modal_open.then(|| finder_view(page, state)),
            },
        },

        ComponentToRender::ScheduleFinder => {
            if route.is_ferry() {
                ScheduleView::Empty
            } else {
                ScheduleView::ScheduleFinder(finder_view(page, state))
            }
        }

        ComponentToRender::ScheduleDirection => {
            let static_map_data = payloads.static_map_data(policy)?;
            if route.is_ferry() {
                ScheduleView::FerryDirection {
                    finder: finder_view(page, state),
                    static_map_data,
                }
            } else {
                ScheduleView::Direction(Box::new(DirectionView {
                    direction: state.selected_direction,
                    route,
                    route_patterns_by_direction: &page.route_patterns_by_direction,
                    map_data: payloads.map_data(policy)?,
                    static_map_data,
                    stop_tree: page.stop_tree(),
                    alerts: &page.alerts,
                    bus_variant_id: page.bus_variant_id.as_deref(),
                }))
            }
        }
    };

    Ok(view)
}
