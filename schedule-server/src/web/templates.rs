//! Askama templates for schedule page components.
//!
//! Each [`ScheduleView`] variant has a fragment template. Templates only
//! see flat view models built here, so all formatting decisions live in
//! Rust.

use askama::Template;

use crate::domain::{DirectionId, Route};
use crate::loader::{AdditionalLineInfo, DirectionView, FinderView, HoursOfOperation, ScheduleView};
use crate::schedule::{Holiday, PayloadKind, ScheduleNote, StaticMapData};
use crate::store::ModalMode;

// ============================================================================
// Fragment Templates
// ============================================================================

/// Teasers and holidays for a suspended route.
#[derive(Template)]
#[template(path = "suspended_line_info.html")]
pub struct SuspendedLineInfoTemplate {
    pub teasers: Option<String>,
    pub holidays: Vec<HolidayView>,
}

/// Full additional line information section.
#[derive(Template)]
#[template(path = "additional_line_info.html")]
pub struct AdditionalLineInfoTemplate {
    pub route_name: String,
    pub mode_name: &'static str,
    pub teasers: Option<String>,
    pub pdfs: Vec<LinkView>,
    pub connections: Vec<ConnectionGroupView>,
    pub fares: Vec<FareView>,
    pub fare_link: String,
    pub holidays: Vec<HolidayView>,
    pub hours: String,
    pub note: Option<NoteView>,
}

/// Schedule note area: subway hours plus the finder modal when open.
#[derive(Template)]
#[template(path = "schedule_note.html")]
pub struct ScheduleNoteTemplate {
    pub hours_of_operation: Option<HoursView>,
    pub finder_modal: Option<FinderPanel>,
}

/// The schedule finder.
#[derive(Template)]
#[template(path = "schedule_finder.html")]
pub struct ScheduleFinderTemplate {
    pub finder: FinderPanel,
}

/// Ferry routes: finder plus static map.
#[derive(Template)]
#[template(path = "ferry_direction.html")]
pub struct FerryDirectionTemplate {
    pub finder: FinderPanel,
    pub static_map: Option<StaticMapView>,
}

/// Route diagram for the selected direction.
#[derive(Template)]
#[template(path = "schedule_direction.html")]
pub struct ScheduleDirectionTemplate {
    pub route_id: String,
    pub direction: u8,
    pub direction_label: String,
    pub mode_name: &'static str,
    pub patterns: Vec<PatternView>,
    pub alerts: Vec<AlertView>,
    pub stops: Vec<StopRowView>,
    pub map_element_id: &'static str,
    pub map_json: Option<String>,
    pub static_map: Option<StaticMapView>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LinkView {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FareView {
    pub title: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionGroupView {
    pub group_name: String,
    pub routes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HolidayView {
    pub name: String,
    pub date: String,
}

impl HolidayView {
    fn from_holiday(holiday: &Holiday) -> Self {
        Self {
            name: holiday.name.clone(),
            date: holiday.date.format("%B %-d, %Y").to_string(),
        }
    }
}

fn holiday_views(holidays: &[Holiday]) -> Vec<HolidayView> {
    holidays.iter().map(HolidayView::from_holiday).collect()
}

/// Service summary from the schedule note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteView {
    pub peak_service: String,
    pub offpeak_service: String,
    pub exceptions: Vec<(String, String)>,
    pub alternate_text: Option<String>,
}

impl NoteView {
    fn from_note(note: &ScheduleNote) -> Self {
        Self {
            peak_service: note.peak_service.clone(),
            offpeak_service: note.offpeak_service.clone(),
            exceptions: note
                .exceptions
                .iter()
                .map(|e| (e.exception_type.clone(), e.service.clone()))
                .collect(),
            alternate_text: note.alternate_text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoursView {
    pub route_name: String,
    pub hours: String,
    pub pdfs: Vec<LinkView>,
    pub note: NoteView,
}

impl HoursView {
    fn from_hours(hours: &HoursOfOperation<'_>) -> Self {
        Self {
            route_name: hours.route.name.clone(),
            hours: hours.hours.to_string(),
            pdfs: hours
                .pdfs
                .iter()
                .map(|p| LinkView {
                    title: p.title.clone(),
                    url: p.url.clone(),
                })
                .collect(),
            note: NoteView::from_note(hours.schedule_note),
        }
    }
}

/// One `<option>` in a select.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

/// Everything the finder form needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FinderPanel {
    pub route_id: String,
    pub route_name: String,
    pub mode_name: &'static str,
    pub direction: u8,
    pub direction_label: String,
    pub directions: Vec<OptionView>,
    pub origins: Vec<OptionView>,
    pub origin_name: Option<String>,
    pub modal_open: bool,
    pub selecting_origin: bool,
    pub services_today: Vec<String>,
    pub note: Option<NoteView>,
}

impl FinderPanel {
    pub fn from_finder(finder: &FinderView<'_>) -> Self {
        let origins = finder.origin_stops();
        let origin_name = finder.origin.stop_id().map(|id| {
            origins
                .iter()
                .find(|stop| stop.id == id)
                .map_or_else(|| id.to_string(), |stop| stop.name.clone())
        });

        Self {
            route_id: finder.route.id.clone(),
            route_name: finder.route.name.clone(),
            mode_name: finder.route.mode_name(),
            direction: finder.direction.as_u8(),
            direction_label: direction_label(finder.route, finder.direction),
            directions: finder
                .directions()
                .map(|d| OptionView {
                    value: d.to_string(),
                    label: direction_label(finder.route, d),
                    selected: d == finder.direction,
                    disabled: false,
                })
                .collect(),
            origins: origins
                .iter()
                .map(|stop| OptionView {
                    value: stop.id.clone(),
                    label: stop.name.clone(),
                    selected: finder.origin.stop_id() == Some(stop.id.as_str()),
                    disabled: stop.is_closed,
                })
                .collect(),
            origin_name,
            modal_open: finder.modal_open,
            selecting_origin: finder.modal_mode == ModalMode::Origin,
            services_today: finder
                .services_today()
                .map(|s| s.description.clone())
                .collect(),
            note: finder.schedule_note.map(NoteView::from_note),
        }
    }
}

/// "Name toward Destination", falling back to whichever half is known.
pub fn direction_label(route: &Route, direction: DirectionId) -> String {
    let key = direction.to_string();
    let lookup = |names: &std::collections::BTreeMap<String, Option<String>>| {
        names.get(&key).cloned().flatten().filter(|s| !s.is_empty())
    };
    match (lookup(&route.direction_names), lookup(&route.direction_destinations)) {
        (Some(name), Some(dest)) => format!("{name} toward {dest}"),
        (Some(name), None) => name,
        (None, Some(dest)) => format!("Toward {dest}"),
        (None, None) => format!("Direction {direction}"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternView {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertView {
    pub header: String,
    pub url: Option<String>,
    pub high_priority: bool,
}

/// A stop in the route diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRowView {
    pub id: String,
    pub name: String,
    pub is_start: bool,
    pub is_branch: bool,
    pub is_merge: bool,
    pub is_terminus: bool,
}

/// Pre-rendered route map image plus its PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMapView {
    pub img_src: String,
    pub pdf_url: String,
    pub alt_text: String,
}

impl StaticMapView {
    fn from_static_map(route: &Route, map: &StaticMapData) -> Self {
        Self {
            img_src: map.img_src.clone(),
            pdf_url: map.pdf_url.clone(),
            alt_text: format!("{} route map", route.name),
        }
    }
}

impl ScheduleDirectionTemplate {
    pub fn from_direction(view: &DirectionView<'_>) -> Self {
        let tree = &view.stop_tree;
        let stops = tree
            .flatten()
            .into_iter()
            .map(|node| StopRowView {
                id: node.id.clone(),
                name: node.value.name.clone(),
                is_start: tree.is_start_node(&node.id),
                is_branch: tree.is_branch_node(&node.id),
                is_merge: tree.is_merge_node(&node.id),
                is_terminus: node.value.is_terminus,
            })
            .collect();

        let patterns = view.route_patterns();
        let patterns = patterns
            .iter()
            .enumerate()
            .map(|(i, p)| PatternView {
                id: p.id.clone(),
                name: p.name.clone(),
                selected: match view.bus_variant_id {
                    Some(variant) => variant == p.id,
                    None => i == 0,
                },
            })
            .collect();

        // Map data goes inside a <script> tag; keep it from closing the tag.
        let map_json = view
            .map_data
            .as_ref()
            .and_then(|data| serde_json::to_string(data).ok())
            .map(|json| json.replace("</", "<\\/"));

        Self {
            route_id: view.route.id.clone(),
            direction: view.direction.as_u8(),
            direction_label: direction_label(view.route, view.direction),
            mode_name: view.route.mode_name(),
            patterns,
            alerts: view
                .alerts
                .iter()
                .map(|a| AlertView {
                    header: a.header.clone(),
                    url: a.url.clone(),
                    high_priority: a.is_high_priority(),
                })
                .collect(),
            stops,
            map_element_id: PayloadKind::MapData.element_id(),
            map_json,
            static_map: view
                .static_map_data
                .as_ref()
                .map(|map| StaticMapView::from_static_map(view.route, map)),
        }
    }
}

impl AdditionalLineInfoTemplate {
    pub fn from_info(info: &AdditionalLineInfo<'_>) -> Self {
        Self {
            route_name: info.route.name.clone(),
            mode_name: info.route.mode_name(),
            teasers: info.teasers.map(str::to_string),
            pdfs: info
                .pdfs
                .iter()
                .map(|p| LinkView {
                    title: p.title.clone(),
                    url: p.url.clone(),
                })
                .collect(),
            connections: info
                .connections
                .iter()
                .map(|group| ConnectionGroupView {
                    group_name: group.group_name.clone(),
                    routes: group.routes.iter().map(|r| r.name.clone()).collect(),
                })
                .collect(),
            fares: info
                .fares
                .iter()
                .map(|f| FareView {
                    title: f.title.clone(),
                    price: f.price.clone(),
                })
                .collect(),
            fare_link: info.fare_link.to_string(),
            holidays: holiday_views(info.holidays),
            hours: info.hours.to_string(),
            note: info.schedule_note.map(NoteView::from_note),
        }
    }
}

/// Render a view to HTML. [`ScheduleView::Empty`] renders as an empty
/// string.
pub fn render_view(view: &ScheduleView<'_>) -> askama::Result<String> {
    match view {
        ScheduleView::Empty => Ok(String::new()),
        ScheduleView::SuspendedLineInfo { teasers, holidays } => SuspendedLineInfoTemplate {
            teasers: teasers.map(str::to_string),
            holidays: holiday_views(holidays),
        }
        .render(),
        ScheduleView::AdditionalLineInfo(info) => AdditionalLineInfoTemplate::from_info(info).render(),
        ScheduleView::ScheduleNote {
            hours_of_operation,
            finder_modal,
        } => ScheduleNoteTemplate {
            hours_of_operation: hours_of_operation.as_ref().map(HoursView::from_hours),
            finder_modal: finder_modal.as_ref().map(FinderPanel::from_finder),
        }
        .render(),
        ScheduleView::ScheduleFinder(finder) => ScheduleFinderTemplate {
            finder: FinderPanel::from_finder(finder),
        }
        .render(),
        ScheduleView::FerryDirection {
            finder,
            static_map_data,
        } => FerryDirectionTemplate {
            finder: FinderPanel::from_finder(finder),
            static_map: static_map_data
                .as_ref()
                .map(|map| StaticMapView::from_static_map(finder.route, map)),
        }
        .render(),
        ScheduleView::Direction(direction) => {
            ScheduleDirectionTemplate::from_direction(direction).render()
        }
    }
}
