//! Schedule page data.
//!
//! Everything here is produced by the server-rendered page and is
//! read-only to the loader: the route's [`SchedulePageData`] snapshot, the
//! stop tree used for branching route diagrams, and the optional map
//! payloads embedded alongside the page.

mod content;
mod map_data;
mod page;
mod stop_tree;

pub use content::{Alert, Fare, Holiday, Pdf, ScheduleNote, ServiceException, TypedRoutes};
pub use map_data::{
    EmbeddedPayloads, LatLng, MalformedPayload, MapData, Marker, PayloadKind, PayloadPolicy,
    Polyline, StaticMapData,
};
pub use page::{RoutePattern, SchedulePageData, Service, SimpleStop};
pub use stop_tree::{RouteStop, StopId, StopTree, StopTreeData, StopTreeEdges, StopTreeNode};

#[cfg(test)]
pub(crate) use page::fixtures;
