//! Domain types for the schedule page.
//!
//! These types represent validated values shared by the page data, the
//! client state store and the view selector. They enforce their invariants
//! at construction time, so code that receives them can trust their
//! validity.

mod direction;
mod origin;
mod route;

pub use direction::{DirectionId, InvalidDirectionId};
pub use origin::SelectedOrigin;
pub use route::{Route, RouteMode};

#[cfg(test)]
pub(crate) use route::test_route;
