//! Web layer for the schedule page.
//!
//! Serves schedule page components as HTML fragments and accepts the
//! schedule finder's interactions, one store per page view.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, PAGE_SESSION_HEADER, REPLACE_URL_HEADER, create_router};
pub use state::AppState;
pub use templates::render_view;
