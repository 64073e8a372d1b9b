//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};

use crate::loader::{
    ComponentToRender, ScheduleLoader, ScheduleQuery, UnknownComponent, UrlUpdate, ViewError,
    change_direction, change_origin, close_modal, open_origin_select, reconcile_direction,
};
use crate::sessions::SessionId;

use super::dto::*;
use super::state::AppState;
use super::templates::render_view;

/// Header carrying the page view's session id, both ways.
pub const PAGE_SESSION_HEADER: &str = "x-page-session";

/// Header telling htmx to replace the address bar URL.
pub const REPLACE_URL_HEADER: &str = "hx-replace-url";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/schedules", get(list_routes))
        .route("/schedules/:route_id/state", get(page_view_state))
        .route("/schedules/:route_id/actions", post(apply_action))
        .route("/schedules/:route_id/:component", get(render_component))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Route ids with schedule pages.
async fn list_routes(State(state): State<AppState>) -> Json<RouteListResponse> {
    let routes = state
        .pages
        .route_ids()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(RouteListResponse { routes })
}

/// Render one schedule page component as an HTML fragment.
///
/// The first request of a page view (no session header, or an expired
/// one) mounts a fresh store from the request's query parameters.
async fn render_component(
    State(state): State<AppState>,
    Path((route_id, component)): Path<(String, String)>,
    headers: HeaderMap,
    Query(query): Query<ScheduleQuery>,
) -> Result<Response, AppError> {
    let page = state.pages.get(&route_id).ok_or_else(|| AppError::NotFound {
        message: format!("Unknown route: {route_id}"),
    })?;
    let component: ComponentToRender = component.parse()?;
    let session = session_header(&headers)?.unwrap_or_default();

    let (store, fresh) = state.sessions.get_or_create(session, &route_id).await;
    let mut store = store.lock().await;
    let loader = ScheduleLoader::new(&page.data, &page.payloads, state.payload_policy);
    if fresh {
        info!(
            %session,
            route = %route_id,
            live = state.sessions.entry_count(),
            "new page view"
        );
    }
    loader.mount(&mut store, &query);

    let mut url: Vec<UrlUpdate> = Vec::new();
    let view = loader.render(component, &mut store, &mut url)?;
    drop(store);

    let html = render_view(&view).map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;

    let mut response = Html(html).into_response();
    let response_headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&session.to_string()) {
        response_headers.insert(PAGE_SESSION_HEADER, value);
    }
    if let Some(replace) = latest_url(&route_id, &url) {
        debug!(%session, url = %replace, "replacing address bar URL");
        match HeaderValue::from_str(&replace) {
            Ok(value) => {
                response_headers.insert(REPLACE_URL_HEADER, value);
            }
            Err(_) => warn!(url = %replace, "URL not representable as a header"),
        }
    }
    Ok(response)
}

/// JSON snapshot of a page view's store.
async fn page_view_state(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<StateResponse>, AppError> {
    let session = required_session(&headers)?;
    let store = state
        .sessions
        .get(session, &route_id)
        .await
        .ok_or_else(|| unknown_session(session))?;
    let store = store.lock().await;

    Ok(Json(StateResponse {
        session: session.to_string(),
        route_id,
        initialized: store.is_initialized(),
        revision: store.revision(),
        state: store.current_state(),
    }))
}

/// Apply a schedule finder interaction to a page view's store.
///
/// The returned state is reconciled against the route, so a direction the
/// route doesn't run is corrected before the client sees it.
async fn apply_action(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
    headers: HeaderMap,
    Json(action): Json<UserAction>,
) -> Result<Json<ActionResponse>, AppError> {
    let page = state.pages.get(&route_id).ok_or_else(|| AppError::NotFound {
        message: format!("Unknown route: {route_id}"),
    })?;
    let session = required_session(&headers)?;
    let store = state
        .sessions
        .get(session, &route_id)
        .await
        .ok_or_else(|| unknown_session(session))?;

    let mut store = store.lock().await;
    let mut url: Vec<UrlUpdate> = Vec::new();
    debug!(%session, ?action, "applying user action");
    match action {
        UserAction::ChangeOrigin { origin } => change_origin(&mut store, origin),
        UserAction::ChangeDirection { direction } => change_direction(&mut store, direction),
        UserAction::OpenOriginSelect => open_origin_select(&mut store),
        UserAction::CloseModal => close_modal(&mut *store, &mut url),
    }
    let current = reconcile_direction(&mut *store, &mut url, &page.data);

    Ok(Json(ActionResponse {
        state: current,
        url: latest_url(&route_id, &url),
    }))
}

/// Address bar URL after the last update, if there was one.
fn latest_url(route_id: &str, updates: &[UrlUpdate]) -> Option<String> {
    updates
        .last()
        .map(|update| update.apply_to(&format!("/schedules/{route_id}")))
}

fn session_header(headers: &HeaderMap) -> Result<Option<SessionId>, AppError> {
    headers
        .get(PAGE_SESSION_HEADER)
        .map(|value| {
            value
                .to_str()
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| AppError::BadRequest {
                    message: format!("Invalid {PAGE_SESSION_HEADER} header"),
                })
        })
        .transpose()
}

fn required_session(headers: &HeaderMap) -> Result<SessionId, AppError> {
    session_header(headers)?.ok_or_else(|| AppError::BadRequest {
        message: format!("Missing {PAGE_SESSION_HEADER} header"),
    })
}

fn unknown_session(session: SessionId) -> AppError {
    AppError::NotFound {
        message: format!("Unknown or expired page view: {session}"),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<UnknownComponent> for AppError {
    fn from(e: UnknownComponent) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<ViewError> for AppError {
    fn from(e: ViewError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
