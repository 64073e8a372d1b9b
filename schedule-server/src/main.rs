use schedule_server::config::ServerConfig;
use schedule_server::pages::PageRepository;
use schedule_server::sessions::{PageSessions, SessionConfig};
use schedule_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Load page data (fail fast if unavailable)
    let pages = PageRepository::load(&config.data_dir).expect("Failed to load schedule pages");

    let sessions = PageSessions::new(&SessionConfig {
        ttl: config.session_ttl,
        max_capacity: config.session_capacity,
    });
    let state = AppState::new(pages, sessions, config.payload_policy);

    let static_dir = config.static_dir.to_string_lossy();
    let app = create_router(state, &static_dir);

    info!(
        addr = %config.bind_addr,
        policy = ?config.payload_policy,
        "schedule server listening"
    );
    info!("  GET  /health                          - Health check");
    info!("  GET  /schedules                       - Routes with schedule pages");
    info!("  GET  /schedules/:route_id/:component  - Render a page component");
    info!("  GET  /schedules/:route_id/state       - Page view state");
    info!("  POST /schedules/:route_id/actions     - Schedule finder interactions");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
