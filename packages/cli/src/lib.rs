use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod api;
pub mod auth;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError};
pub use error::{ApiResult, AppError};

use voxdesk_assistant::{AssistantApi, AssistantClient, AssistantClientConfig};
use voxdesk_auth::AuthService;
use voxdesk_storage::{Database, ProfileStorage};
use voxdesk_workflow::DashboardRegistry;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: Arc<AuthService>,
    pub dashboards: Arc<DashboardRegistry>,
}

impl AppState {
    pub fn new(
        db: Database,
        assistants: Arc<dyn AssistantApi>,
        session_ttl: chrono::Duration,
    ) -> Self {
        let profiles = Arc::new(ProfileStorage::new(db.pool().clone()));
        Self {
            auth: Arc::new(AuthService::new(&db, session_ttl)),
            dashboards: Arc::new(DashboardRegistry::new(assistants, profiles)),
            db,
        }
    }
}

/// Install the tracing subscriber (`RUST_LOG`, default `info`)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(voxdesk_config::constants::RUST_LOG)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

/// API routes plus CORS, request tracing, and the optional static site
pub fn build_app(state: AppState, config: &Config) -> Result<Router, Box<dyn std::error::Error>> {
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let mut app = api::create_router(state);
    if let Some(static_dir) = &config.static_dir {
        info!("Serving static files from {}", static_dir.display());
        app = app.fallback_service(
            ServeDir::new(static_dir).append_index_html_on_directories(true),
        );
    }

    Ok(app.layer(TraceLayer::new_for_http()).layer(cors))
}

pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = config.require_api_key()?;

    let db = Database::connect(&config.database_path).await?;
    info!("Using database at {}", config.database_path.display());

    let assistants = AssistantClient::new(
        AssistantClientConfig::new(config.vapi_base_url.as_str(), api_key)
            .with_timeout(config.vapi_timeout),
    )?;

    let state = AppState::new(
        db,
        Arc::new(assistants),
        chrono::Duration::hours(config.session_ttl_hours),
    );

    let purged = state.auth.purge_expired_sessions().await?;
    if purged > 0 {
        info!("Removed {} expired sessions", purged);
    }

    let app = build_app(state, &config)?;
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Voxdesk API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
