use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, ExpiredDeletion, SessionManagerLayer, cookie::SameSite};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod assets;
mod case_studies;
mod contact;
mod error;
mod messages;
mod observability;
mod settings;
mod system;
mod types;
pub mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::db::Store;
use crate::services::{AuthService, NotificationService};

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<tokio::sync::RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth
    }

    #[must_use]
    pub fn notifications(&self) -> &Arc<NotificationService> {
        &self.shared.notifications
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let (cors_origins, secure_cookies, session_ttl_hours) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
            config.server.session_ttl_hours,
        )
    };

    // Sessions live in the same SQLite database as everything else; the
    // backing table is created here if it does not exist yet.
    let session_store = SqliteStore::new(state.store().conn.get_sqlite_connection_pool().clone());
    session_store
        .migrate()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create session table: {e}"))?;

    tokio::task::spawn(
        session_store
            .clone()
            .continuously_delete_expired(tokio::time::Duration::from_secs(3600)),
    );

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(
            session_ttl_hours,
        )));

    let admin_routes = create_admin_router(state.clone());

    let api_router = Router::new()
        .nest("/admin", admin_routes)
        .route("/contact", post(contact::submit))
        .route("/case-studies", get(case_studies::list_public))
        .route("/case-studies/{slug}", get(case_studies::get_by_slug))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/user", get(auth::current_user))
        .route("/health", get(system::get_health))
        .layer(session_layer)
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Ok(Router::new()
        .nest("/api", api_router)
        .fallback(assets::serve_asset)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        )))
}

fn create_admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/case-studies", get(case_studies::list_admin))
        .route("/case-studies", post(case_studies::create))
        .route("/case-studies/{id}", get(case_studies::get_admin))
        .route("/case-studies/{id}", put(case_studies::update))
        .route("/case-studies/{id}", delete(case_studies::delete))
        .route("/messages", get(messages::list))
        .route("/messages/{id}", get(messages::get))
        .route("/messages/{id}", delete(messages::delete))
        .route("/messages/{id}/read", put(messages::mark_read))
        .route("/settings", get(settings::list))
        .route("/settings/{key}", get(settings::by_category))
        .route("/settings/{key}", put(settings::save))
        .route("/metrics", get(observability::get_metrics))
        // The layer (not route_layer) also covers the fallback, so every
        // path under /api/admin is gated, known or not.
        .fallback(admin_fallback)
        .layer(middleware::from_fn_with_state(
            state,
            auth::admin_middleware,
        ))
}

async fn admin_fallback() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}
