//! syncore-site library - marketing site HTTP service
//!
//! Public surface: embedded page shells, the home aggregate, and the
//! contact form. Admin surface: token-guarded CRUD over the content
//! models plus a read-only inquiry listing.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::mailer::Mailer;

pub mod api;
pub mod mailer;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Admin API token; empty string disables auth checking
    pub admin_token: Arc<String>,
    /// Outbound mail sender (best-effort)
    pub mailer: Arc<Mailer>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, admin_token: String, mailer: Mailer) -> Self {
        Self {
            db,
            admin_token: Arc::new(admin_token),
            mailer: Arc::new(mailer),
        }
    }
}

/// Build application router
///
/// Admin routes require the `X-Admin-Token` header; public routes do not.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};
    use tower_http::trace::TraceLayer;

    let admin = api::admin::routes().layer(middleware::from_fn_with_state(
        state.clone(),
        api::auth::admin_auth_middleware,
    ));

    let public = Router::new()
        .route("/", get(api::ui::serve_index))
        .route("/contact", get(api::ui::serve_contact))
        .route("/static/app.js", get(api::ui::serve_app_js))
        .route("/api/home", get(api::home::home_aggregate))
        .route("/api/contact", post(api::contact::submit_contact))
        .merge(api::health::health_routes());

    Router::new()
        .nest("/api/admin", admin)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
