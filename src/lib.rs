use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod watch;

#[cfg(test)]
mod tests;

use crate::{auth::require_session, config::Config, identity::IdentityProvider};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub identity: Arc<dyn IdentityProvider>,
}

pub fn app(state: AppState) -> Router {
    // Path patterns that require an authenticated session. Everything else
    // is public; the sync endpoint resolves identity itself.
    let protected = Router::new()
        .route("/api/profile", get(handlers::get_user_profile))
        .route("/api/submissions", get(handlers::list_submissions))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/leaderboard", get(handlers::get_leaderboard))
        .route("/api/users/sync", post(handlers::sync_user))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
