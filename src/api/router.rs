use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::keys;
use super::state::AppState;
use super::summarize;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/keys", get(keys::list_keys).post(keys::create_key))
        .route("/keys/validate", post(keys::validate_key))
        .route(
            "/keys/{id}",
            patch(keys::update_key).delete(keys::delete_key),
        )
        .route("/summarize", post(summarize::summarize_repo))
        .route("/summarize/readme", post(summarize::digest_readme))
        .route("/auth/provision", post(auth::provision_user))
        .with_state(state)
        // The dashboard frontend runs on a different origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
