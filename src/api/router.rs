use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::dashboard;
use super::health;
use super::middleware::logging_middleware;
use super::playground;
use super::state::AppState;
use super::validation;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Dashboard and the external validation endpoint
        .nest("/api", create_api_router())
        // Playground form and the page it unlocks
        .route("/playground", post(playground::submit_key))
        .route("/protected", get(playground::protected_page))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

fn create_api_router() -> Router<AppState> {
    dashboard::create_dashboard_router().route("/validate-key", post(validation::validate_key))
}
