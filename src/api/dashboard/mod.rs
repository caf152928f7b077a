//! Dashboard endpoints for managing API keys

pub mod api_keys;
pub mod view;

pub use view::DashboardViews;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use super::state::AppState;

/// Create dashboard API router
pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route(
            "/keys",
            get(api_keys::list_api_keys).post(api_keys::create_api_key),
        )
        .route(
            "/keys/{key_id}",
            patch(api_keys::rename_api_key).delete(api_keys::delete_api_key),
        )
        .route("/keys/{key_id}/status", post(api_keys::toggle_api_key_status))
        .route(
            "/keys/{key_id}/visibility",
            post(api_keys::toggle_api_key_visibility),
        )
        .layer(middleware::from_fn(view::view_middleware))
}
