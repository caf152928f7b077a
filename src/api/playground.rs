//! Playground validation form and the page it unlocks

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::session::CookieMarkerStore;
use super::state::AppState;
use super::types::{ApiError, Json};
use crate::infrastructure::session::SessionGate;

/// POST /playground request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundRequest {
    pub api_key: String,
}

/// POST /playground response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaygroundResponse {
    pub valid: bool,
    pub message: String,
}

/// Protected page body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectedPage {
    pub title: String,
    pub message: String,
}

/// POST /playground
///
/// Checks the key against active records and, when it passes, stores it as
/// the session marker.
pub async fn submit_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PlaygroundRequest>,
) -> Result<Response, ApiError> {
    let api_key = request.api_key.trim();

    if api_key.is_empty() {
        state.notifier.error("Please enter an API key");
        return Err(ApiError::bad_request("Please enter an API key"));
    }

    let valid = state.repository.find_active_by_key(api_key).await;

    if !valid {
        state.notifier.error("Invalid API key");
        return Ok(Json(PlaygroundResponse {
            valid: false,
            message: "Invalid API key".to_string(),
        })
        .into_response());
    }

    let gate = SessionGate::new(CookieMarkerStore::from_headers(&headers, &state.cookie_name));
    gate.record_validated(api_key)?;

    let message = "Valid API key, /protected can be accessed";
    state.notifier.success(message);

    let mut response = Json(PlaygroundResponse {
        valid: true,
        message: message.to_string(),
    })
    .into_response();

    if let Some(cookie) = gate.store().set_cookie_header() {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    } else {
        warn!("Validated key could not be written to the session cookie");
    }

    Ok(response)
}

/// GET /protected
///
/// Sends clients without a session marker back to the playground.
pub async fn protected_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let gate = SessionGate::new(CookieMarkerStore::from_headers(&headers, &state.cookie_name));

    if !gate.enter(state.notifier.as_ref()) {
        return Redirect::to("/playground").into_response();
    }

    Json(ProtectedPage {
        title: "Protected Page".to_string(),
        message: "This is a protected page that can only be accessed with a valid API key."
            .to_string(),
    })
    .into_response()
}
