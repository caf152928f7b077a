//! Network key validation endpoint

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::state::AppState;

/// POST /api/validate-key request body, `{"apiKey": "..."}`
#[derive(Debug, Clone)]
pub struct ValidateKeyRequest {
    pub api_key: String,
}

impl ValidateKeyRequest {
    /// Parse a request body.
    ///
    /// `Err` only for an empty or non-JSON body. Parseable JSON without a
    /// string `apiKey` yields `Ok(None)`.
    pub fn parse(body: &[u8]) -> Result<Option<Self>, ValidationRequestError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationRequestError);
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| {
            debug!("Rejected validation request: {}", e);
            ValidationRequestError
        })?;

        Ok(value
            .get("apiKey")
            .and_then(Value::as_str)
            .map(|api_key| Self {
                api_key: api_key.to_string(),
            }))
    }
}

/// Validation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateKeyResponse {
    pub valid: bool,
}

/// Malformed validation request, answered with `400 {"error": "Invalid request"}`
#[derive(Debug, Clone, Copy)]
pub struct ValidationRequestError;

#[derive(Serialize)]
struct ValidationRequestErrorBody {
    error: &'static str,
}

impl IntoResponse for ValidationRequestError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ValidationRequestErrorBody {
                error: "Invalid request",
            }),
        )
            .into_response()
    }
}

/// POST /api/validate-key
///
/// A key is valid when any record holds it. Unlike the dashboard's own
/// validation this does not look at the record's status. The body is read
/// as JSON whatever its content type; a missing or non-string `apiKey` and
/// lookup errors read as `valid: false`.
pub async fn validate_key(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ValidateKeyResponse>, ValidationRequestError> {
    let valid = match ValidateKeyRequest::parse(&body)? {
        Some(request) => state.repository.key_exists(&request.api_key).await,
        None => false,
    };

    Ok(Json(ValidateKeyResponse { valid }))
}
