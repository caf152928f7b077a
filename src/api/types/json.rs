//! JSON body extractor answering rejections with the `ApiError` body

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};

use super::error::{ApiError, ApiErrorType};

/// `axum::Json` with dashboard-style errors
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(req, state)
            .await
            .map(|axum::Json(value)| Json(value))
            .map_err(rejection_error)
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Keeps axum's status (400, 415 or 422) and tags the cause
fn rejection_error(rejection: JsonRejection) -> ApiError {
    let (code, message) = match &rejection {
        JsonRejection::JsonDataError(e) => ("invalid_body", e.body_text()),
        JsonRejection::JsonSyntaxError(e) => ("malformed_json", e.body_text()),
        JsonRejection::MissingJsonContentType(_) => (
            "unsupported_content_type",
            "Expected Content-Type: application/json".to_string(),
        ),
        other => ("invalid_body", other.body_text()),
    };

    ApiError::new(rejection.status(), ApiErrorType::InvalidRequestError, message).with_code(code)
}
