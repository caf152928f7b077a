//! API key management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::view::{Dashboard, ViewId};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::api_key::validate_key_name;
use crate::domain::{ApiKeyId, ApiKeyRecord, VisibleKeys};

/// Request to create a new API key
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApiKeyRequest {
    pub name: String,
}

/// Request to rename an API key
#[derive(Debug, Clone, Deserialize)]
pub struct RenameApiKeyRequest {
    pub name: String,
}

/// API key as shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyResponse {
    pub id: String,
    pub name: String,
    /// Masked unless the key is in the visibility set
    pub key: String,
    pub visible: bool,
    pub status: String,
    pub usage: i64,
    pub created_at: String,
}

impl ApiKeyResponse {
    fn from_record(record: &ApiKeyRecord, visible: &VisibleKeys) -> Self {
        Self {
            id: record.id().to_string(),
            name: record.name().to_string(),
            key: visible.display(record.id(), record.key()),
            visible: visible.is_visible(record.id()),
            status: record.status().to_string(),
            usage: record.usage(),
            created_at: record.created_at().to_rfc3339(),
        }
    }
}

/// List API keys response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListApiKeysResponse {
    pub api_keys: Vec<ApiKeyResponse>,
    pub total: usize,
    pub is_loading: bool,
}

/// GET /api/keys
pub async fn list_api_keys(
    State(state): State<AppState>,
    view: ViewId,
) -> Result<Json<ListApiKeysResponse>, ApiError> {
    debug!(view = %view.as_str(), "Listing API keys");

    let dashboard = state.views.open(&view).await;
    let mut dashboard = dashboard.lock().await;

    if !dashboard.manager.refresh().await {
        return Err(ApiError::internal("Failed to fetch API keys"));
    }

    let api_keys: Vec<ApiKeyResponse> = dashboard
        .manager
        .keys()
        .iter()
        .map(|k| ApiKeyResponse::from_record(k, &dashboard.visible))
        .collect();
    let total = api_keys.len();

    Ok(Json(ListApiKeysResponse {
        api_keys,
        total,
        is_loading: dashboard.manager.is_loading(),
    }))
}

/// POST /api/keys
pub async fn create_api_key(
    State(state): State<AppState>,
    view: ViewId,
    Json(request): Json<CreateApiKeyRequest>,
) -> Result<(StatusCode, Json<ApiKeyResponse>), ApiError> {
    debug!(name = %request.name, "Creating API key");

    let dashboard = state.views.open(&view).await;
    let mut dashboard = dashboard.lock().await;

    if !dashboard.manager.create(&request.name).await {
        return Err(match validate_key_name(&request.name) {
            Err(e) => ApiError::bad_request(e.to_string()),
            Ok(_) => ApiError::internal("Failed to create API key"),
        });
    }

    let created = dashboard
        .manager
        .keys()
        .first()
        .ok_or_else(|| ApiError::internal("Failed to create API key"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiKeyResponse::from_record(created, &dashboard.visible)),
    ))
}

/// PATCH /api/keys/:key_id
pub async fn rename_api_key(
    State(state): State<AppState>,
    view: ViewId,
    Path(key_id): Path<String>,
    Json(request): Json<RenameApiKeyRequest>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    debug!(key_id = %key_id, "Renaming API key");

    let id = ApiKeyId::new(key_id);
    let dashboard = state.views.open(&view).await;
    let mut dashboard = dashboard.lock().await;
    let known = dashboard.manager.get(&id).is_some();

    if !dashboard.manager.rename(&id, &request.name).await {
        return Err(if let Err(e) = validate_key_name(&request.name) {
            ApiError::bad_request(e.to_string())
        } else if known {
            ApiError::internal("Failed to update API key")
        } else {
            unknown_id_failure(&mut dashboard, &id, "Failed to update API key").await
        });
    }

    if !known {
        dashboard.manager.refresh().await;
    }

    let record = dashboard.manager.get(&id).ok_or_else(|| not_found(&id))?;

    Ok(Json(ApiKeyResponse::from_record(record, &dashboard.visible)))
}

/// DELETE /api/keys/:key_id
pub async fn delete_api_key(
    State(state): State<AppState>,
    view: ViewId,
    Path(key_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(key_id = %key_id, "Deleting API key");

    let id = ApiKeyId::new(key_id);
    let dashboard = state.views.open(&view).await;
    let mut dashboard = dashboard.lock().await;
    let known = dashboard.manager.get(&id).is_some();

    if !dashboard.manager.remove(&id).await {
        return Err(if known {
            ApiError::internal("Failed to delete API key")
        } else {
            unknown_id_failure(&mut dashboard, &id, "Failed to delete API key").await
        });
    }

    dashboard.visible.forget(&id);

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/keys/:key_id/status
pub async fn toggle_api_key_status(
    State(state): State<AppState>,
    view: ViewId,
    Path(key_id): Path<String>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    debug!(key_id = %key_id, "Toggling API key status");

    let id = ApiKeyId::new(key_id);
    let dashboard = state.views.open(&view).await;
    let mut dashboard = dashboard.lock().await;
    let known = dashboard.manager.get(&id).is_some();

    if !dashboard.manager.toggle_status(&id).await {
        return Err(if known {
            ApiError::internal("Failed to update API key status")
        } else {
            not_found(&id)
        });
    }

    let record = dashboard.manager.get(&id).ok_or_else(|| not_found(&id))?;

    Ok(Json(ApiKeyResponse::from_record(record, &dashboard.visible)))
}

/// POST /api/keys/:key_id/visibility
pub async fn toggle_api_key_visibility(
    State(state): State<AppState>,
    view: ViewId,
    Path(key_id): Path<String>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    let id = ApiKeyId::new(key_id);
    let dashboard = state.views.open(&view).await;
    let mut dashboard = dashboard.lock().await;

    if dashboard.manager.get(&id).is_none() {
        return Err(not_found(&id));
    }

    dashboard.visible.toggle(&id);

    let record = dashboard.manager.get(&id).ok_or_else(|| not_found(&id))?;

    Ok(Json(ApiKeyResponse::from_record(record, &dashboard.visible)))
}

/// A mutation failed for an id outside the view: 404 only when a fresh
/// listing confirms the store does not hold it
async fn unknown_id_failure(dashboard: &mut Dashboard, id: &ApiKeyId, message: &str) -> ApiError {
    if dashboard.manager.refresh().await && dashboard.manager.get(id).is_none() {
        not_found(id)
    } else {
        ApiError::internal(message)
    }
}

fn not_found(id: &ApiKeyId) -> ApiError {
    ApiError::not_found(format!("API key '{}' not found", id)).with_code("api_key_not_found")
}
