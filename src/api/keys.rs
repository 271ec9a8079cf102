//! Key lifecycle endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::api_key::{ApiKey, KeyType};
use crate::infrastructure::api_key::ValidatedKey;

use super::state::AppState;
use super::types::{ApiError, Json};

#[derive(Debug, Deserialize)]
pub struct CreateKeyRequest {
    pub name: String,
    #[serde(rename = "type", default)]
    pub key_type: Option<KeyType>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateKeyRequest {
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub key_type: Option<KeyType>,
}

#[derive(Debug, Serialize)]
pub struct DeleteKeyResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct ValidateKeyRequest {
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateKeyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<ValidatedKey>,
}

/// GET /keys
pub async fn list_keys(State(state): State<AppState>) -> Result<Json<Vec<ApiKey>>, ApiError> {
    let keys = state.api_keys.list().await?;
    Ok(Json(keys))
}

/// POST /keys
pub async fn create_key(
    State(state): State<AppState>,
    Json(request): Json<CreateKeyRequest>,
) -> Result<(StatusCode, Json<ApiKey>), ApiError> {
    let key_type = request.key_type.unwrap_or_default();
    let key = state.api_keys.create(&request.name, key_type).await?;

    Ok((StatusCode::CREATED, Json(key)))
}

/// PATCH /keys/{id}
pub async fn update_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateKeyRequest>,
) -> Result<Json<ApiKey>, ApiError> {
    let key = state
        .api_keys
        .update(&id, request.name.as_deref(), request.key_type)
        .await?;

    Ok(Json(key))
}

/// DELETE /keys/{id}
pub async fn delete_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteKeyResponse>, ApiError> {
    state.api_keys.delete(&id).await?;
    Ok(Json(DeleteKeyResponse { success: true }))
}

/// POST /keys/validate
///
/// Always 200 for a well-formed request; the verdict lives in the body.
pub async fn validate_key(
    State(state): State<AppState>,
    Json(request): Json<ValidateKeyRequest>,
) -> Result<Json<ValidateKeyResponse>, ApiError> {
    let Some(candidate) = request.key else {
        return Err(ApiError::bad_request("API key is required"));
    };

    let key = state.api_keys.validate(&candidate).await;
    Ok(Json(ValidateKeyResponse {
        valid: key.is_some(),
        key,
    }))
}
