use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    models::DocumentVersion,
    services::{self, with_deadline},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::documents::AppState;

/// `GET /api/docs/{id}/versions` — 최신 버전이 먼저 옵니다.
pub async fn list_document_versions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = super::parse_id(&id)?;
    let versions = with_deadline(
        state.operation_timeout,
        services::documents::list_versions(&state.pool, &auth_user.user_id, &id),
    )
    .await?;
    Ok(Json(json!({ "versions": versions })))
}

pub async fn get_document_version(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, version_id)): Path<(String, String)>,
) -> Result<Json<DocumentVersion>, AppError> {
    let id = super::parse_id(&id)?;
    let version_id = super::parse_id(&version_id)?;
    let version = with_deadline(
        state.operation_timeout,
        services::documents::get_version(&state.pool, &auth_user.user_id, &id, &version_id),
    )
    .await?;
    Ok(Json(version))
}
