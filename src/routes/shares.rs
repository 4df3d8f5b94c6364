//! # 공유 권한 라우트 핸들러
//!
//! - `GET    /api/docs/{id}/shares`           → 권한 목록
//! - `PUT    /api/docs/{id}/shares`           → 권한 부여 또는 역할 변경
//! - `DELETE /api/docs/{id}/shares/{user_id}` → 권한 회수 (204)
//!
//! 세 엔드포인트 모두 문서 소유자만 호출할 수 있습니다.

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    services::{self, with_deadline},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::documents::AppState;

pub async fn list_document_shares(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = super::parse_id(&id)?;
    let shares = with_deadline(
        state.operation_timeout,
        services::sharing::list_document_shares(&state.pool, &auth_user.user_id, &id),
    )
    .await?;
    Ok(Json(json!({ "shares": shares })))
}

pub async fn upsert_document_share(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpsertShareRequest>,
) -> Result<Json<ShareGrant>, AppError> {
    let id = super::parse_id(&id)?;
    let grant = with_deadline(
        state.operation_timeout,
        services::sharing::share_document(&state.pool, &auth_user.user_id, &id, req),
    )
    .await?;
    Ok(Json(grant))
}

pub async fn delete_document_share(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let id = super::parse_id(&id)?;
    let user_id = super::parse_id(&user_id)?;
    with_deadline(
        state.operation_timeout,
        services::sharing::revoke_share(&state.pool, &auth_user.user_id, &id, &user_id),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
