//! # 관리자 라우트 핸들러
//!
//! `AdminUser` 추출기를 통과한 요청만 들어옵니다 (그 외 403).
//!
//! - `GET  /api/admin/users`                    → 전체 사용자 (최근 생성순)
//! - `POST /api/admin/users`                    → 사용자 생성 (201)
//! - `POST /api/admin/users/{id}/reset_password` → 비밀번호 재설정 (204)

use crate::{
    error::AppError,
    middleware::auth::AdminUser,
    models::user::*,
    routes::documents::AppState,
    services,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    let users: Vec<UserResponse> = services::accounts::list_users(&state.pool)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(json!({ "users": users })))
}

pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = services::accounts::create_user(&state.pool, req).await?;
    tracing::debug!(admin_id = %admin.user_id, user_id = %user.id, "admin created user");
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn reset_password(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    let id = super::parse_id(&id)?;
    services::accounts::reset_password(&state.pool, &id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}
