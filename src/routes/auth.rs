use crate::{
    db::users as db_users,
    error::AppError,
    middleware::auth::AuthUser,
    models::user::*,
    routes::documents::AppState,
    services,
};
use axum::{extract::State, Json};

/// 공개 회원가입은 닫혀 있습니다. 사용자는 관리자가 만듭니다.
pub async fn register() -> AppError {
    AppError::Forbidden
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = services::accounts::login(&state.pool, &state.jwt_secret, req).await?;
    Ok(Json(response))
}

pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = db_users::find_by_id(&state.pool, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user.into()))
}
