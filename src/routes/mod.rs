//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 조립 함수입니다.
//!
//! 각 하위 모듈:
//! - `admin`: 관리자 전용 사용자 관리
//! - `auth`: 로그인, 내 정보 (회원가입은 막혀 있음)
//! - `documents`: 문서 생성/조회/수정/목록, 공유 상태(`AppState`)
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `shares`: 소유자 전용 공유 권한 관리
//! - `versions`: 버전 이력 조회

pub mod admin;
pub mod auth;
pub mod documents;
pub mod health;
pub mod shares;
pub mod versions;

// 각 모듈의 핸들러 함수들을 재공개하여 `router()`에서 바로 접근합니다.
pub use documents::*;
pub use health::*;
pub use shares::*;
pub use versions::*;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::error::AppError;

/// 경로 파라미터의 ID를 UUID로 해석합니다.
///
/// 형식이 틀린 ID는 존재 여부를 묻기 전에 `InvalidInput`(400)이 됩니다.
/// 저장된 ID와 비교할 수 있도록 소문자 하이픈 형식으로 정규화해서 돌려줍니다.
pub fn parse_id(raw: &str) -> Result<String, AppError> {
    uuid::Uuid::parse_str(raw)
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| AppError::InvalidInput(format!("invalid id: {raw:?}")))
}

/// `/api` 아래에 붙는 라우터를 만듭니다.
///
/// Axum 0.8부터 경로 파라미터는 `{id}` 문법을 씁니다.
pub fn api_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me));

    let admin_routes = Router::new()
        .route("/admin/users", get(admin::list_users).post(admin::create_user))
        .route("/admin/users/{id}/reset_password", post(admin::reset_password));

    Router::new()
        .merge(auth_routes)
        .merge(admin_routes)
        .route("/docs", get(list_documents).post(create_document))
        .route("/docs/{id}", get(get_document).put(update_document))
        .route("/docs/{id}/versions", get(list_document_versions))
        .route("/docs/{id}/versions/{version_id}", get(get_document_version))
        .route(
            "/docs/{id}/shares",
            get(list_document_shares).put(upsert_document_share),
        )
        .route("/docs/{id}/shares/{user_id}", delete(delete_document_share))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("0190c2a4-7d4e-7b3a-9f00")]
    fn malformed_ids_are_invalid_input(#[case] raw: &str) {
        assert!(matches!(parse_id(raw), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn ids_are_normalized_to_stored_form() {
        let id = uuid::Uuid::now_v7().to_string();
        assert_eq!(parse_id(&id).unwrap(), id);
        assert_eq!(parse_id(&id.to_uppercase()).unwrap(), id);
    }
}
