//! # 에러 처리 모듈
//!
//! 문서 코어와 HTTP 계층이 공유하는 에러 타입을 정의합니다.
//!
//! 에러 분류:
//! - `InvalidInput`: 저장소를 건드리기 전에 검출되는 입력 오류
//! - `NotFound`: 문서/버전/사용자가 없음
//! - `Forbidden`: 인증은 되었지만 읽기/편집 권한이 없음
//! - `Unauthorized`: 자격 증명이 없거나 잘못됨 (인증 계층에서만 발생)
//! - `Conflict`: 유일성 위반 (중복 이메일 등)
//! - `Internal` / `Database` / `Timeout`: 그 외 저장소·런타임 실패.
//!   트랜잭션 도중 발생하면 전체가 롤백됩니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면
/// Axum이 `IntoResponse`를 호출하여 JSON 에러 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 입력 (HTTP 400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 권한 없음 (HTTP 403)
    #[error("Access denied")]
    Forbidden,

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 유일성 충돌 (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from] 덕분에 sqlx 호출 뒤의 `?`가 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 호출자 데드라인 초과 (HTTP 504). 진행 중이던 트랜잭션은 롤백됩니다.
    #[error("Operation timed out")]
    Timeout,
}

impl AppError {
    /// 유일성 제약 위반을 `Conflict`로, 나머지 DB 에러는 그대로 둡니다.
    pub fn from_unique_violation(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(message.to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

impl IntoResponse for AppError {
    /// 내부 에러(Database, Internal)는 실제 내용을 로그에만 남기고
    /// 클라이언트에는 일반적인 메시지만 돌려줍니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidInput(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_input", msg.clone())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string()),
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Timeout => {
                tracing::warn!("Operation exceeded its deadline and was rolled back");
                (StatusCode::GATEWAY_TIMEOUT, "timeout", self.to_string())
            }
        };

        // 결과: { "error": { "code": "forbidden", "message": "Access denied" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::InvalidInput("title is required".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::NotFound, StatusCode::NOT_FOUND)]
    #[case(AppError::Forbidden, StatusCode::FORBIDDEN)]
    #[case(AppError::Unauthorized("bad token".into()), StatusCode::UNAUTHORIZED)]
    #[case(AppError::Conflict("email already registered".into()), StatusCode::CONFLICT)]
    #[case(AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(AppError::Database(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(AppError::Timeout, StatusCode::GATEWAY_TIMEOUT)]
    fn maps_each_kind_to_its_status(#[case] err: AppError, #[case] expected: StatusCode) {
        assert_eq!(err.into_response().status(), expected);
    }

    #[test]
    fn non_unique_database_errors_stay_internal() {
        let err = AppError::from_unique_violation(sqlx::Error::RowNotFound, "duplicate");
        assert!(matches!(err, AppError::Database(_)));
    }
}
