//! # 문서(Document) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET  /api/docs`      → 내가 읽을 수 있는 문서 목록
//! - `POST /api/docs`      → 새 문서 생성 (첫 버전 포함)
//! - `GET  /api/docs/{id}` → 문서 + 최신 버전 내용
//! - `PUT  /api/docs/{id}` → 문서 수정 (새 버전 추가)
//!
//! ## Axum 핸들러 패턴
//! 핸들러는 **Extractor(추출기)**를 매개변수로 받습니다:
//! - `State(state)`: 앱 전역 상태 (DB 풀, 설정 등)
//! - `auth_user: AuthUser`: `Authorization` 헤더의 JWT를 검증한 행위자
//! - `Path(id)`: URL 경로 파라미터 (`/api/docs/{id}`의 id)
//! - `Json(body)`: 요청 본문을 JSON으로 파싱한 구조체
//!
//! 규칙 검사와 트랜잭션은 모두 `services::documents`가 맡고,
//! 핸들러는 행위자와 입력을 넘긴 뒤 결과를 JSON으로 감싸기만 합니다.
//! 모든 호출은 `with_deadline`으로 감싸서 설정된 시간을 넘기면 504를 돌려줍니다.

use std::time::Duration;

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
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `SqlitePool`은 내부적으로 Arc이므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
    /// 문서 작업 하나에 허용되는 최대 시간
    pub operation_timeout: Duration,
}

/// `GET /api/docs` — `{ "documents": [...] }`
pub async fn list_documents(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let documents = with_deadline(
        state.operation_timeout,
        services::documents::list_visible(&state.pool, &auth_user.user_id),
    )
    .await?;
    Ok(Json(json!({ "documents": documents })))
}

/// `POST /api/docs` — 새 문서를 생성합니다.
///
/// 성공하면 HTTP 201 Created와 함께 생성된 문서를 돌려줍니다.
/// 소유자는 요청 본문이 아니라 토큰의 행위자로 정해집니다.
pub async fn create_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let document = with_deadline(
        state.operation_timeout,
        services::documents::create_document(&state.pool, &auth_user.user_id, req),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// `GET /api/docs/{id}` — `{ "document": {...}, "content": "..." }`
pub async fn get_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DocumentDetail>, AppError> {
    let id = super::parse_id(&id)?;
    let detail = with_deadline(
        state.operation_timeout,
        services::documents::read_document(&state.pool, &auth_user.user_id, &id),
    )
    .await?;
    Ok(Json(detail))
}

/// `PUT /api/docs/{id}` — 문서를 수정합니다.
///
/// 본문의 `content`는 항상 새 버전이 됩니다. 생략하면 빈 내용으로 기록됩니다.
pub async fn update_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, AppError> {
    let id = super::parse_id(&id)?;
    let document = with_deadline(
        state.operation_timeout,
        services::documents::update_document(&state.pool, &auth_user.user_id, &id, req),
    )
    .await?;
    Ok(Json(document))
}
