//! # 문서 모델
//!
//! `documents` 테이블 한 행과, 문서 생성/수정 요청 본문을 정의합니다.
//! 공개 범위(`Visibility`)는 문자열이 아니라 닫힌 열거형으로 다룹니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 문서 공개 범위 — 공유 권한을 참조할지 말지를 결정하는 1차 관문입니다.
///
/// - `Private`: 소유자만. 공유 권한이 있어도 무시됩니다.
/// - `Public`: 모든 사용자가 읽기 가능.
/// - `Shared`: 소유자 + 공유 권한을 받은 사용자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Visibility {
    #[default]
    Private,
    Public,
    Shared,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "PRIVATE",
            Visibility::Public => "PUBLIC",
            Visibility::Shared => "SHARED",
        }
    }

    /// 선택적으로 전달된 원시 값을 해석합니다.
    ///
    /// - 없음 / 빈 문자열 → `Ok(None)` (호출자가 기본값 또는 기존 값을 유지)
    /// - 알려진 값 → `Ok(Some(..))`
    /// - 그 외 → `Err(InvalidInput)`
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }
}

impl FromStr for Visibility {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRIVATE" => Ok(Visibility::Private),
            "PUBLIC" => Ok(Visibility::Public),
            "SHARED" => Ok(Visibility::Shared),
            other => Err(AppError::InvalidInput(format!(
                "visibility must be PRIVATE, PUBLIC or SHARED (got {other:?})"
            ))),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 문서 엔티티
///
/// 버전이 하나라도 생긴 뒤에는 `latest_version_id`가 항상 채워져 있고,
/// 그 버전의 `document_id`는 이 문서의 `id`와 같습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub visibility: Visibility,
    pub latest_version_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// `GET /api/docs/{id}` 응답: 문서 + 최신 버전 내용
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDetail {
    pub document: Document,
    pub content: String,
}

/// `POST /api/docs` 요청 본문
///
/// `visibility`를 문자열로 받는 이유: 빈 값은 PRIVATE로,
/// 알 수 없는 값은 400으로 구분해야 하기 때문입니다.
#[derive(Debug, Default, Deserialize)]
pub struct CreateDocumentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub visibility: Option<String>,
}

/// `PUT /api/docs/{id}` 요청 본문
///
/// 제목이 비어 있거나 없으면 기존 제목을 유지하고,
/// 공개 범위가 없으면 기존 값을 유지합니다. 내용은 항상 새 버전이 됩니다.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    pub visibility: Option<String>,
}
