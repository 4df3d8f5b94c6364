//! # 공유 권한 모델
//!
//! `(document_id, user_id)` 쌍마다 최대 하나의 권한(VIEW/EDIT)이 존재합니다.
//! 권한은 문서가 SHARED일 때만 효력이 있습니다.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum ShareRole {
    View,
    Edit,
}

impl ShareRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareRole::View => "VIEW",
            ShareRole::Edit => "EDIT",
        }
    }
}

impl FromStr for ShareRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VIEW" => Ok(ShareRole::View),
            "EDIT" => Ok(ShareRole::Edit),
            other => Err(AppError::InvalidInput(format!(
                "role must be VIEW or EDIT (got {other:?})"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShareGrant {
    pub id: String,
    pub document_id: String,
    pub user_id: String,
    pub role: ShareRole,
    pub created_at: String,
}

/// `PUT /api/docs/{id}/shares` 요청 본문
///
/// 필드가 빠져도 역직렬화는 성공시키고, 검증은 서비스에서 400으로 돌려줍니다.
#[derive(Debug, Default, Deserialize)]
pub struct UpsertShareRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub role: String,
}
