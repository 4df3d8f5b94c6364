use serde::{Deserialize, Serialize};

/// 문서 내용 스냅샷. 한 번 기록되면 수정/삭제되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentVersion {
    pub id: String,
    pub document_id: String,
    pub content: String,
    pub created_by: String,
    pub created_at: String,
}
