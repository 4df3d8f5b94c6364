//! # 문서 데이터베이스 쿼리 모듈
//!
//! `documents` 테이블에 대한 쿼리 함수들입니다.
//!
//! 쓰기 함수(`insert_document`, `update_document_metadata`, `set_latest_version`)는
//! 항상 트랜잭션 안에서 호출되므로 `&mut SqliteConnection`을 받습니다.
//! 호출하는 쪽은 `&mut *tx`를 넘기면 됩니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{Executor, Sqlite, SqliteConnection};

/// ID로 단일 문서를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Document))`: 문서를 찾은 경우
/// - `Ok(None)`: 해당 ID의 문서가 없는 경우
pub async fn get_document<'e, E>(executor: E, id: &str) -> Result<Option<Document>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let doc = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, owner_id, title, visibility, latest_version_id, created_at, updated_at
        FROM documents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(doc)
}

/// 사용자가 읽을 수 있는 모든 문서를 최근 수정 순으로 조회합니다.
///
/// 조건은 `services::access::can_read`와 같습니다:
/// - 본인이 소유한 문서 (공개 범위 무관)
/// - PUBLIC 문서
/// - SHARED 문서 중 본인에게 공유 권한(역할 무관)이 있는 문서
///
/// `(document_id, user_id)`는 유일하므로 JOIN이 행을 중복시키지 않지만,
/// 그래도 DISTINCT로 한 문서가 한 번만 나오도록 보장합니다.
pub async fn list_visible_documents<'e, E>(
    executor: E,
    user_id: &str,
) -> Result<Vec<Document>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let docs = sqlx::query_as::<_, Document>(
        r#"
        SELECT DISTINCT d.id, d.owner_id, d.title, d.visibility, d.latest_version_id,
               d.created_at, d.updated_at
        FROM documents d
        LEFT JOIN document_shares ds ON ds.document_id = d.id AND ds.user_id = ?
        WHERE d.owner_id = ?
           OR d.visibility = 'PUBLIC'
           OR (d.visibility = 'SHARED' AND ds.user_id IS NOT NULL)
        ORDER BY d.updated_at DESC, d.id DESC
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    Ok(docs)
}

/// 새 문서 행을 삽입합니다. `latest_version_id`는 아직 NULL입니다.
pub async fn insert_document(conn: &mut SqliteConnection, doc: &Document) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO documents (id, owner_id, title, visibility, latest_version_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, NULL, ?, ?)
        "#,
    )
    .bind(&doc.id)
    .bind(&doc.owner_id)
    .bind(&doc.title)
    .bind(doc.visibility)
    .bind(&doc.created_at)
    .bind(&doc.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

/// 트랜잭션 안에서 문서 행에 쓰기 잠금을 겁니다.
///
/// SQLite에는 `SELECT ... FOR UPDATE`가 없으므로, 값을 바꾸지 않는 UPDATE를
/// 트랜잭션의 첫 문장으로 실행해 RESERVED 잠금을 먼저 잡습니다.
/// 이후의 읽기-검사-쓰기가 다른 수정과 섞이지 않습니다.
///
/// 문서가 없으면 `false`를 반환합니다.
pub async fn lock_document(conn: &mut SqliteConnection, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE documents SET updated_at = updated_at WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 제목과 공개 범위를 수정하고 `updated_at`을 갱신합니다.
pub async fn update_document_metadata(
    conn: &mut SqliteConnection,
    id: &str,
    title: &str,
    visibility: Visibility,
    updated_at: &str,
) -> Result<(), AppError> {
    sqlx::query("UPDATE documents SET title = ?, visibility = ?, updated_at = ? WHERE id = ?")
        .bind(title)
        .bind(visibility)
        .bind(updated_at)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}

/// 최신 버전 포인터를 옮기고 `updated_at`을 갱신합니다.
pub async fn set_latest_version(
    conn: &mut SqliteConnection,
    id: &str,
    version_id: &str,
    updated_at: &str,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE documents SET latest_version_id = ?, updated_at = ? WHERE id = ?",
    )
    .bind(version_id)
    .bind(updated_at)
    .bind(id)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Internal(format!(
            "document {id} vanished while repointing its latest version"
        )));
    }

    Ok(())
}
