//! # 버전 원장 (Version Ledger)
//!
//! `document_versions`는 추가 전용입니다. 이 모듈은 수정/삭제 함수를 제공하지 않고,
//! 스키마의 트리거가 UPDATE 자체를 거부합니다.
//!
//! 정렬은 `created_at` 내림차순, 같은 시각이면 삽입 순서(rowid)의 역순입니다.

use crate::error::AppError;
use crate::models::DocumentVersion;
use sqlx::{Executor, Sqlite, SqliteConnection};

/// 새 버전을 추가하고 기록된 행을 반환합니다.
///
/// 트랜잭션 안에서만 호출됩니다. 반환된 버전의 내용은 이후 절대 바뀌지 않습니다.
pub async fn append_version(
    conn: &mut SqliteConnection,
    document_id: &str,
    content: &str,
    created_by: &str,
    created_at: &str,
) -> Result<DocumentVersion, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    let version = sqlx::query_as::<_, DocumentVersion>(
        r#"
        INSERT INTO document_versions (id, document_id, content, created_by, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, document_id, content, created_by, created_at
        "#,
    )
    .bind(&id)
    .bind(document_id)
    .bind(content)
    .bind(created_by)
    .bind(created_at)
    .fetch_one(conn)
    .await?;

    Ok(version)
}

pub async fn get_version<'e, E>(
    executor: E,
    version_id: &str,
) -> Result<Option<DocumentVersion>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let version = sqlx::query_as::<_, DocumentVersion>(
        r#"
        SELECT id, document_id, content, created_by, created_at
        FROM document_versions
        WHERE id = ?
        "#,
    )
    .bind(version_id)
    .fetch_optional(executor)
    .await?;

    Ok(version)
}

pub async fn get_latest_version<'e, E>(
    executor: E,
    document_id: &str,
) -> Result<Option<DocumentVersion>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let version = sqlx::query_as::<_, DocumentVersion>(
        r#"
        SELECT id, document_id, content, created_by, created_at
        FROM document_versions
        WHERE document_id = ?
        ORDER BY created_at DESC, rowid DESC
        LIMIT 1
        "#,
    )
    .bind(document_id)
    .fetch_optional(executor)
    .await?;

    Ok(version)
}

/// 문서의 모든 버전을 최신순으로 조회합니다.
pub async fn list_versions<'e, E>(
    executor: E,
    document_id: &str,
) -> Result<Vec<DocumentVersion>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let versions = sqlx::query_as::<_, DocumentVersion>(
        r#"
        SELECT id, document_id, content, created_by, created_at
        FROM document_versions
        WHERE document_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(document_id)
    .fetch_all(executor)
    .await?;

    Ok(versions)
}
