//! # 공유 권한 레지스트리 (Sharing Registry)
//!
//! `(document_id, user_id)` 유일성은 스키마의 UNIQUE 제약으로 강제되고,
//! 생성은 항상 insert-or-replace(upsert)로 처리됩니다.

use crate::error::AppError;
use crate::models::{ShareGrant, ShareRole};
use sqlx::{Executor, Sqlite};

/// 문서-사용자 쌍의 권한을 조회합니다. 접근 제어 평가기가 사용합니다.
pub async fn get_share<'e, E>(
    executor: E,
    document_id: &str,
    user_id: &str,
) -> Result<Option<ShareGrant>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let grant = sqlx::query_as::<_, ShareGrant>(
        r#"
        SELECT id, document_id, user_id, role, created_at
        FROM document_shares
        WHERE document_id = ? AND user_id = ?
        "#,
    )
    .bind(document_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(grant)
}

/// 권한을 생성하거나, 이미 있으면 역할만 바꿉니다.
///
/// 기존 행의 `id`와 `created_at`은 유지됩니다.
pub async fn upsert_share<'e, E>(
    executor: E,
    document_id: &str,
    user_id: &str,
    role: ShareRole,
) -> Result<ShareGrant, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = uuid::Uuid::now_v7().to_string();

    let grant = sqlx::query_as::<_, ShareGrant>(
        r#"
        INSERT INTO document_shares (id, document_id, user_id, role, created_at)
        VALUES (?, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        ON CONFLICT (document_id, user_id) DO UPDATE SET role = excluded.role
        RETURNING id, document_id, user_id, role, created_at
        "#,
    )
    .bind(&id)
    .bind(document_id)
    .bind(user_id)
    .bind(role)
    .fetch_one(executor)
    .await?;

    Ok(grant)
}

pub async fn list_shares<'e, E>(executor: E, document_id: &str) -> Result<Vec<ShareGrant>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let grants = sqlx::query_as::<_, ShareGrant>(
        r#"
        SELECT id, document_id, user_id, role, created_at
        FROM document_shares
        WHERE document_id = ?
        ORDER BY created_at, rowid
        "#,
    )
    .bind(document_id)
    .fetch_all(executor)
    .await?;

    Ok(grants)
}

/// 권한을 삭제합니다. 삭제된 행이 없으면 `false`.
pub async fn delete_share<'e, E>(
    executor: E,
    document_id: &str,
    user_id: &str,
) -> Result<bool, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM document_shares WHERE document_id = ? AND user_id = ?")
        .bind(document_id)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{create_request, insert_user, memory_pool};
    use crate::services::documents::create_document;

    #[tokio::test]
    async fn upsert_keeps_a_single_grant_per_pair() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner@example.com").await;
        let reader = insert_user(&pool, "reader@example.com").await;
        let doc = create_document(&pool, &owner.id, create_request("Plan", "v1", Some("SHARED")))
            .await
            .unwrap();

        let first = upsert_share(&pool, &doc.id, &reader.id, ShareRole::View).await.unwrap();
        let second = upsert_share(&pool, &doc.id, &reader.id, ShareRole::Edit).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.role, ShareRole::Edit);
        assert_eq!(list_shares(&pool, &doc.id).await.unwrap().len(), 1);
        assert_eq!(
            get_share(&pool, &doc.id, &reader.id).await.unwrap().map(|g| g.role),
            Some(ShareRole::Edit)
        );
    }

    #[tokio::test]
    async fn delete_reports_whether_a_grant_existed() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner@example.com").await;
        let reader = insert_user(&pool, "reader@example.com").await;
        let doc = create_document(&pool, &owner.id, create_request("Plan", "v1", None))
            .await
            .unwrap();

        upsert_share(&pool, &doc.id, &reader.id, ShareRole::View).await.unwrap();

        assert!(delete_share(&pool, &doc.id, &reader.id).await.unwrap());
        assert!(!delete_share(&pool, &doc.id, &reader.id).await.unwrap());
        assert!(get_share(&pool, &doc.id, &reader.id).await.unwrap().is_none());
    }
}
