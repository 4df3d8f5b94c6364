//! # 공유 권한 관리
//!
//! 문서 소유자만 권한을 부여/변경/회수할 수 있습니다.
//! 편집 권한을 받은 사용자라도 다른 사람에게 권한을 줄 수는 없습니다.
//!
//! 권한은 문서의 공개 범위와 독립적으로 저장됩니다.
//! PRIVATE 문서에 권한을 미리 만들어 두면 SHARED로 바뀌는 순간 효력이 생깁니다.

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::*;

async fn owned_document(pool: &SqlitePool, actor: &str, id: &str) -> Result<Document, AppError> {
    let document = db::get_document(pool, id).await?.ok_or(AppError::NotFound)?;
    if document.owner_id != actor {
        tracing::debug!(document_id = %id, actor, "share management denied");
        return Err(AppError::Forbidden);
    }
    Ok(document)
}

pub async fn list_document_shares(
    pool: &SqlitePool,
    actor: &str,
    document_id: &str,
) -> Result<Vec<ShareGrant>, AppError> {
    owned_document(pool, actor, document_id).await?;
    db::list_shares(pool, document_id).await
}

/// 권한을 부여하거나 역할을 바꿉니다 (쌍마다 하나).
pub async fn share_document(
    pool: &SqlitePool,
    actor: &str,
    document_id: &str,
    req: UpsertShareRequest,
) -> Result<ShareGrant, AppError> {
    let role: ShareRole = req.role.trim().parse()?;
    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::InvalidInput("user_id is required".to_string()));
    }

    let document = owned_document(pool, actor, document_id).await?;
    if user_id == document.owner_id {
        return Err(AppError::InvalidInput(
            "the owner already has full access".to_string(),
        ));
    }
    if db::users::find_by_id(pool, user_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let grant = db::upsert_share(pool, &document.id, user_id, role).await?;
    tracing::info!(
        document_id = %document.id,
        user_id,
        role = role.as_str(),
        "share granted"
    );
    Ok(grant)
}

/// 권한을 회수합니다. 회수할 권한이 없으면 `NotFound`.
pub async fn revoke_share(
    pool: &SqlitePool,
    actor: &str,
    document_id: &str,
    user_id: &str,
) -> Result<(), AppError> {
    owned_document(pool, actor, document_id).await?;
    if !db::delete_share(pool, document_id, user_id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(document_id, user_id, "share revoked");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{create_request, insert_user, memory_pool, update_request};
    use crate::services::documents::{create_document, read_document, update_document};

    fn share(user_id: &str, role: &str) -> UpsertShareRequest {
        UpsertShareRequest {
            user_id: user_id.to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn only_the_owner_manages_shares() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner@example.com").await.id;
        let editor = insert_user(&pool, "editor@example.com").await.id;
        let third = insert_user(&pool, "third@example.com").await.id;
        let doc = create_document(&pool, &owner, create_request("Plan", "v1", Some("SHARED")))
            .await
            .unwrap();

        share_document(&pool, &owner, &doc.id, share(&editor, "EDIT"))
            .await
            .unwrap();

        let err = share_document(&pool, &editor, &doc.id, share(&third, "VIEW"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        assert!(matches!(
            revoke_share(&pool, &editor, &doc.id, &editor).await,
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            list_document_shares(&pool, &editor, &doc.id).await,
            Err(AppError::Forbidden)
        ));

        let grants = list_document_shares(&pool, &owner, &doc.id).await.unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].user_id, editor);
        assert_eq!(grants[0].role, ShareRole::Edit);
    }

    #[tokio::test]
    async fn rejects_bad_grants_before_touching_the_registry() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner@example.com").await.id;
        let reader = insert_user(&pool, "reader@example.com").await.id;
        let doc = create_document(&pool, &owner, create_request("Plan", "v1", Some("SHARED")))
            .await
            .unwrap();

        let cases = [
            (share(&reader, "ADMIN"), "invalid role"),
            (share("", "VIEW"), "missing user"),
            (share(&owner, "VIEW"), "owner"),
        ];
        for (req, label) in cases {
            let err = share_document(&pool, &owner, &doc.id, req).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "{label}");
        }

        let err = share_document(&pool, &owner, &doc.id, share("ghost", "VIEW"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        let err = share_document(&pool, &owner, "missing-doc", share(&reader, "VIEW"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        assert!(list_document_shares(&pool, &owner, &doc.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_share_body_is_invalid_input() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner@example.com").await.id;
        let doc = create_document(&pool, &owner, create_request("Plan", "v1", Some("SHARED")))
            .await
            .unwrap();

        let req: UpsertShareRequest = serde_json::from_str("{}").unwrap();
        let err = share_document(&pool, &owner, &doc.id, req).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn revoking_removes_access_immediately() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner@example.com").await.id;
        let reader = insert_user(&pool, "reader@example.com").await.id;
        let doc = create_document(&pool, &owner, create_request("Plan", "v1", Some("SHARED")))
            .await
            .unwrap();

        share_document(&pool, &owner, &doc.id, share(&reader, "VIEW"))
            .await
            .unwrap();
        assert!(read_document(&pool, &reader, &doc.id).await.is_ok());

        revoke_share(&pool, &owner, &doc.id, &reader).await.unwrap();
        assert!(matches!(
            read_document(&pool, &reader, &doc.id).await,
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            revoke_share(&pool, &owner, &doc.id, &reader).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn grant_on_private_document_waits_for_shared() {
        let pool = memory_pool().await;
        let owner = insert_user(&pool, "owner@example.com").await.id;
        let editor = insert_user(&pool, "editor@example.com").await.id;
        let doc = create_document(&pool, &owner, create_request("Plan", "v1", None))
            .await
            .unwrap();

        share_document(&pool, &owner, &doc.id, share(&editor, "EDIT"))
            .await
            .unwrap();
        let edit = update_request(None, "v2", None);
        assert!(matches!(
            update_document(&pool, &editor, &doc.id, edit).await,
            Err(AppError::Forbidden)
        ));

        let flip = update_request(None, "v2", Some("SHARED"));
        update_document(&pool, &owner, &doc.id, flip).await.unwrap();

        let edit = update_request(None, "v3", None);
        update_document(&pool, &editor, &doc.id, edit).await.unwrap();
        assert_eq!(read_document(&pool, &owner, &doc.id).await.unwrap().content, "v3");
    }
}
