//! # 문서 코어
//!
//! 문서 생성/조회/수정/목록과 버전 이력 조회를 담당합니다.
//!
//! 생성과 수정은 세 단계를 하나의 트랜잭션으로 묶습니다:
//! 1. 문서 행 삽입 또는 제목/공개 범위 변경
//! 2. 버전 원장에 새 버전 추가
//! 3. `latest_version_id`를 새 버전으로 옮기고 `updated_at` 갱신
//!
//! 어느 단계든 실패하면 트랜잭션이 drop되면서 전체가 롤백되므로,
//! 동시에 읽는 쪽은 수정 전 상태나 수정 후 상태 중 하나만 봅니다.
//! 같은 문서에 대한 동시 수정은 마지막 커밋이 포인터를 가져가고,
//! 두 버전 모두 원장에 남습니다.

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::*;
use crate::services::access::{self, Permission};

/// 새 문서를 첫 버전과 함께 만듭니다.
///
/// 제목이 비어 있으면 `InvalidInput`. 공개 범위가 없거나 비어 있으면 PRIVATE,
/// 알 수 없는 값이면 `InvalidInput`. 검증은 저장소를 건드리기 전에 끝납니다.
pub async fn create_document(
    pool: &SqlitePool,
    actor: &str,
    req: CreateDocumentRequest,
) -> Result<Document, AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("title is required".to_string()));
    }
    let visibility = Visibility::parse_optional(req.visibility.as_deref())?.unwrap_or_default();

    let now = db::now_timestamp();
    let mut document = Document {
        id: uuid::Uuid::now_v7().to_string(),
        owner_id: actor.to_string(),
        title: title.to_string(),
        visibility,
        latest_version_id: None,
        created_at: now.clone(),
        updated_at: now.clone(),
    };

    let mut tx = pool.begin().await?;
    db::insert_document(&mut tx, &document).await?;
    let version = db::append_version(&mut tx, &document.id, &req.content, actor, &now).await?;
    db::set_latest_version(&mut tx, &document.id, &version.id, &now).await?;
    tx.commit().await?;

    tracing::info!(
        document_id = %document.id,
        version_id = %version.id,
        actor,
        "document created"
    );

    document.latest_version_id = Some(version.id);
    Ok(document)
}

/// 문서와 최신 버전 내용을 조회합니다.
///
/// 버전은 불변이고 포인터는 커밋된 버전만 가리키므로,
/// 문서 행을 읽은 뒤 버전을 따로 읽어도 일관된 스냅샷이 됩니다.
pub async fn read_document(
    pool: &SqlitePool,
    actor: &str,
    id: &str,
) -> Result<DocumentDetail, AppError> {
    let document = db::get_document(pool, id).await?.ok_or(AppError::NotFound)?;
    access::authorize(pool, &document, actor, Permission::Read).await?;

    let content = match &document.latest_version_id {
        Some(version_id) => {
            db::get_version(pool, version_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "document {} points at missing version {}",
                        document.id, version_id
                    ))
                })?
                .content
        }
        // 포인터가 아직 없으면 원장에서 가장 최근 버전을 찾고, 그것도 없으면 빈 내용
        None => db::get_latest_version(pool, &document.id)
            .await?
            .map(|v| v.content)
            .unwrap_or_default(),
    };

    Ok(DocumentDetail { document, content })
}

/// 문서를 수정하고 새 버전을 추가합니다.
///
/// - 제목: 비어 있지 않으면 교체, 비었거나 없으면 기존 제목 유지
/// - 공개 범위: 유효한 값이면 교체, 없으면 유지, 알 수 없는 값이면 `InvalidInput`
/// - 내용: 항상 새 버전으로 기록됩니다. 메타데이터만 바뀌어도 버전이 하나 늘어납니다.
pub async fn update_document(
    pool: &SqlitePool,
    actor: &str,
    id: &str,
    req: UpdateDocumentRequest,
) -> Result<Document, AppError> {
    let new_visibility = Visibility::parse_optional(req.visibility.as_deref())?;
    let new_title = req
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty());

    let mut tx = pool.begin().await?;
    if !db::lock_document(&mut tx, id).await? {
        return Err(AppError::NotFound);
    }
    let mut document = db::get_document(&mut *tx, id).await?.ok_or(AppError::NotFound)?;
    access::authorize(&mut *tx, &document, actor, Permission::Edit).await?;

    if let Some(title) = new_title {
        document.title = title.to_string();
    }
    if let Some(visibility) = new_visibility {
        document.visibility = visibility;
    }
    let stamp = db::next_timestamp(&document.updated_at);

    db::update_document_metadata(&mut tx, &document.id, &document.title, document.visibility, &stamp)
        .await?;
    let version = db::append_version(&mut tx, &document.id, &req.content, actor, &stamp).await?;
    db::set_latest_version(&mut tx, &document.id, &version.id, &stamp).await?;
    tx.commit().await?;

    tracing::info!(
        document_id = %document.id,
        version_id = %version.id,
        actor,
        "document updated"
    );

    document.latest_version_id = Some(version.id);
    document.updated_at = stamp;
    Ok(document)
}

/// 사용자가 읽을 수 있는 모든 문서 (최근 수정순, 중복 없음)
pub async fn list_visible(pool: &SqlitePool, actor: &str) -> Result<Vec<Document>, AppError> {
    db::list_visible_documents(pool, actor).await
}

/// 문서의 버전 이력 (최신순). 읽기 권한이 필요합니다.
pub async fn list_versions(
    pool: &SqlitePool,
    actor: &str,
    document_id: &str,
) -> Result<Vec<DocumentVersion>, AppError> {
    let document = db::get_document(pool, document_id)
        .await?
        .ok_or(AppError::NotFound)?;
    access::authorize(pool, &document, actor, Permission::Read).await?;

    db::list_versions(pool, document_id).await
}

/// 특정 버전 하나를 조회합니다. 다른 문서의 버전 ID를 넘기면 `NotFound`.
pub async fn get_version(
    pool: &SqlitePool,
    actor: &str,
    document_id: &str,
    version_id: &str,
) -> Result<DocumentVersion, AppError> {
    let document = db::get_document(pool, document_id)
        .await?
        .ok_or(AppError::NotFound)?;
    access::authorize(pool, &document, actor, Permission::Read).await?;

    db::get_version(pool, version_id)
        .await?
        .filter(|v| v.document_id == document.id)
        .ok_or(AppError::NotFound)
}
