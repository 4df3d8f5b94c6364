//! # 접근 제어 평가기
//!
//! (문서, 행위자, 공유 권한)으로 읽기/편집 가능 여부를 판정합니다.
//!
//! 공개 범위가 1차 관문입니다. PUBLIC은 권한과 무관하게 모두에게 읽기를 열고,
//! PRIVATE에서는 공유 권한이 남아 있어도 효력이 없습니다.
//! 권한은 SHARED일 때만 참조됩니다.
//!
//! `can_read`/`can_edit`는 부수 효과가 없는 전체 함수(total function)이므로
//! 잠금 없이 몇 번이든, 동시에 호출해도 됩니다.

use sqlx::{Executor, Sqlite};

use crate::db;
use crate::error::AppError;
use crate::models::{Document, ShareRole, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Read,
    Edit,
}

/// 소유자이거나, PUBLIC이거나, SHARED이면서 (역할 무관) 권한이 있으면 읽기 가능.
pub fn can_read(document: &Document, actor: &str, grant: Option<ShareRole>) -> bool {
    document.owner_id == actor
        || document.visibility == Visibility::Public
        || (document.visibility == Visibility::Shared && grant.is_some())
}

/// 소유자이거나, SHARED이면서 EDIT 권한이 있으면 편집 가능.
pub fn can_edit(document: &Document, actor: &str, grant: Option<ShareRole>) -> bool {
    document.owner_id == actor
        || (document.visibility == Visibility::Shared && grant == Some(ShareRole::Edit))
}

pub fn permits(
    permission: Permission,
    document: &Document,
    actor: &str,
    grant: Option<ShareRole>,
) -> bool {
    match permission {
        Permission::Read => can_read(document, actor, grant),
        Permission::Edit => can_edit(document, actor, grant),
    }
}

/// 권한이 없으면 `Forbidden`을 돌려줍니다.
///
/// 공유 레지스트리는 판정이 실제로 권한에 달려 있을 때(SHARED 문서의 비소유자)만 조회합니다.
pub async fn authorize<'e, E>(
    executor: E,
    document: &Document,
    actor: &str,
    permission: Permission,
) -> Result<(), AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let needs_grant = document.owner_id != actor && document.visibility == Visibility::Shared;
    let grant = if needs_grant {
        db::get_share(executor, &document.id, actor)
            .await?
            .map(|g| g.role)
    } else {
        None
    };

    if permits(permission, document, actor, grant) {
        Ok(())
    } else {
        tracing::debug!(
            document_id = %document.id,
            actor,
            ?permission,
            visibility = %document.visibility,
            "access denied"
        );
        Err(AppError::Forbidden)
    }
}
