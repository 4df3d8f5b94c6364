//! # 서비스(비즈니스 로직) 모듈
//!
//! 라우트 핸들러와 DB 계층 사이에서 규칙을 강제하는 함수들입니다.
//! - `access`: 읽기/편집 권한 판정 (순수 함수)
//! - `documents`: 문서 생성/조회/수정/목록, 버전 이력 (트랜잭션 단위)
//! - `sharing`: 소유자 전용 공유 권한 관리
//! - `accounts`: 로그인, 관리자 시드, 사용자 관리

pub mod access;
pub mod accounts;
pub mod documents;
pub mod sharing;

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// 작업을 데드라인 안에서 실행합니다.
///
/// 시간이 초과되면 future가 drop되고, 그 안에서 열려 있던 `sqlx::Transaction`은
/// drop 시점에 롤백됩니다. 호출자는 `AppError::Timeout`을 받고 처음부터 다시 시도해야 합니다.
pub async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout),
    }
}
