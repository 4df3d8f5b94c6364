//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)이 이 함수들을 조합하여 트랜잭션 단위 작업을 만듭니다.
//!
//! 각 하위 모듈:
//! - `documents`: 문서 행 조회/삽입/수정, 사용자별 가시 문서 목록
//! - `versions`: 버전 원장 (추가 전용)
//! - `shares`: 공유 권한 레지스트리
//! - `users`: 사용자(Identity store)
//!
//! 한 번만 쿼리하는 함수는 `sqlx::Executor`를 제네릭으로 받아서
//! `&SqlitePool`과 트랜잭션(`&mut *tx`) 양쪽에서 그대로 쓸 수 있게 합니다.

pub mod documents;
pub mod shares;
pub mod users;
pub mod versions;

pub use documents::*;
pub use shares::*;
pub use versions::*;

use chrono::{Duration, NaiveDateTime, SubsecRound, Utc};

/// DB에 저장하는 타임스탬프 형식. SQLite의 `strftime('%Y-%m-%dT%H:%M:%fZ')`와 같은 모양이라
/// 문자열 비교가 곧 시간 비교가 됩니다.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// 현재 시각 (밀리초 단위)
pub fn now_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// `previous`보다 반드시 뒤인 타임스탬프를 만듭니다.
///
/// 같은 밀리초 안에 두 번 수정되거나 시계가 뒤로 가더라도
/// 문서의 `updated_at`은 항상 앞으로만 움직입니다.
pub fn next_timestamp(previous: &str) -> String {
    let now = Utc::now().trunc_subsecs(3);
    let next = match NaiveDateTime::parse_from_str(previous, TIMESTAMP_FORMAT) {
        Ok(prev) => now.max(prev.and_utc() + Duration::milliseconds(1)),
        Err(_) => now,
    };
    next.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
pub mod test_support {
    //! 테스트용 인메모리 데이터베이스

    use std::str::FromStr;

    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use sqlx::SqlitePool;

    use crate::models::{CreateDocumentRequest, Role, UpdateDocumentRequest, User};

    /// 마이그레이션이 적용된 전용 인메모리 풀.
    ///
    /// 인메모리 DB는 연결마다 따로 생기므로 연결을 하나로 고정하고 닫히지 않게 합니다.
    pub async fn memory_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    pub async fn insert_user(pool: &SqlitePool, email: &str) -> User {
        let id = uuid::Uuid::now_v7().to_string();
        super::users::create_user(pool, &id, email, "not-a-real-hash", Role::User)
            .await
            .unwrap()
    }

    pub fn create_request(
        title: &str,
        content: &str,
        visibility: Option<&str>,
    ) -> CreateDocumentRequest {
        CreateDocumentRequest {
            title: title.to_string(),
            content: content.to_string(),
            visibility: visibility.map(str::to_string),
        }
    }

    pub fn update_request(
        title: Option<&str>,
        content: &str,
        visibility: Option<&str>,
    ) -> UpdateDocumentRequest {
        UpdateDocumentRequest {
            title: title.map(str::to_string),
            content: content.to_string(),
            visibility: visibility.map(str::to_string),
        }
    }
}
