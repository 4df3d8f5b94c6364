//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수(또는 `.env`)에서 서버 설정값을 읽어옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: JWT 서명 비밀키 (필수)
//! - `HOST` / `PORT`: 바인딩 주소 (기본값 0.0.0.0:8080)
//! - `ADMIN_EMAIL` / `ADMIN_PASSWORD`: 시작 시 보장되는 관리자 계정
//! - `OPERATION_TIMEOUT_SECS`: 문서 작업 하나에 허용되는 최대 시간 (기본 10초)
//! - `DATABASE_MAX_CONNECTIONS`: 연결 풀 크기 (기본 5)

use std::env;
use std::time::Duration;

/// 애플리케이션 전체 설정
///
/// 서버 시작 시 한 번 읽어 `AppState`로 나눠 갖습니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/docmv.db?mode=rwc")
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub admin_email: String,
    pub admin_password: String,
    /// 문서 작업 데드라인. 초과하면 트랜잭션을 롤백하고 `Timeout`을 돌려줍니다.
    pub operation_timeout: Duration,
    pub max_connections: u32,
}

impl Config {
    /// 프로세스 환경변수에서 설정을 읽습니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `JWT_SECRET`이 없으면 에러가 발생합니다.
    /// 나머지는 기본값이 있으며, 숫자로 파싱할 수 없는 값도 기본값으로 대체됩니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// 임의의 조회 함수로 설정을 구성합니다. (테스트에서 환경변수를 건드리지 않기 위함)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let or_default = |key: &str, default: &str| -> String {
            lookup(key).unwrap_or_else(|_| default.to_string())
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL")?,
            jwt_secret: lookup("JWT_SECRET")?,
            host: or_default("HOST", "0.0.0.0"),
            port: or_default("PORT", "8080").parse().unwrap_or(8080),
            admin_email: or_default("ADMIN_EMAIL", "admin@docmv.local"),
            admin_password: or_default("ADMIN_PASSWORD", "admin123"),
            operation_timeout: Duration::from_secs(
                or_default("OPERATION_TIMEOUT_SECS", "10").parse().unwrap_or(10),
            ),
            max_connections: or_default("DATABASE_MAX_CONNECTIONS", "5")
                .parse()
                .unwrap_or(5),
        })
    }
}
