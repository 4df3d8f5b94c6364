//! # 미들웨어 모듈
//!
//! - `auth`: JWT 발급/검증과 `AuthUser`/`AdminUser` 추출기

pub mod auth;
