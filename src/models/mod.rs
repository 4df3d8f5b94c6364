//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체들을 정의합니다.
//! - `document`: 문서(Document)와 공개 범위(Visibility), 생성/수정 요청
//! - `share`: 공유 권한(ShareGrant)과 역할(ShareRole)
//! - `user`: 사용자(User)와 인증/관리자 요청
//! - `version`: 문서 버전(DocumentVersion)
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Document`처럼 짧게 접근합니다.

pub mod document;
pub mod share;
pub mod user;
pub mod version;

pub use document::*;
pub use share::*;
pub use user::*;
pub use version::*;
