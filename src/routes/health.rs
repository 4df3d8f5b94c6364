//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /health` → `{ "status": "ok" }`
//!
//! 인증 없이 호출되며, 로드밸런서나 컨테이너 헬스체크가 사용합니다.

use axum::Json;
use serde_json::{json, Value};

/// 고정된 JSON만 반환하므로 실패하지 않습니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
