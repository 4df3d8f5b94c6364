//! # 계정 서비스
//!
//! 로그인, 최초 관리자 시드, 관리자용 사용자 관리를 담당합니다.
//! 공개 회원가입은 없고 사용자는 관리자가 만듭니다.
//!
//! 비밀번호는 Argon2id로 해싱합니다. 솔트는 매번 `OsRng`로 새로 만듭니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sqlx::SqlitePool;

use crate::db::users as db_users;
use crate::error::AppError;
use crate::middleware::auth::create_access_token;
use crate::models::user::*;

const MIN_PASSWORD_LEN: usize = 6;
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// 해시 문자열이 깨져 있으면 일치하지 않는 것으로 취급합니다.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// 이메일/비밀번호를 확인하고 액세스 토큰을 발급합니다.
///
/// 사용자가 없을 때와 비밀번호가 틀릴 때 같은 메시지를 돌려줍니다.
pub async fn login(
    pool: &SqlitePool,
    jwt_secret: &str,
    req: LoginRequest,
) -> Result<AuthResponse, AppError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Email and password are required".to_string(),
        ));
    }

    let user = db_users::find_by_email(pool, email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(&req.password, &user.password_hash) {
        tracing::debug!(user_id = %user.id, "login rejected");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = create_access_token(&user, jwt_secret)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

/// 관리자 계정이 없으면 만듭니다. 새로 만들었으면 `true`.
///
/// 서버를 몇 번 재시작해도 같은 이메일의 관리자는 하나뿐입니다.
pub async fn seed_admin(pool: &SqlitePool, email: &str, password: &str) -> Result<bool, AppError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::InvalidInput(
            "ADMIN_EMAIL and ADMIN_PASSWORD must not be empty".to_string(),
        ));
    }
    if db_users::find_by_email(pool, email.trim()).await?.is_some() {
        return Ok(false);
    }

    let id = uuid::Uuid::now_v7().to_string();
    let hash = hash_password(password)?;
    match db_users::create_user(pool, &id, email.trim(), &hash, Role::Admin).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, email = %user.email, "admin account seeded");
            Ok(true)
        }
        // 다른 인스턴스가 먼저 만든 경우
        Err(AppError::Conflict(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

pub async fn create_user(pool: &SqlitePool, req: CreateUserRequest) -> Result<User, AppError> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::InvalidInput("Invalid email address".to_string()));
    }
    validate_password(&req.password)?;
    let role = match req.role.as_deref().map(str::trim) {
        None | Some("") => Role::User,
        Some(raw) => raw.parse()?,
    };

    let id = uuid::Uuid::now_v7().to_string();
    let hash = hash_password(&req.password)?;
    let user = db_users::create_user(pool, &id, email, &hash, role).await?;

    tracing::info!(user_id = %user.id, role = role.as_str(), "user created");
    Ok(user)
}

pub async fn reset_password(
    pool: &SqlitePool,
    user_id: &str,
    req: ResetPasswordRequest,
) -> Result<(), AppError> {
    validate_password(&req.password)?;
    let hash = hash_password(&req.password)?;
    if !db_users::update_password(pool, user_id, &hash).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(user_id, "password reset");
    Ok(())
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, AppError> {
    db_users::list_users(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use crate::middleware::auth::verify_access_token;
    use rstest::rstest;

    const SECRET: &str = "test-secret";

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn new_user(email: &str, password: &str, role: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: password.to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
        assert!(!verify_password("hunter22", "not-a-real-hash"));
    }

    #[tokio::test]
    async fn seed_admin_is_idempotent_and_can_log_in() {
        let pool = memory_pool().await;
        assert!(seed_admin(&pool, "admin@docmv.local", "admin123").await.unwrap());
        assert!(!seed_admin(&pool, "admin@docmv.local", "other-pass").await.unwrap());

        let users = list_users(&pool).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);

        let auth = login(&pool, SECRET, login_request("admin@docmv.local", "admin123"))
            .await
            .unwrap();
        let claims = verify_access_token(&auth.token, SECRET).unwrap();
        assert_eq!(claims.sub, auth.user.id);
        assert_eq!(claims.role, Role::Admin);
    }

    #[tokio::test]
    async fn login_rejects_wrong_credentials_uniformly() {
        let pool = memory_pool().await;
        create_user(&pool, new_user("a@example.com", "secret1", None))
            .await
            .unwrap();

        for req in [
            login_request("a@example.com", "wrong-pass"),
            login_request("nobody@example.com", "secret1"),
        ] {
            let err = login(&pool, SECRET, req).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthorized(ref m) if m == INVALID_CREDENTIALS));
        }

        let err = login(&pool, SECRET, login_request("", "")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[rstest]
    #[case(new_user("no-at-sign", "secret1", None))]
    #[case(new_user("b@example.com", "short", None))]
    #[case(new_user("b@example.com", "secret1", Some("ROOT")))]
    #[tokio::test]
    async fn create_user_validates_input(#[case] req: CreateUserRequest) {
        let pool = memory_pool().await;
        let err = create_user(&pool, req).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(list_users(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_email() {
        let pool = memory_pool().await;
        let user = create_user(&pool, new_user("c@example.com", "secret1", Some("ADMIN")))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);

        let err = create_user(&pool, new_user("c@example.com", "secret2", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn reset_password_replaces_the_credential() {
        let pool = memory_pool().await;
        let user = create_user(&pool, new_user("d@example.com", "secret1", None))
            .await
            .unwrap();

        let req = ResetPasswordRequest {
            password: "secret2".to_string(),
        };
        reset_password(&pool, &user.id, req).await.unwrap();

        assert!(login(&pool, SECRET, login_request("d@example.com", "secret1"))
            .await
            .is_err());
        assert!(login(&pool, SECRET, login_request("d@example.com", "secret2"))
            .await
            .is_ok());

        let missing = ResetPasswordRequest {
            password: "secret3".to_string(),
        };
        assert!(matches!(
            reset_password(&pool, "ghost", missing).await,
            Err(AppError::NotFound)
        ));
    }
}
