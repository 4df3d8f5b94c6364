use crate::error::AppError;
use crate::models::user::{Role, User};
use sqlx::{Executor, Sqlite};

pub async fn create_user<'e, E>(
    executor: E,
    id: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> Result<User, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES (?, ?, ?, ?)
        RETURNING id, email, password_hash, role, created_at
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::from_unique_violation(e, "Email already registered"))
}

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, role, created_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<User>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, role, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn list_users<'e, E>(executor: E) -> Result<Vec<User>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, role, created_at
        FROM users
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(users)
}

/// 비밀번호 해시를 교체합니다. 사용자가 없으면 `false`.
pub async fn update_password<'e, E>(
    executor: E,
    id: &str,
    password_hash: &str,
) -> Result<bool, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
