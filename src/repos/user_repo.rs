/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - PgPool を受け取り lookup / insert を提供
 * - "passwordHash" は repo の外 (response DTO) には出さない
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,

    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, name, email, "passwordHash", "createdAt", "updatedAt"
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<UserRow, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (name, email, "passwordHash")
        VALUES ($1, $2, $3)
        RETURNING id, name, email, "passwordHash", "createdAt", "updatedAt"
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}
