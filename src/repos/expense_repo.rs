/*
 * Responsibility
 * - expenses CRUD
 * - "userId" の FK (CASCADE) 前提、owner の比較は services/authz 側の責務
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExpenseRow {
    pub id: i64,

    pub title: String,
    pub description: String,
    pub amount: f64,
    pub category: String,

    #[sqlx(rename = "userId")]
    pub user_id: i64,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn list(db: &PgPool) -> Result<Vec<ExpenseRow>, RepoError> {
    let rows = sqlx::query_as::<_, ExpenseRow>(
        r#"
        SELECT
            id, title, description, amount, category, "userId", "createdAt", "updatedAt"
        FROM expenses
        ORDER BY "createdAt" DESC
        "#,
    )
    .fetch_all(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(rows)
}

pub async fn list_by_owner(db: &PgPool, user_id: i64) -> Result<Vec<ExpenseRow>, RepoError> {
    let rows = sqlx::query_as::<_, ExpenseRow>(
        r#"
        SELECT
            id, title, description, amount, category, "userId", "createdAt", "updatedAt"
        FROM expenses
        WHERE "userId" = $1
        ORDER BY "createdAt" DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(rows)
}

pub async fn get(db: &PgPool, expense_id: i64) -> Result<Option<ExpenseRow>, RepoError> {
    let row = sqlx::query_as::<_, ExpenseRow>(
        r#"
        SELECT
            id, title, description, amount, category, "userId", "createdAt", "updatedAt"
        FROM expenses
        WHERE id = $1
        "#,
    )
    .bind(expense_id)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn create(
    db: &PgPool,
    user_id: i64,
    title: &str,
    description: &str,
    amount: f64,
    category: &str,
) -> Result<ExpenseRow, RepoError> {
    let row = sqlx::query_as::<_, ExpenseRow>(
        r#"
        INSERT INTO expenses (title, description, amount, category, "userId")
        VALUES ($1, $2, $3, $4, $5)
        RETURNING
            id, title, description, amount, category, "userId", "createdAt", "updatedAt"
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(amount)
    .bind(category)
    .bind(user_id)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    expense_id: i64,
    title: Option<&str>,
    description: Option<&str>,
    amount: Option<f64>,
    category: Option<&str>,
) -> Result<Option<ExpenseRow>, RepoError> {
    let row = sqlx::query_as::<_, ExpenseRow>(
        r#"
        UPDATE expenses
        SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            amount = COALESCE($4, amount),
            category = COALESCE($5, category),
            "updatedAt" = now()
        WHERE id = $1
        RETURNING
            id, title, description, amount, category, "userId", "createdAt", "updatedAt"
        "#,
    )
    .bind(expense_id)
    .bind(title)
    .bind(description)
    .bind(amount)
    .bind(category)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, expense_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM expenses
        WHERE id = $1
        "#,
    )
    .bind(expense_id)
    .execute(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(result.rows_affected() > 0)
}
