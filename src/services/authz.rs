/*
 * Responsibility
 * - Expense の mutation 前に通す ownership policy
 * - load-then-compare: 存在確認が先、owner 比較はその後
 */
use sqlx::PgPool;

use crate::error::AppError;
use crate::repos::expense_repo::{self, ExpenseRow};

/// Fetch the expense and check ownership, in that order.
///
/// A nonexistent id answers NotFound before any ownership comparison, so a
/// caller can never learn who owns an id that doesn't resolve.
pub async fn load_owned_expense(
    db: &PgPool,
    expense_id: i64,
    user_id: i64,
) -> Result<ExpenseRow, AppError> {
    let row = expense_repo::get(db, expense_id)
        .await?
        .ok_or(AppError::NotFound)?;

    ensure_owner(&row, user_id)?;

    Ok(row)
}

/// The single place a resolved identity is compared against an expense's
/// owner column.
pub fn ensure_owner(expense: &ExpenseRow, user_id: i64) -> Result<(), AppError> {
    if expense.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn expense_owned_by(user_id: i64) -> ExpenseRow {
        ExpenseRow {
            id: 1,
            title: "Weekly groceries".to_string(),
            description: "Supermarket run".to_string(),
            amount: 54.30,
            category: "Groceries".to_string(),
            user_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn the_owner_passes() {
        assert!(ensure_owner(&expense_owned_by(7), 7).is_ok());
    }

    #[test]
    fn anyone_else_is_forbidden() {
        assert!(matches!(
            ensure_owner(&expense_owned_by(7), 8),
            Err(AppError::Forbidden)
        ));
    }
}
