/*
 * Responsibility
 * - Expenses の request/response DTO と category の固定セット
 * - create は全 field 必須、update は渡された field だけ検査する
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::expense_repo::ExpenseRow;

pub const CATEGORIES: [&str; 7] = [
    "Groceries",
    "Leisure",
    "Electronics",
    "Utilities",
    "Clothing",
    "Health",
    "Others",
];

fn is_valid_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    // 欠けていれば 0.0 になり、amount > 0 の検査で落ちる
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub category: String,
}

impl CreateExpenseRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.category.trim().is_empty()
        {
            return Err("title, description, amount and category are required");
        }
        if self.amount <= 0.0 {
            return Err("amount must be greater than 0");
        }
        if !is_valid_category(&self.category) {
            return Err("invalid category");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
}

impl UpdateExpenseRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(description) = &self.description
            && description.trim().is_empty()
        {
            return Err("description cannot be empty");
        }
        if let Some(amount) = self.amount
            && amount <= 0.0
        {
            return Err("amount must be greater than 0");
        }
        if let Some(category) = &self.category
            && !is_valid_category(category)
        {
            return Err("invalid category");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExpenseRow> for ExpenseResponse {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            amount: row.amount,
            category: row.category,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(amount: f64, category: &str) -> CreateExpenseRequest {
        CreateExpenseRequest {
            title: "Weekly groceries".to_string(),
            description: "Supermarket run".to_string(),
            amount,
            category: category.to_string(),
        }
    }

    #[test]
    fn a_complete_request_passes() {
        assert!(create_request(54.30, "Groceries").validate().is_ok());
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(create_request(0.0, "Groceries").validate().is_err());
        assert!(create_request(-3.0, "Groceries").validate().is_err());
        assert!(create_request(0.01, "Groceries").validate().is_ok());
    }

    #[test]
    fn category_outside_the_fixed_set_fails() {
        assert!(create_request(10.0, "Vacation").validate().is_err());
        for category in CATEGORIES {
            assert!(create_request(10.0, category).validate().is_ok());
        }
    }

    #[test]
    fn missing_fields_fail_with_400_semantics() {
        let req: CreateExpenseRequest =
            serde_json::from_str(r#"{"title": "Lamp", "category": "Electronics"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_with_no_fields_is_a_no_op_and_passes() {
        let req: UpdateExpenseRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_validates_only_provided_fields() {
        let req: UpdateExpenseRequest =
            serde_json::from_str(r#"{"category": "Vacation"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: UpdateExpenseRequest = serde_json::from_str(r#"{"amount": -1}"#).unwrap();
        assert!(req.validate().is_err());

        let req: UpdateExpenseRequest =
            serde_json::from_str(r#"{"title": "New title", "amount": 12.5}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}
