/*
 * Responsibility
 * - auth 系 (sign-up / login) の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 * - "passwordHash" は response 側に決して出さない
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::user_repo::UserRow;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    // serde(default): 欠けている field は空文字になり validate() が 400 で拾う
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.trim().is_empty()
        {
            return Err("name, email and password are required");
        }
        if !self.email.contains('@') {
            return Err("email is not a valid address");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err("email and password are required");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_sign_up_request_passes() {
        let req = SignUpRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "SecureP@ss1".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn any_missing_sign_up_field_fails() {
        // serde(default) turns an absent field into an empty string.
        let req: SignUpRequest = serde_json::from_str(r#"{"name": "Alice"}"#).unwrap();
        assert!(req.validate().is_err());

        let req = SignUpRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "   ".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn sign_up_email_needs_an_at_sign() {
        let req = SignUpRequest {
            name: "Alice".to_string(),
            email: "alice.example.com".to_string(),
            password: "SecureP@ss1".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn login_requires_both_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"email": "a@b.c"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: LoginRequest =
            serde_json::from_str(r#"{"email": "a@b.c", "password": "pw"}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}
