use sqlx::PgPool;
use tracing::info;

use crate::error::AppError;
use crate::repos::error::RepoError;
use crate::repos::user_repo::{self, UserRow};
use crate::services::auth::{password, token::TokenService};

/// Sign-up flow: email uniqueness → hash → insert → issue token.
///
/// Returns the created user row and a token for it; the handler decides how
/// both travel back (body + session cookie).
pub async fn sign_up(
    db: &PgPool,
    tokens: &TokenService,
    name: &str,
    email: &str,
    plain_password: &str,
) -> Result<(UserRow, String), AppError> {
    if user_repo::find_by_email(db, email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let digest = password::hash(plain_password)?;

    let user = user_repo::create(db, name, email, &digest)
        .await
        .map_err(|e| match e {
            // Lost the race against a concurrent sign-up for the same email.
            RepoError::Conflict => AppError::DuplicateEmail,
            e => AppError::from(e),
        })?;

    let token = tokens.issue(user.id)?;
    info!(user_id = user.id, "user registered");

    Ok((user, token))
}

/// Login flow. The existence check precedes password verification
/// (NotFound vs InvalidCredentials).
pub async fn login(
    db: &PgPool,
    tokens: &TokenService,
    email: &str,
    plain_password: &str,
) -> Result<(UserRow, String), AppError> {
    let user = user_repo::find_by_email(db, email)
        .await?
        .ok_or(AppError::NotFound)?;

    if !password::verify(plain_password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = tokens.issue(user.id)?;
    info!(user_id = user.id, "login successful");

    Ok((user, token))
}
