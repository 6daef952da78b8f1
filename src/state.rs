/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, tokens: TokenService, cookies: CookiePolicy
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::services::auth::{CookiePolicy, TokenService};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenService>,
    pub cookies: CookiePolicy,
    pub owner_scoped_reads: bool,
}

impl AppState {
    pub fn new(
        db: PgPool,
        tokens: Arc<TokenService>,
        cookies: CookiePolicy,
        owner_scoped_reads: bool,
    ) -> Self {
        Self {
            db,
            tokens,
            cookies,
            owner_scoped_reads,
        }
    }
}
