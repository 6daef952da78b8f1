use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::AuthCtx;

/// Handler で AuthCtx を受け取るための extractor
/// middleware が AuthCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（認証がかかってない・ミドルウェア未設定）
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .copied()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}

/// 認証があれば AuthCtx、無ければ None（owner-scoped read mode 用）
pub struct MaybeAuthCtx(pub Option<AuthCtx>);

impl FromRequestParts<AppState> for MaybeAuthCtx {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthCtx(parts.extensions.get::<AuthCtx>().copied()))
    }
}
