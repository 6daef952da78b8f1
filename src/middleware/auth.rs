//! Token 検証 → AuthCtx を extensions に入れる
//!
//! - session cookie (`token`) を優先し、無ければ `Authorization: Bearer` を見る
//! - どちらも無い / 検証失敗は 401（期限切れと改竄を呼び出し側に区別させない）
//! - この middleware は data store に触れない

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::CookiePolicy;
use crate::state::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers()).ok_or(AppError::Unauthorized)?;

    let user_id = match state.tokens.verify_user_id(&token) {
        Ok(user_id) => user_id,
        Err(err) => {
            tracing::warn!(error = ?err, "token verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(user_id));

    Ok(next.run(req).await)
}

// Cookie first, then the Authorization header.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = CookiePolicy::read(headers) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn bearer_header_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn cookie_wins_over_the_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token=from-cookie"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn no_token_means_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);

        // A non-Bearer Authorization header does not count either.
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwdw=="),
        );
        assert_eq!(extract_token(&headers), None);
    }
}
