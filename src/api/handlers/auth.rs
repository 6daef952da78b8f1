/*
 * Responsibility
 * - /auth 系 handler (sign-up / login / logout)
 * - DTO validation → services/auth/account 呼び出し → session cookie 付与
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use serde_json::{Value, json};

use crate::{
    api::dto::auth::{AuthResponse, LoginRequest, SignUpRequest},
    error::AppError,
    services::auth::account,
    state::AppState,
};

pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, HeaderMap, Json<AuthResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let (user, token) =
        account::sign_up(&state.db, &state.tokens, &req.name, &req.email, &req.password).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, state.cookies.set(&token)?);

    Ok((
        StatusCode::CREATED,
        headers,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let (user, token) = account::login(&state.db, &state.tokens, &req.email, &req.password).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, state.cookies.set(&token)?);

    Ok((
        headers,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

/// Cookie を set 時と同一の属性で消すだけ。冪等（無い cookie を消しても成功）
pub async fn logout(State(state): State<AppState>) -> Result<(HeaderMap, Json<Value>), AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, state.cookies.clear()?);

    Ok((headers, Json(json!({"status": "ok"}))))
}
