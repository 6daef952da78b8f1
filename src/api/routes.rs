/*
 * Responsibility
 * - URL 構造を定義 (/auth, /expense)
 * - 認証が必要な範囲へ middleware::auth を route_layer で適用する設計もここで決める
 */
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

use crate::api::handlers::{
    auth::{login, logout, sign_up},
    expenses::{create_expense, delete_expense, get_expense, list_expenses, update_expense},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let auth_routes = Router::new()
        .route("/sign-up", post(sign_up))
        .route("/login", post(login))
        .route("/logout", post(logout));

    let reads = Router::new()
        .route("/", get(list_expenses))
        .route("/{expense_id}", get(get_expense));
    // owner-scoped read mode では read も認証必須になる
    let reads = if state.owner_scoped_reads {
        reads.route_layer(from_fn_with_state(state.clone(), require_auth))
    } else {
        reads
    };

    let writes = Router::new()
        .route("/create", post(create_expense))
        .route("/{expense_id}", put(update_expense).delete(delete_expense))
        .route_layer(from_fn_with_state(state, require_auth));

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/expense", reads.merge(writes))
}
