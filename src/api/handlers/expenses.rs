/*
 * Responsibility
 * - /expense 系 CRUD handler
 * - read は既定で認証なし (OWNER_SCOPED_READS=true のときだけ owner スコープ)
 * - mutation は AuthCtx 必須 + services/authz の load-then-compare を通す
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::dto::expenses::{CreateExpenseRequest, ExpenseResponse, UpdateExpenseRequest},
    api::extractors::{AuthCtxExtractor, MaybeAuthCtx},
    error::AppError,
    repos::expense_repo,
    services::authz,
    state::AppState,
};

pub async fn list_expenses(
    State(state): State<AppState>,
    MaybeAuthCtx(ctx): MaybeAuthCtx,
) -> Result<Json<Vec<ExpenseResponse>>, AppError> {
    let rows = if state.owner_scoped_reads {
        let ctx = ctx.ok_or(AppError::Unauthorized)?;
        expense_repo::list_by_owner(&state.db, ctx.user_id).await?
    } else {
        expense_repo::list(&state.db).await?
    };

    Ok(Json(rows.into_iter().map(ExpenseResponse::from).collect()))
}

pub async fn get_expense(
    State(state): State<AppState>,
    MaybeAuthCtx(ctx): MaybeAuthCtx,
    Path(expense_id): Path<i64>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let row = expense_repo::get(&state.db, expense_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if state.owner_scoped_reads {
        let ctx = ctx.ok_or(AppError::Unauthorized)?;
        // read 側は他人の expense の存在を明かさない（403 ではなく 404）
        authz::ensure_owner(&row, ctx.user_id).map_err(|_| AppError::NotFound)?;
    }

    Ok(Json(row.into()))
}

pub async fn create_expense(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let row = expense_repo::create(
        &state.db,
        ctx.user_id,
        &req.title,
        &req.description,
        req.amount,
        &req.category,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_expense(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(expense_id): Path<i64>,
    Json(req): Json<UpdateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    // 存在確認 → owner 比較。両方通ってから mutation に進む
    authz::load_owned_expense(&state.db, expense_id, ctx.user_id).await?;

    let row = expense_repo::update(
        &state.db,
        expense_id,
        req.title.as_deref(),
        req.description.as_deref(),
        req.amount,
        req.category.as_deref(),
    )
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(Json(row.into()))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(expense_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    authz::load_owned_expense(&state.db, expense_id, ctx.user_id).await?;

    let deleted = expense_repo::delete(&state.db, expense_id).await?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::OK)
}
