//! Payout endpoints

use axum::extract::State;
use axum::{Extension, Json};
use shared::error::ApiResponse;
use shared::models::{
    AvailableProfit, Payout, PayoutComplete, PayoutRequest, PayoutReview, UserRole,
};

use crate::api::ApiResult;
use crate::auth::Caller;
use crate::db;
use crate::state::AppState;

/// POST /payouts
///
/// Owners and admins withdraw against their own availability.
pub async fn request(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<PayoutRequest>,
) -> ApiResult<Payout> {
    caller.require_any(&[UserRole::Owner, UserRole::Admin])?;
    let payout = db::payouts::request_payout(
        &state.pool,
        caller.user_id,
        payload.amount,
        payload.notes.as_deref(),
    )
    .await?;
    Ok(ApiResponse::success(payout))
}

/// PATCH /payouts/review
pub async fn review(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<PayoutReview>,
) -> ApiResult<Payout> {
    caller.require(UserRole::Admin)?;
    let payout = db::payouts::review_payout(
        &state.pool,
        payload.payout_id,
        payload.approved,
        payload.notes.as_deref(),
    )
    .await?;
    Ok(ApiResponse::success(payout))
}

/// PATCH /payouts/complete
pub async fn complete(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<PayoutComplete>,
) -> ApiResult<Payout> {
    caller.require(UserRole::Admin)?;
    let payout =
        db::payouts::complete_payout(&state.pool, payload.payout_id, payload.notes.as_deref())
            .await?;
    Ok(ApiResponse::success(payout))
}

/// GET /payouts/available-profit
pub async fn available_profit(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<AvailableProfit> {
    caller.require_any(&[UserRole::Owner, UserRole::Admin])?;
    let available = db::payouts::available_profit(&state.pool, caller.user_id).await?;
    Ok(ApiResponse::success(AvailableProfit {
        available_profit: available,
    }))
}
