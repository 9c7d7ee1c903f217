//! Loyalty endpoints

use axum::extract::State;
use axum::{Extension, Json};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{AwardPoints, Loyalty, RankInfo, UserRole};

use crate::api::ApiResult;
use crate::auth::Caller;
use crate::db;
use crate::state::AppState;

/// GET /loyalty/rank
///
/// Rank and balance for the calling customer; customers that never
/// earned points read as BRONZE at zero.
pub async fn get_rank(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<RankInfo> {
    let info = db::loyalty::get_rank(&state.pool, caller.user_id).await?;
    Ok(ApiResponse::success(info))
}

/// POST /loyalty/points
///
/// Manual adjustment, admin only. Requires a positive delta and a
/// non-empty reason.
pub async fn award_points(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<AwardPoints>,
) -> ApiResult<Loyalty> {
    caller.require(UserRole::Admin)?;
    let reason = payload.reason.trim();
    if reason.is_empty() {
        return Err(AppError::new(ErrorCode::ReasonRequired));
    }
    let loyalty =
        db::loyalty::award_points(&state.pool, payload.customer_id, payload.points, reason).await?;
    Ok(ApiResponse::success(loyalty))
}
