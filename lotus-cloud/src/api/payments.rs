//! Payment endpoints

use axum::Extension;
use axum::extract::{Path, State};
use shared::error::ApiResponse;
use shared::models::Payment;

use crate::api::ApiResult;
use crate::auth::Caller;
use crate::db;
use crate::state::AppState;

/// PATCH /payments/{booking_id}/refund
pub async fn refund(
    State(state): State<AppState>,
    Extension(_caller): Extension<Caller>,
    Path(booking_id): Path<i64>,
) -> ApiResult<Payment> {
    let payment = db::payments::refund(&state.pool, booking_id).await?;
    Ok(ApiResponse::success(payment))
}
