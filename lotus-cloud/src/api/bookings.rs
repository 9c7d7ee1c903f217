//! Booking endpoints

use axum::extract::{Path, State};
use axum::{Extension, Json};
use http::StatusCode;
use shared::error::{ApiResponse, AppError};
use shared::models::{
    Booking, BookingCreate, BookingReschedule, BookingStatusUpdate, StatusChange, UserRole,
};

use crate::api::ApiResult;
use crate::auth::Caller;
use crate::db;
use crate::state::AppState;

/// POST /bookings
///
/// Customers book for themselves; the caller's id becomes the
/// customer id.
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(payload): Json<BookingCreate>,
) -> Result<(StatusCode, ApiResponse<Booking>), AppError> {
    caller.require(UserRole::Customer)?;
    let booking = db::bookings::create_booking(&state.pool, caller.user_id, &payload).await?;
    Ok((StatusCode::CREATED, ApiResponse::success(booking)))
}

/// GET /bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> ApiResult<Booking> {
    let booking = db::bookings::find_visible(&state.pool, id, caller.user_id, caller.role).await?;
    Ok(ApiResponse::success(booking))
}

/// PATCH /bookings/{id}/status
///
/// Returns the updated booking together with the loyalty outcome of the
/// transition.
pub async fn set_status(
    State(state): State<AppState>,
    Extension(_caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingStatusUpdate>,
) -> ApiResult<StatusChange> {
    let change = db::bookings::set_status(&state.pool, id, payload.status).await?;
    Ok(ApiResponse::success(change))
}

/// PATCH /bookings/{id}/reschedule
pub async fn reschedule(
    State(state): State<AppState>,
    Extension(_caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingReschedule>,
) -> ApiResult<Booking> {
    let booking = db::bookings::reschedule(&state.pool, id, payload.scheduled_at).await?;
    Ok(ApiResponse::success(booking))
}

/// PATCH /bookings/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Extension(_caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> ApiResult<Booking> {
    let booking = db::bookings::cancel(&state.pool, id).await?;
    Ok(ApiResponse::success(booking))
}
