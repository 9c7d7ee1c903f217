//! HTTP API
//!
//! Every response body uses the shared envelope; handlers return
//! [`ApiResult`] and let [`AppError`] map failures onto status codes.
//! All routes except the health check go through the caller middleware.

pub mod bookings;
pub mod health;
pub mod loyalty;
pub mod payments;
pub mod payouts;

use axum::routing::{get, patch, post};
use axum::{Router, middleware};
use shared::error::{ApiResponse, AppError};
use tower_http::trace::TraceLayer;

use crate::auth::caller_middleware;
use crate::state::AppState;

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let booking_routes = Router::new()
        .route("/bookings", post(bookings::create))
        .route("/bookings/{id}", get(bookings::get_by_id))
        .route("/bookings/{id}/status", patch(bookings::set_status))
        .route("/bookings/{id}/reschedule", patch(bookings::reschedule))
        .route("/bookings/{id}/cancel", patch(bookings::cancel));

    let payment_routes =
        Router::new().route("/payments/{booking_id}/refund", patch(payments::refund));

    let payout_routes = Router::new()
        .route("/payouts", post(payouts::request))
        .route("/payouts/review", patch(payouts::review))
        .route("/payouts/complete", patch(payouts::complete))
        .route("/payouts/available-profit", get(payouts::available_profit));

    let loyalty_routes = Router::new()
        .route("/loyalty/rank", get(loyalty::get_rank))
        .route("/loyalty/points", post(loyalty::award_points));

    let protected = Router::new()
        .merge(booking_routes)
        .merge(payment_routes)
        .merge(payout_routes)
        .merge(loyalty_routes)
        .layer(middleware::from_fn(caller_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
