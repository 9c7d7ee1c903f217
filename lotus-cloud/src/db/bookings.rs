//! Booking Repository
//!
//! Creation and the status machine both live here. Every operation runs
//! in a single transaction; a failed step rolls back everything written
//! before it, including coupon redemption counts.

use crate::db::{coupons, loyalty, settings, spas, users};
use crate::error::{ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    BonusOutcome, Booking, BookingCreate, BookingStatus, COMPLETION_BONUS_POINTS, PaymentStatus,
    StatusChange, UserRole,
};
use shared::money;
use sqlx::{SqliteConnection, SqlitePool};

const BOOKING_SELECT: &str = "SELECT id, spa_id, service_id, customer_id, staff_id, scheduled_at, status, coupon_code, total_price, final_price, commission_amount, created_at, updated_at FROM bookings";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> ServiceResult<Option<Booking>> {
    let sql = format!("{BOOKING_SELECT} WHERE id = ?");
    let booking = sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(booking)
}

async fn find_in_tx(conn: &mut SqliteConnection, id: i64) -> ServiceResult<Option<Booking>> {
    let sql = format!("{BOOKING_SELECT} WHERE id = ?");
    let booking = sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(booking)
}

/// Load a booking as seen by a specific caller
///
/// Customers see their own bookings, owners see bookings of spas they
/// own, admins see everything. Anything else reads as not found.
pub async fn find_visible(
    pool: &SqlitePool,
    id: i64,
    viewer_id: i64,
    role: UserRole,
) -> ServiceResult<Booking> {
    let booking = find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;

    let visible = match role {
        UserRole::Admin => true,
        UserRole::Customer => booking.customer_id == viewer_id,
        UserRole::Owner => {
            let owner_id: Option<i64> = sqlx::query_scalar("SELECT owner_id FROM spas WHERE id = ?")
                .bind(booking.spa_id)
                .fetch_optional(pool)
                .await?;
            owner_id == Some(viewer_id)
        }
    };

    if !visible {
        return Err(AppError::new(ErrorCode::BookingNotFound).into());
    }
    Ok(booking)
}

/// Create a booking and its payment in one transaction
///
/// Validates the spa, service, customer, staff and coupon, computes the
/// price breakdown at the current commission rate and persists the
/// PENDING booking together with its already-settled payment.
pub async fn create_booking(
    pool: &SqlitePool,
    customer_id: i64,
    req: &BookingCreate,
) -> ServiceResult<Booking> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    // 1. Spa must exist and be approved
    let spa = spas::find_spa(&mut *tx, req.spa_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SpaNotFound))?;
    if !spa.is_approved {
        return Err(AppError::new(ErrorCode::SpaNotApproved).into());
    }

    // 2. Service must belong to that spa
    let service = spas::find_service_of_spa(&mut *tx, req.service_id, spa.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ServiceNotFound))?;

    // 3. Customer must exist
    if !users::exists(&mut *tx, customer_id).await? {
        return Err(AppError::new(ErrorCode::CustomerNotFound).into());
    }

    // 4. Resolve staff: an explicit id must be an active member of the
    //    spa; otherwise pick one opportunistically, absence is fine
    let staff_id = match req.staff_id {
        Some(id) => Some(
            spas::find_active_staff_of_spa(&mut *tx, id, spa.id)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::StaffNotFound))?
                .id,
        ),
        None => spas::pick_active_staff(&mut *tx, spa.id).await?.map(|s| s.id),
    };

    // 5. Validate and consume the coupon. The redemption count moves
    //    inside this transaction, so a later failure returns the slot.
    let mut discount_percent = Decimal::ZERO;
    let coupon_code = match req
        .coupon_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
    {
        Some(code) => {
            let coupon = coupons::find_by_code(&mut *tx, code)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::CouponInvalid))?;
            if !coupon.is_active {
                return Err(AppError::new(ErrorCode::CouponInactive).into());
            }
            if coupon.expires_at.is_some_and(|exp| exp <= now) {
                return Err(AppError::new(ErrorCode::CouponExpired).into());
            }
            if !coupons::redeem(&mut *tx, coupon.id).await? {
                return Err(AppError::new(ErrorCode::CouponExhausted).into());
            }
            discount_percent = money::to_decimal(coupon.discount_percent);
            Some(coupon.code)
        }
        None => None,
    };

    // 6. Price breakdown; the commission rate is read once and the same
    //    value feeds both the stored amount and the payment snapshot
    let rate = settings::commission_rate(&mut *tx, settings::DEFAULT_PLATFORM_RATE).await?;
    let total_price = service.price;
    let final_price = money::compute_net(total_price, discount_percent);
    let commission_amount = money::compute_commission(final_price, rate);

    // 7. Persist the booking in PENDING with the coupon code snapshot
    let booking_id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO bookings (id, spa_id, service_id, customer_id, staff_id, scheduled_at, status, coupon_code, total_price, final_price, commission_amount, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
    )
    .bind(booking_id)
    .bind(spa.id)
    .bind(service.id)
    .bind(customer_id)
    .bind(staff_id)
    .bind(req.scheduled_at.timestamp_millis())
    .bind(BookingStatus::Pending)
    .bind(&coupon_code)
    .bind(total_price)
    .bind(final_price)
    .bind(commission_amount)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    // 8. Persist the payment as settled, with an external reference for
    //    non-cash methods
    let transaction_ref = req
        .payment_method
        .needs_transaction_ref()
        .then(|| shared::util::txn_reference(booking_id));
    sqlx::query(
        "INSERT INTO payments (id, booking_id, amount, method, status, commission_percent, commission_amount, transaction_ref, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(shared::util::snowflake_id())
    .bind(booking_id)
    .bind(final_price)
    .bind(req.payment_method)
    .bind(PaymentStatus::Completed)
    .bind(rate.to_f64().unwrap_or_default())
    .bind(commission_amount)
    .bind(&transaction_ref)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    // 9. Return the stored row
    let booking = find_in_tx(&mut *tx, booking_id)
        .await?
        .ok_or_else(|| ServiceError::Db("Failed to create booking".into()))?;

    tx.commit().await?;
    Ok(booking)
}

/// Apply a status transition and its loyalty side effect
///
/// The transition commits first; the completion bonus then runs in its
/// own transaction, so a loyalty failure can never undo the status
/// change. The bonus fires only when the booking enters COMPLETED for
/// the first time.
pub async fn set_status(
    pool: &SqlitePool,
    booking_id: i64,
    new_status: BookingStatus,
) -> ServiceResult<StatusChange> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let booking = find_in_tx(&mut *tx, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;

    if !booking.status.can_transition_to(new_status) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!(
                "Cannot move booking from {} to {}",
                booking.status.as_str(),
                new_status.as_str()
            ),
        )
        .into());
    }

    sqlx::query("UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(new_status)
        .bind(now)
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

    let updated = find_in_tx(&mut *tx, booking_id)
        .await?
        .ok_or_else(|| ServiceError::Db("Failed to update booking status".into()))?;

    tx.commit().await?;

    let bonus = if new_status == BookingStatus::Completed
        && booking.status != BookingStatus::Completed
    {
        let reason = format!("Completion bonus for booking {booking_id}");
        match loyalty::award_points(pool, booking.customer_id, COMPLETION_BONUS_POINTS, &reason)
            .await
        {
            Ok(loyalty) => BonusOutcome::Awarded(loyalty),
            Err(err) => {
                let app = AppError::from(err);
                tracing::warn!(
                    booking_id,
                    customer_id = booking.customer_id,
                    error = %app.message,
                    "Completion bonus failed, booking stays COMPLETED"
                );
                BonusOutcome::Failed(app.message)
            }
        }
    } else {
        BonusOutcome::NotApplicable
    };

    Ok(StatusChange {
        booking: updated,
        bonus,
    })
}

/// Move the appointment time and force the booking back to CONFIRMED
///
/// Allowed from any non-terminal status.
pub async fn reschedule(
    pool: &SqlitePool,
    booking_id: i64,
    scheduled_at: DateTime<Utc>,
) -> ServiceResult<Booking> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let booking = find_in_tx(&mut *tx, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
    if booking.status.is_terminal() {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot reschedule a {} booking", booking.status.as_str()),
        )
        .into());
    }

    sqlx::query("UPDATE bookings SET scheduled_at = ?1, status = ?2, updated_at = ?3 WHERE id = ?4")
        .bind(scheduled_at.timestamp_millis())
        .bind(BookingStatus::Confirmed)
        .bind(now)
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

    let updated = find_in_tx(&mut *tx, booking_id)
        .await?
        .ok_or_else(|| ServiceError::Db("Failed to reschedule booking".into()))?;

    tx.commit().await?;
    Ok(updated)
}

/// Force CANCELLED from any non-terminal status
pub async fn cancel(pool: &SqlitePool, booking_id: i64) -> ServiceResult<Booking> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let booking = find_in_tx(&mut *tx, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
    if booking.status.is_terminal() {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot cancel a {} booking", booking.status.as_str()),
        )
        .into());
    }

    sqlx::query("UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(BookingStatus::Cancelled)
        .bind(now)
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

    let updated = find_in_tx(&mut *tx, booking_id)
        .await?
        .ok_or_else(|| ServiceError::Db("Failed to cancel booking".into()))?;

    tx.commit().await?;
    Ok(updated)
}
