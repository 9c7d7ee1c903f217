//! Payment Repository
//!
//! Payments are written once at booking creation; the only later
//! mutation is the refund flip, and it only happens once.

use crate::error::{ServiceError, ServiceResult};
use shared::error::{AppError, ErrorCode};
use shared::models::{Payment, PaymentStatus};
use sqlx::{SqliteConnection, SqlitePool};

const PAYMENT_SELECT: &str = "SELECT id, booking_id, amount, method, status, commission_percent, commission_amount, transaction_ref, created_at FROM payments";

pub async fn find_by_booking(pool: &SqlitePool, booking_id: i64) -> ServiceResult<Option<Payment>> {
    let sql = format!("{PAYMENT_SELECT} WHERE booking_id = ?");
    let payment = sqlx::query_as::<_, Payment>(&sql)
        .bind(booking_id)
        .fetch_optional(pool)
        .await?;
    Ok(payment)
}

async fn find_in_tx(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> ServiceResult<Option<Payment>> {
    let sql = format!("{PAYMENT_SELECT} WHERE booking_id = ?");
    let payment = sqlx::query_as::<_, Payment>(&sql)
        .bind(booking_id)
        .fetch_optional(conn)
        .await?;
    Ok(payment)
}

/// Refund the payment of a booking
///
/// Only a COMPLETED payment can move to REFUNDED; the update is guarded
/// on the current status so a concurrent refund cannot flip it twice.
pub async fn refund(pool: &SqlitePool, booking_id: i64) -> ServiceResult<Payment> {
    let mut tx = pool.begin().await?;

    let payment = find_in_tx(&mut *tx, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))?;
    if payment.status == PaymentStatus::Refunded {
        return Err(AppError::new(ErrorCode::PaymentAlreadyRefunded).into());
    }

    let result =
        sqlx::query("UPDATE payments SET status = ?1 WHERE booking_id = ?2 AND status = ?3")
            .bind(PaymentStatus::Refunded)
            .bind(booking_id)
            .bind(PaymentStatus::Completed)
            .execute(&mut *tx)
            .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::PaymentAlreadyRefunded).into());
    }

    let refunded = find_in_tx(&mut *tx, booking_id)
        .await?
        .ok_or_else(|| ServiceError::Db("Failed to refund payment".into()))?;

    tx.commit().await?;
    Ok(refunded)
}
