//! Payout Repository and profit ledger
//!
//! Available profit is derived on demand: completed booking revenue at
//! the current commission rate, minus completed payouts, clamped at
//! zero. Sums fold over [`Money`] values in Rust; SQL never aggregates
//! monetary text columns.

use crate::db::{settings, users};
use crate::error::{ServiceError, ServiceResult};
use shared::error::{AppError, ErrorCode};
use shared::models::{BookingStatus, Payout, PayoutStatus, User, UserRole};
use shared::money::{self, Money};
use sqlx::{SqliteConnection, SqlitePool};

const PAYOUT_SELECT: &str = "SELECT id, beneficiary_id, amount, status, requested_at, approved_at, completed_at, notes FROM payouts";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> ServiceResult<Option<Payout>> {
    let sql = format!("{PAYOUT_SELECT} WHERE id = ?");
    let payout = sqlx::query_as::<_, Payout>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(payout)
}

async fn find_in_tx(conn: &mut SqliteConnection, id: i64) -> ServiceResult<Option<Payout>> {
    let sql = format!("{PAYOUT_SELECT} WHERE id = ?");
    let payout = sqlx::query_as::<_, Payout>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(payout)
}

/// Withdrawable amount for a beneficiary at the current rates
pub async fn available_profit(pool: &SqlitePool, beneficiary_id: i64) -> ServiceResult<Money> {
    let mut conn = pool.acquire().await?;
    let user = users::find_by_id(&mut conn, beneficiary_id)
        .await?
        .ok_or_else(|| AppError::not_found("beneficiary"))?;
    compute_available(&mut conn, &user).await
}

/// Availability formula by role
///
/// Owners keep the net share of their spas' completed revenue after the
/// owner commission rate; the administrator keeps the platform
/// commission share of all completed revenue. Customers withdraw
/// nothing. Both rates are read at call time.
async fn compute_available(conn: &mut SqliteConnection, user: &User) -> ServiceResult<Money> {
    match user.role {
        UserRole::Owner => {
            let rate = settings::commission_rate(conn, settings::DEFAULT_OWNER_RATE).await?;
            let gross = completed_revenue_of_owner(conn, user.id).await?;
            let earned = money::compute_net(gross, rate);
            let paid = completed_payouts_of(conn, user.id).await?;
            Ok((earned - paid).max_zero())
        }
        UserRole::Admin => {
            let rate = settings::commission_rate(conn, settings::DEFAULT_PLATFORM_RATE).await?;
            let gross = completed_revenue_all(conn).await?;
            let earned = money::compute_commission(gross, rate);
            let paid = completed_admin_payouts(conn).await?;
            Ok((earned - paid).max_zero())
        }
        UserRole::Customer => Ok(Money::ZERO),
    }
}

/// Completed revenue across the spas one owner owns
///
/// Each booking counts its final price, falling back to the total price
/// for rows without one.
async fn completed_revenue_of_owner(
    conn: &mut SqliteConnection,
    owner_id: i64,
) -> ServiceResult<Money> {
    let amounts: Vec<Money> = sqlx::query_scalar(
        "SELECT COALESCE(final_price, total_price) FROM bookings \
         WHERE status = ?1 AND spa_id IN (SELECT id FROM spas WHERE owner_id = ?2)",
    )
    .bind(BookingStatus::Completed)
    .bind(owner_id)
    .fetch_all(conn)
    .await?;
    Ok(amounts.into_iter().sum())
}

/// Completed revenue across every spa on the platform
async fn completed_revenue_all(conn: &mut SqliteConnection) -> ServiceResult<Money> {
    let amounts: Vec<Money> = sqlx::query_scalar(
        "SELECT COALESCE(final_price, total_price) FROM bookings WHERE status = ?",
    )
    .bind(BookingStatus::Completed)
    .fetch_all(conn)
    .await?;
    Ok(amounts.into_iter().sum())
}

/// Completed payouts already taken by one beneficiary
async fn completed_payouts_of(
    conn: &mut SqliteConnection,
    beneficiary_id: i64,
) -> ServiceResult<Money> {
    let amounts: Vec<Money> = sqlx::query_scalar(
        "SELECT amount FROM payouts WHERE beneficiary_id = ?1 AND status = ?2",
    )
    .bind(beneficiary_id)
    .bind(PayoutStatus::Completed)
    .fetch_all(conn)
    .await?;
    Ok(amounts.into_iter().sum())
}

/// Completed payouts already taken by any administrator
async fn completed_admin_payouts(conn: &mut SqliteConnection) -> ServiceResult<Money> {
    let amounts: Vec<Money> = sqlx::query_scalar(
        "SELECT p.amount FROM payouts p \
         JOIN users u ON u.id = p.beneficiary_id \
         WHERE u.role = ?1 AND p.status = ?2",
    )
    .bind(UserRole::Admin)
    .bind(PayoutStatus::Completed)
    .fetch_all(conn)
    .await?;
    Ok(amounts.into_iter().sum())
}

/// Request a payout; validation and insert run in one transaction
///
/// The first statement writes the beneficiary's user row, taking the
/// database write lock. Concurrent requests from the same beneficiary
/// therefore serialize, and the second one reads an availability figure
/// that already includes the first one's payout.
pub async fn request_payout(
    pool: &SqlitePool,
    beneficiary_id: i64,
    amount: Money,
    notes: Option<&str>,
) -> ServiceResult<Payout> {
    if !amount.is_positive() {
        return Err(AppError::new(ErrorCode::InvalidPayoutAmount).into());
    }

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    // 1. Touch the beneficiary row: existence check plus write lock
    if !users::touch(&mut *tx, beneficiary_id, now).await? {
        return Err(AppError::not_found("beneficiary").into());
    }
    let user = users::find_by_id(&mut *tx, beneficiary_id)
        .await?
        .ok_or_else(|| AppError::not_found("beneficiary"))?;

    // 2. A fully linked bank account is required
    let linked = users::find_bank_account(&mut *tx, beneficiary_id)
        .await?
        .is_some_and(|account| account.is_linked());
    if !linked {
        return Err(AppError::new(ErrorCode::BankAccountMissing).into());
    }

    // 3. The amount must fit inside current availability
    let available = compute_available(&mut *tx, &user).await?;
    if amount > available {
        return Err(AppError::new(ErrorCode::InsufficientProfit)
            .with_detail("available_profit", available.to_string())
            .into());
    }

    // 4. Auto-processed: requested, approved and completed in one step
    let payout_id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO payouts (id, beneficiary_id, amount, status, requested_at, approved_at, completed_at, notes) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?5, ?5, ?6)",
    )
    .bind(payout_id)
    .bind(beneficiary_id)
    .bind(amount)
    .bind(PayoutStatus::Completed)
    .bind(now)
    .bind(notes)
    .execute(&mut *tx)
    .await?;

    let payout = find_in_tx(&mut *tx, payout_id)
        .await?
        .ok_or_else(|| ServiceError::Db("Failed to create payout".into()))?;

    tx.commit().await?;
    Ok(payout)
}

/// Review a REQUESTED payout: approve or reject
///
/// Manual path for payouts that did not auto-complete. Notes replace
/// the stored ones only when provided.
pub async fn review_payout(
    pool: &SqlitePool,
    payout_id: i64,
    approved: bool,
    notes: Option<&str>,
) -> ServiceResult<Payout> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let payout = find_in_tx(&mut *tx, payout_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PayoutNotFound))?;
    if payout.status != PayoutStatus::Requested {
        return Err(AppError::new(ErrorCode::PayoutNotReviewable).into());
    }

    if approved {
        sqlx::query(
            "UPDATE payouts SET status = ?1, approved_at = ?2, notes = COALESCE(?3, notes) WHERE id = ?4",
        )
        .bind(PayoutStatus::Approved)
        .bind(now)
        .bind(notes)
        .bind(payout_id)
        .execute(&mut *tx)
        .await?;
    } else {
        sqlx::query("UPDATE payouts SET status = ?1, notes = COALESCE(?2, notes) WHERE id = ?3")
            .bind(PayoutStatus::Rejected)
            .bind(notes)
            .bind(payout_id)
            .execute(&mut *tx)
            .await?;
    }

    let reviewed = find_in_tx(&mut *tx, payout_id)
        .await?
        .ok_or_else(|| ServiceError::Db("Failed to review payout".into()))?;

    tx.commit().await?;
    Ok(reviewed)
}

/// Complete an APPROVED payout
pub async fn complete_payout(
    pool: &SqlitePool,
    payout_id: i64,
    notes: Option<&str>,
) -> ServiceResult<Payout> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let payout = find_in_tx(&mut *tx, payout_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PayoutNotFound))?;
    if payout.status != PayoutStatus::Approved {
        return Err(AppError::new(ErrorCode::PayoutNotCompletable).into());
    }

    sqlx::query(
        "UPDATE payouts SET status = ?1, completed_at = ?2, notes = COALESCE(?3, notes) WHERE id = ?4",
    )
    .bind(PayoutStatus::Completed)
    .bind(now)
    .bind(notes)
    .bind(payout_id)
    .execute(&mut *tx)
    .await?;

    let completed = find_in_tx(&mut *tx, payout_id)
        .await?
        .ok_or_else(|| ServiceError::Db("Failed to complete payout".into()))?;

    tx.commit().await?;
    Ok(completed)
}
