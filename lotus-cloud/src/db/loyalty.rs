//! Loyalty Repository
//!
//! Points only ever go up; every movement appends an immutable history
//! entry in the same transaction as the balance update.

use crate::db::users;
use crate::error::{ServiceError, ServiceResult};
use shared::error::{AppError, ErrorCode};
use shared::models::{Loyalty, LoyaltyHistory, LoyaltyRank, RankInfo};
use sqlx::SqlitePool;

const LOYALTY_SELECT: &str = "SELECT customer_id, points, rank, updated_at FROM loyalty";

/// Award points and recompute the rank in one transaction
///
/// Creates the customer's row at 0/BRONZE when missing, adds the delta,
/// recomputes the rank from the new balance and appends the history
/// entry. `points` must be positive.
pub async fn award_points(
    pool: &SqlitePool,
    customer_id: i64,
    points: i64,
    reason: &str,
) -> ServiceResult<Loyalty> {
    if points <= 0 {
        return Err(AppError::new(ErrorCode::InvalidPointsAmount).into());
    }

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    // 1. Customer must exist
    if !users::exists(&mut *tx, customer_id).await? {
        return Err(AppError::new(ErrorCode::CustomerNotFound).into());
    }

    // 2. Ensure the balance row exists
    sqlx::query(
        "INSERT OR IGNORE INTO loyalty (customer_id, points, rank, updated_at) VALUES (?1, 0, 'BRONZE', ?2)",
    )
    .bind(customer_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    // 3. Add the delta and recompute the rank
    let current: i64 = sqlx::query_scalar("SELECT points FROM loyalty WHERE customer_id = ?")
        .bind(customer_id)
        .fetch_one(&mut *tx)
        .await?;
    let new_points = current + points;
    let rank = LoyaltyRank::from_points(new_points);

    sqlx::query("UPDATE loyalty SET points = ?1, rank = ?2, updated_at = ?3 WHERE customer_id = ?4")
        .bind(new_points)
        .bind(rank)
        .bind(now)
        .bind(customer_id)
        .execute(&mut *tx)
        .await?;

    // 4. Append the movement record
    sqlx::query(
        "INSERT INTO loyalty_history (id, customer_id, delta, reason, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(shared::util::snowflake_id())
    .bind(customer_id)
    .bind(points)
    .bind(reason)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let sql = format!("{LOYALTY_SELECT} WHERE customer_id = ?");
    let loyalty = sqlx::query_as::<_, Loyalty>(&sql)
        .bind(customer_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ServiceError::Db("Failed to update loyalty balance".into()))?;

    tx.commit().await?;
    Ok(loyalty)
}

/// Current rank and balance; customers without a row are BRONZE at 0
pub async fn get_rank(pool: &SqlitePool, customer_id: i64) -> ServiceResult<RankInfo> {
    let sql = format!("{LOYALTY_SELECT} WHERE customer_id = ?");
    let row = sqlx::query_as::<_, Loyalty>(&sql)
        .bind(customer_id)
        .fetch_optional(pool)
        .await?;
    Ok(match row {
        Some(l) => RankInfo {
            rank: l.rank,
            points: l.points,
        },
        None => RankInfo {
            rank: LoyaltyRank::Bronze,
            points: 0,
        },
    })
}

pub async fn find_history(
    pool: &SqlitePool,
    customer_id: i64,
) -> ServiceResult<Vec<LoyaltyHistory>> {
    let rows = sqlx::query_as::<_, LoyaltyHistory>(
        "SELECT id, customer_id, delta, reason, created_at FROM loyalty_history WHERE customer_id = ? ORDER BY created_at, id",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
