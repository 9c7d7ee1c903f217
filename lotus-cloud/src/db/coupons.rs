//! Coupon Repository
//!
//! Redemption counting is enforced by a guarded UPDATE: the WHERE clause
//! re-checks the limit so two transactions racing for the last slot can
//! never both increment past it.

use crate::error::ServiceResult;
use shared::models::Coupon;
use sqlx::SqliteConnection;

const COUPON_SELECT: &str = "SELECT id, code, spa_id, discount_percent, max_redemptions, current_redemptions, is_active, expires_at, created_at FROM coupons";

pub async fn find_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> ServiceResult<Option<Coupon>> {
    let sql = format!("{COUPON_SELECT} WHERE code = ?");
    let row = sqlx::query_as::<_, Coupon>(&sql)
        .bind(code)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

/// Atomically consume one redemption slot
///
/// Returns false when the limit is already reached; the caller treats
/// that as an exhausted coupon regardless of what it read beforehand.
pub async fn redeem(conn: &mut SqliteConnection, coupon_id: i64) -> ServiceResult<bool> {
    let rows = sqlx::query(
        "UPDATE coupons SET current_redemptions = current_redemptions + 1 WHERE id = ? AND (max_redemptions IS NULL OR current_redemptions < max_redemptions)",
    )
    .bind(coupon_id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}
