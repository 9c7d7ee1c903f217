//! Settings Repository
//!
//! Runtime business configuration lives in the `settings` table and is
//! read at call time, never cached across requests.

use crate::error::ServiceResult;
use rust_decimal::Decimal;
use shared::models::COMMISSION_RATE_KEY;
use sqlx::SqliteConnection;

/// Default platform commission rate in percent, used for pricing and
/// administrator profit when `commission_rate` is unset
pub const DEFAULT_PLATFORM_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Default rate in percent used for owner profit computations
pub const DEFAULT_OWNER_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

pub async fn get(conn: &mut SqliteConnection, key: &str) -> ServiceResult<Option<String>> {
    let value = sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(conn)
        .await?;
    Ok(value)
}

/// Current commission rate in percent units
///
/// Falls back to `default` when the setting is absent or unparseable.
pub async fn commission_rate(
    conn: &mut SqliteConnection,
    default: Decimal,
) -> ServiceResult<Decimal> {
    let rate = get(conn, COMMISSION_RATE_KEY)
        .await?
        .and_then(|v| v.trim().parse::<Decimal>().ok())
        .unwrap_or(default);
    Ok(rate)
}

pub async fn set(conn: &mut SqliteConnection, key: &str, value: &str) -> ServiceResult<()> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(conn)
    .await?;
    Ok(())
}
