//! Spa Catalog Repository
//!
//! Read-only lookups against the catalog tables the booking core
//! validates against. All functions take a connection so they compose
//! with the enclosing transaction.

use crate::error::ServiceResult;
use shared::models::{Service, Spa, Staff};
use sqlx::SqliteConnection;

const SPA_SELECT: &str = "SELECT id, owner_id, name, is_approved, created_at FROM spas";
const STAFF_SELECT: &str = "SELECT id, spa_id, name, is_active, created_at FROM staff";

pub async fn find_spa(conn: &mut SqliteConnection, id: i64) -> ServiceResult<Option<Spa>> {
    let sql = format!("{SPA_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Spa>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

/// Service lookup scoped to its spa; a service id from another spa does
/// not resolve
pub async fn find_service_of_spa(
    conn: &mut SqliteConnection,
    service_id: i64,
    spa_id: i64,
) -> ServiceResult<Option<Service>> {
    let row = sqlx::query_as::<_, Service>(
        "SELECT id, spa_id, name, price, duration_minutes, created_at FROM services WHERE id = ? AND spa_id = ?",
    )
    .bind(service_id)
    .bind(spa_id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// Active staff member lookup scoped to the spa
pub async fn find_active_staff_of_spa(
    conn: &mut SqliteConnection,
    staff_id: i64,
    spa_id: i64,
) -> ServiceResult<Option<Staff>> {
    let sql = format!("{STAFF_SELECT} WHERE id = ? AND spa_id = ? AND is_active = 1");
    let row = sqlx::query_as::<_, Staff>(&sql)
        .bind(staff_id)
        .bind(spa_id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

/// Opportunistic pick when no staff member was requested; absence is fine
pub async fn pick_active_staff(
    conn: &mut SqliteConnection,
    spa_id: i64,
) -> ServiceResult<Option<Staff>> {
    let sql = format!("{STAFF_SELECT} WHERE spa_id = ? AND is_active = 1 ORDER BY id LIMIT 1");
    let row = sqlx::query_as::<_, Staff>(&sql)
        .bind(spa_id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}
