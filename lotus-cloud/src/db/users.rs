//! User Repository
//!
//! Read-side lookups for the users and bank_accounts tables. User CRUD
//! itself belongs to the upstream identity service.

use crate::error::ServiceResult;
use shared::models::{BankAccount, User};
use sqlx::SqliteConnection;

const USER_SELECT: &str = "SELECT id, name, email, role, created_at, updated_at FROM users";

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> ServiceResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> ServiceResult<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(found != 0)
}

/// Write to the user row so the enclosing transaction takes the database
/// write lock before reading aggregates. Returns false when the user does
/// not exist.
pub async fn touch(conn: &mut SqliteConnection, id: i64, now: i64) -> ServiceResult<bool> {
    let rows = sqlx::query("UPDATE users SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn find_bank_account(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> ServiceResult<Option<BankAccount>> {
    let row = sqlx::query_as::<_, BankAccount>(
        "SELECT user_id, bank_name, account_number, account_holder, created_at FROM bank_accounts WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}
