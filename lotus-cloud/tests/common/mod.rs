//! Shared fixtures for integration tests
//!
//! Two pool flavors: a single-connection in-memory database for most
//! tests, and a temp-file WAL database for tests that need several
//! connections writing at once.

#![allow(dead_code)]

use shared::error::{AppError, ErrorCode};
use shared::models::{BookingCreate, PaymentMethod, PayoutStatus, UserRole};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use std::time::Duration;

pub const CUSTOMER_ID: i64 = 1;
pub const OWNER_ID: i64 = 2;
pub const ADMIN_ID: i64 = 3;
pub const SPA_ID: i64 = 10;
pub const SERVICE_ID: i64 = 100;
pub const STAFF_ID: i64 = 500;

pub const SERVICE_PRICE: &str = "1000000.00";

/// In-memory database; one connection only, every SQLite in-memory
/// database is private to the connection that opened it
pub async fn memory_pool() -> SqlitePool {
    let options = "sqlite::memory:"
        .parse::<SqliteConnectOptions>()
        .expect("memory options")
        .pragma("foreign_keys", "ON");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("memory pool");
    lotus_cloud::MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

/// Temp-file database in WAL mode, same options as the server
pub async fn file_pool(path: &Path) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .pragma("foreign_keys", "ON")
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("file pool");
    lotus_cloud::MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

/// Business-rule code carried by a service error; panics on Db errors
pub fn app_code(err: lotus_cloud::ServiceError) -> ErrorCode {
    AppError::from(err).code
}

pub async fn insert_user(pool: &SqlitePool, id: i64, role: UserRole) {
    sqlx::query(
        "INSERT INTO users (id, name, email, role, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 0, 0)",
    )
    .bind(id)
    .bind(format!("user-{id}"))
    .bind(format!("user-{id}@example.com"))
    .bind(role)
    .execute(pool)
    .await
    .expect("insert user");
}

pub async fn link_bank_account(pool: &SqlitePool, user_id: i64) {
    sqlx::query(
        "INSERT INTO bank_accounts (user_id, bank_name, account_number, account_holder, created_at) \
         VALUES (?1, 'Test Bank', '000123456789', 'Account Holder', 0)",
    )
    .bind(user_id)
    .execute(pool)
    .await
    .expect("insert bank account");
}

pub async fn insert_spa(pool: &SqlitePool, id: i64, owner_id: i64, approved: bool) {
    sqlx::query(
        "INSERT INTO spas (id, owner_id, name, is_approved, created_at) VALUES (?1, ?2, ?3, ?4, 0)",
    )
    .bind(id)
    .bind(owner_id)
    .bind(format!("spa-{id}"))
    .bind(approved)
    .execute(pool)
    .await
    .expect("insert spa");
}

pub async fn insert_service(pool: &SqlitePool, id: i64, spa_id: i64, price: &str) {
    sqlx::query(
        "INSERT INTO services (id, spa_id, name, price, duration_minutes, created_at) \
         VALUES (?1, ?2, ?3, ?4, 60, 0)",
    )
    .bind(id)
    .bind(spa_id)
    .bind(format!("service-{id}"))
    .bind(price)
    .execute(pool)
    .await
    .expect("insert service");
}

pub async fn insert_staff(pool: &SqlitePool, id: i64, spa_id: i64, active: bool) {
    sqlx::query(
        "INSERT INTO staff (id, spa_id, name, is_active, created_at) VALUES (?1, ?2, ?3, ?4, 0)",
    )
    .bind(id)
    .bind(spa_id)
    .bind(format!("staff-{id}"))
    .bind(active)
    .execute(pool)
    .await
    .expect("insert staff");
}

pub async fn insert_coupon(
    pool: &SqlitePool,
    id: i64,
    code: &str,
    discount_percent: f64,
    max_redemptions: Option<i64>,
    is_active: bool,
    expires_at: Option<i64>,
) {
    sqlx::query(
        "INSERT INTO coupons (id, code, spa_id, discount_percent, max_redemptions, current_redemptions, is_active, expires_at, created_at) \
         VALUES (?1, ?2, NULL, ?3, ?4, 0, ?5, ?6, 0)",
    )
    .bind(id)
    .bind(code)
    .bind(discount_percent)
    .bind(max_redemptions)
    .bind(is_active)
    .bind(expires_at)
    .execute(pool)
    .await
    .expect("insert coupon");
}

pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) {
    let mut conn = pool.acquire().await.expect("acquire");
    lotus_cloud::db::settings::set(&mut conn, key, value)
        .await
        .expect("set setting");
}

pub async fn seed_payout(
    pool: &SqlitePool,
    id: i64,
    beneficiary_id: i64,
    amount: &str,
    status: PayoutStatus,
) {
    sqlx::query(
        "INSERT INTO payouts (id, beneficiary_id, amount, status, requested_at) VALUES (?1, ?2, ?3, ?4, 0)",
    )
    .bind(id)
    .bind(beneficiary_id)
    .bind(amount)
    .bind(status)
    .execute(pool)
    .await
    .expect("seed payout");
}

/// Customer, owner and admin users plus one approved spa with one
/// service and one active staff member
pub async fn seed_marketplace(pool: &SqlitePool) {
    insert_user(pool, CUSTOMER_ID, UserRole::Customer).await;
    insert_user(pool, OWNER_ID, UserRole::Owner).await;
    insert_user(pool, ADMIN_ID, UserRole::Admin).await;
    insert_spa(pool, SPA_ID, OWNER_ID, true).await;
    insert_service(pool, SERVICE_ID, SPA_ID, SERVICE_PRICE).await;
    insert_staff(pool, STAFF_ID, SPA_ID, true).await;
}

/// Cash booking request for the seeded spa, scheduled a day out
pub fn booking_request() -> BookingCreate {
    BookingCreate {
        spa_id: SPA_ID,
        service_id: SERVICE_ID,
        staff_id: None,
        scheduled_at: chrono::Utc::now() + chrono::Duration::days(1),
        coupon_code: None,
        payment_method: PaymentMethod::Cash,
    }
}
