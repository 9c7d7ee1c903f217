//! lotus-cloud
//!
//! Financial core of the spa booking marketplace: bookings with their
//! payments, coupon redemption, the loyalty ledger and profit payouts,
//! all backed by SQLite with every multi-step operation running in a
//! single transaction.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod state;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;

/// Embedded schema migrations, shared by the server and the tests
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
