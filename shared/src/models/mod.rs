//! Data models
//!
//! Shared between lotus-cloud and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod booking;
pub mod coupon;
pub mod loyalty;
pub mod payment;
pub mod payout;
pub mod setting;
pub mod spa;
pub mod user;

// Re-exports
pub use booking::*;
pub use coupon::*;
pub use loyalty::*;
pub use payment::*;
pub use payout::*;
pub use setting::*;
pub use spa::*;
pub use user::*;
