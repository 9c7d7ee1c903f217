//! Unified error handling for the Lotus platform
//!
//! Error codes are u16 values organized into category bands:
//! - 0xxx: General
//! - 1xxx: Authentication
//! - 2xxx: Permission
//! - 3xxx: Catalog (spa / service / staff / customer)
//! - 4xxx: Booking
//! - 5xxx: Payment / payout
//! - 6xxx: Coupon
//! - 7xxx: Loyalty
//! - 9xxx: System
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::BookingNotFound);
//! assert_eq!(err.code.code(), 4001);
//! assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
