//! Shared types for the Lotus booking platform
//!
//! Common types used across the platform: domain models, money
//! arithmetic, error types, response structures, and id/time utilities.

pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use money::Money;
