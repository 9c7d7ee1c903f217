//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category derived from the numeric code range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0-999)
    General,
    /// Authentication errors (1000-1999)
    Auth,
    /// Permission errors (2000-2999)
    Permission,
    /// Catalog errors (3000-3999)
    Catalog,
    /// Booking errors (4000-4999)
    Booking,
    /// Payment and payout errors (5000-5999)
    Payment,
    /// Coupon errors (6000-6999)
    Coupon,
    /// Loyalty errors (7000-7999)
    Loyalty,
    /// System errors (9000+)
    System,
}

impl ErrorCategory {
    /// Classify a numeric error code into its category
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Catalog,
            4000..5000 => Self::Booking,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Coupon,
            7000..8000 => Self::Loyalty,
            _ => Self::System,
        }
    }

    /// Get the category name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Catalog => "catalog",
            Self::Booking => "booking",
            Self::Payment => "payment",
            Self::Coupon => "coupon",
            Self::Loyalty => "loyalty",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category of this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
