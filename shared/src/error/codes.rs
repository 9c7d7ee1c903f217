//! Unified error codes for the Lotus platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Catalog errors (spa / service / staff / customer)
//! - 4xxx: Booking errors
//! - 5xxx: Payment and payout errors
//! - 6xxx: Coupon errors
//! - 7xxx: Loyalty errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Catalog ====================
    /// Spa not found
    SpaNotFound = 3001,
    /// Spa exists but has not been approved
    SpaNotApproved = 3002,
    /// Service not found (or not offered by the spa)
    ServiceNotFound = 3101,
    /// Staff member not found (or not active at the spa)
    StaffNotFound = 3201,
    /// Customer not found
    CustomerNotFound = 3301,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Status transition not allowed from the current status
    InvalidStatusTransition = 4002,

    // ==================== 5xxx: Payment / Payout ====================
    /// Payment not found
    PaymentNotFound = 5001,
    /// Payment has already been refunded
    PaymentAlreadyRefunded = 5002,
    /// Payout not found
    PayoutNotFound = 5101,
    /// Requested amount exceeds available profit
    InsufficientProfit = 5102,
    /// Beneficiary has no linked bank account
    BankAccountMissing = 5103,
    /// Payout is not in REQUESTED status
    PayoutNotReviewable = 5104,
    /// Payout is not in APPROVED status
    PayoutNotCompletable = 5105,
    /// Payout amount must be positive
    InvalidPayoutAmount = 5106,

    // ==================== 6xxx: Coupon ====================
    /// Coupon code does not exist
    CouponInvalid = 6001,
    /// Coupon is not active
    CouponInactive = 6002,
    /// Coupon has expired
    CouponExpired = 6003,
    /// Coupon redemption limit reached
    CouponExhausted = 6004,

    // ==================== 7xxx: Loyalty ====================
    /// Points amount must be a positive integer
    InvalidPointsAmount = 7001,
    /// Reason is required for manual point awards
    ReasonRequired = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "Caller is not authenticated",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Catalog
            ErrorCode::SpaNotFound => "Spa not found",
            ErrorCode::SpaNotApproved => "Spa has not been approved",
            ErrorCode::ServiceNotFound => "Service not found",
            ErrorCode::StaffNotFound => "Staff member not found",
            ErrorCode::CustomerNotFound => "Customer not found",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::InvalidStatusTransition => "Status transition not allowed",

            // Payment / Payout
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::PaymentAlreadyRefunded => "Payment has already been refunded",
            ErrorCode::PayoutNotFound => "Payout not found",
            ErrorCode::InsufficientProfit => "Requested amount exceeds available profit",
            ErrorCode::BankAccountMissing => "No linked bank account",
            ErrorCode::PayoutNotReviewable => "Payout is not awaiting review",
            ErrorCode::PayoutNotCompletable => "Payout is not approved for completion",
            ErrorCode::InvalidPayoutAmount => "Payout amount must be positive",

            // Coupon
            ErrorCode::CouponInvalid => "Coupon code is invalid",
            ErrorCode::CouponInactive => "Coupon is not active",
            ErrorCode::CouponExpired => "Coupon has expired",
            ErrorCode::CouponExhausted => "Coupon redemption limit reached",

            // Loyalty
            ErrorCode::InvalidPointsAmount => "Points must be a positive integer",
            ErrorCode::ReasonRequired => "A reason is required",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),

            // Catalog
            3001 => Ok(ErrorCode::SpaNotFound),
            3002 => Ok(ErrorCode::SpaNotApproved),
            3101 => Ok(ErrorCode::ServiceNotFound),
            3201 => Ok(ErrorCode::StaffNotFound),
            3301 => Ok(ErrorCode::CustomerNotFound),

            // Booking
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::InvalidStatusTransition),

            // Payment / Payout
            5001 => Ok(ErrorCode::PaymentNotFound),
            5002 => Ok(ErrorCode::PaymentAlreadyRefunded),
            5101 => Ok(ErrorCode::PayoutNotFound),
            5102 => Ok(ErrorCode::InsufficientProfit),
            5103 => Ok(ErrorCode::BankAccountMissing),
            5104 => Ok(ErrorCode::PayoutNotReviewable),
            5105 => Ok(ErrorCode::PayoutNotCompletable),
            5106 => Ok(ErrorCode::InvalidPayoutAmount),

            // Coupon
            6001 => Ok(ErrorCode::CouponInvalid),
            6002 => Ok(ErrorCode::CouponInactive),
            6003 => Ok(ErrorCode::CouponExpired),
            6004 => Ok(ErrorCode::CouponExhausted),

            // Loyalty
            7001 => Ok(ErrorCode::InvalidPointsAmount),
            7002 => Ok(ErrorCode::ReasonRequired),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
