//! Booking Model

use crate::models::loyalty::Loyalty;
use crate::models::payment::PaymentMethod;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Whether a normal status update may move from `self` to `next`
    ///
    /// PENDING may confirm or cancel; CONFIRMED may complete or cancel.
    /// COMPLETED and CANCELLED are terminal. Reschedule and cancel use
    /// forced transitions and do not go through this check.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }

    /// Terminal statuses accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Wire-format name
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub spa_id: i64,
    pub service_id: i64,
    pub customer_id: i64,
    pub staff_id: Option<i64>,
    pub scheduled_at: i64,
    pub status: BookingStatus,
    /// Denormalized coupon code snapshot; later coupon edits never
    /// alter historical bookings
    pub coupon_code: Option<String>,
    /// Service price before discount
    pub total_price: Money,
    /// Price after coupon discount
    pub final_price: Money,
    /// Platform commission on the final price
    pub commission_amount: Money,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub spa_id: i64,
    pub service_id: i64,
    pub staff_id: Option<i64>,
    pub scheduled_at: DateTime<Utc>,
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

/// Reschedule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingReschedule {
    pub scheduled_at: DateTime<Utc>,
}

/// Outcome of the completion bonus attempt attached to a status change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BonusOutcome {
    /// The transition did not enter COMPLETED for the first time
    NotApplicable,
    /// Points were awarded; carries the updated loyalty row
    Awarded(Loyalty),
    /// The award failed; the status change still committed
    Failed(String),
}

/// Result of a status change, including the loyalty side effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub booking: Booking,
    pub bonus: BonusOutcome,
}
