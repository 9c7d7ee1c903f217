//! Payout Model

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Payout status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PayoutStatus {
    Requested,
    Approved,
    Completed,
    Rejected,
}

/// Payout entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payout {
    pub id: i64,
    /// Owner or administrator receiving the payout
    pub beneficiary_id: i64,
    pub amount: Money,
    pub status: PayoutStatus,
    pub requested_at: i64,
    pub approved_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub notes: Option<String>,
}

/// Payout request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub amount: Money,
    pub notes: Option<String>,
}

/// Payout review payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutReview {
    pub payout_id: i64,
    pub approved: bool,
    pub notes: Option<String>,
}

/// Payout completion payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutComplete {
    pub payout_id: i64,
    pub notes: Option<String>,
}

/// Available-profit lookup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableProfit {
    pub available_profit: Money,
}
