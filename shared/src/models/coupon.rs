//! Coupon Model

use serde::{Deserialize, Serialize};

/// Coupon entity
///
/// `current_redemptions` never exceeds `max_redemptions` when a limit is
/// set; the increment commits together with the booking consuming it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Coupon {
    pub id: i64,
    pub code: String,
    /// Null for platform-wide coupons
    pub spa_id: Option<i64>,
    /// Percent units, e.g. 10.0 for 10% off
    pub discount_percent: f64,
    /// Null means unlimited
    pub max_redemptions: Option<i64>,
    pub current_redemptions: i64,
    pub is_active: bool,
    /// Epoch millis; null means no expiry
    pub expires_at: Option<i64>,
    pub created_at: i64,
}

impl Coupon {
    /// Whether the coupon is redeemable at the given instant
    pub fn is_redeemable(&self, now_millis: i64) -> bool {
        self.is_active
            && self.expires_at.is_none_or(|exp| exp > now_millis)
            && self
                .max_redemptions
                .is_none_or(|max| self.current_redemptions < max)
    }
}
