//! Loyalty Model

use serde::{Deserialize, Serialize};

/// Points awarded when a booking first reaches COMPLETED
pub const COMPLETION_BONUS_POINTS: i64 = 10;

/// Loyalty rank, ordered from lowest to highest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LoyaltyRank {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl LoyaltyRank {
    /// Rank is a pure function of the points balance
    pub fn from_points(points: i64) -> Self {
        match points {
            p if p >= 300 => Self::Platinum,
            p if p >= 200 => Self::Gold,
            p if p >= 100 => Self::Silver,
            _ => Self::Bronze,
        }
    }
}

/// Loyalty balance, one row per customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Loyalty {
    pub customer_id: i64,
    pub points: i64,
    pub rank: LoyaltyRank,
    pub updated_at: i64,
}

/// Append-only loyalty movement record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LoyaltyHistory {
    pub id: i64,
    pub customer_id: i64,
    pub delta: i64,
    pub reason: String,
    pub created_at: i64,
}

/// Rank lookup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankInfo {
    pub rank: LoyaltyRank,
    pub points: i64,
}

/// Administrative point award payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardPoints {
    pub customer_id: i64,
    pub points: i64,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_thresholds() {
        assert_eq!(LoyaltyRank::from_points(0), LoyaltyRank::Bronze);
        assert_eq!(LoyaltyRank::from_points(99), LoyaltyRank::Bronze);
        assert_eq!(LoyaltyRank::from_points(100), LoyaltyRank::Silver);
        assert_eq!(LoyaltyRank::from_points(199), LoyaltyRank::Silver);
        assert_eq!(LoyaltyRank::from_points(200), LoyaltyRank::Gold);
        assert_eq!(LoyaltyRank::from_points(299), LoyaltyRank::Gold);
        assert_eq!(LoyaltyRank::from_points(300), LoyaltyRank::Platinum);
        assert_eq!(LoyaltyRank::from_points(100_000), LoyaltyRank::Platinum);
    }

    #[test]
    fn test_rank_ordering() {
        assert!(LoyaltyRank::Bronze < LoyaltyRank::Silver);
        assert!(LoyaltyRank::Silver < LoyaltyRank::Gold);
        assert!(LoyaltyRank::Gold < LoyaltyRank::Platinum);
    }

    #[test]
    fn test_rank_serialization() {
        assert_eq!(
            serde_json::to_string(&LoyaltyRank::Platinum).unwrap(),
            "\"PLATINUM\""
        );
        let rank: LoyaltyRank = serde_json::from_str("\"BRONZE\"").unwrap();
        assert_eq!(rank, LoyaltyRank::Bronze);
    }
}
