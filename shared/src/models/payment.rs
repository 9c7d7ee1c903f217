//! Payment Model

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentMethod {
    #[default]
    Cash,
    CreditCard,
    Paypal,
}

impl PaymentMethod {
    /// Non-cash payments carry a synthesized transaction reference
    pub fn needs_transaction_ref(&self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentStatus {
    Completed,
    Refunded,
}

/// Payment entity, created atomically with its booking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    /// Equals the booking's final price at creation
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Commission rate snapshot at payment time, percent units
    pub commission_percent: f64,
    pub commission_amount: Money,
    /// Present only for non-cash methods
    pub transaction_ref: Option<String>,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_transaction_ref() {
        assert!(!PaymentMethod::Cash.needs_transaction_ref());
        assert!(PaymentMethod::CreditCard.needs_transaction_ref());
        assert!(PaymentMethod::Paypal.needs_transaction_ref());
    }

    #[test]
    fn test_method_default_is_cash() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            "\"CREDIT_CARD\""
        );
        let method: PaymentMethod = serde_json::from_str("\"PAYPAL\"").unwrap();
        assert_eq!(method, PaymentMethod::Paypal);
    }
}
