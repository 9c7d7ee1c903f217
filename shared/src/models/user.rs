//! User Model

use serde::{Deserialize, Serialize};

/// Platform role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum UserRole {
    Customer,
    Owner,
    Admin,
}

impl UserRole {
    /// Parse a role from its wire representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CUSTOMER" => Some(Self::Customer),
            "OWNER" => Some(Self::Owner),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Linked bank account, one per user
///
/// A beneficiary counts as linked only when all three descriptive fields
/// are non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BankAccount {
    pub user_id: i64,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
    pub created_at: i64,
}

impl BankAccount {
    /// Whether the account is usable as a payout destination
    pub fn is_linked(&self) -> bool {
        !self.bank_name.trim().is_empty()
            && !self.account_number.trim().is_empty()
            && !self.account_holder.trim().is_empty()
    }
}
