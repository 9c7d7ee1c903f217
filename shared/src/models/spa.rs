//! Spa Catalog Models
//!
//! Read-side entities the booking core validates against. Catalog
//! management itself lives outside this service.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Spa entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Spa {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    /// Only approved spas accept bookings
    pub is_approved: bool,
    pub created_at: i64,
}

/// Service offered by a spa
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Service {
    pub id: i64,
    pub spa_id: i64,
    pub name: String,
    pub price: Money,
    pub duration_minutes: i64,
    pub created_at: i64,
}

/// Staff member of a spa
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Staff {
    pub id: i64,
    pub spa_id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: i64,
}
