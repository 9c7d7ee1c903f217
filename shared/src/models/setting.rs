//! Setting Model

use serde::{Deserialize, Serialize};

/// Runtime-mutable system configuration entry
///
/// The booking core reads `commission_rate` (percent units) at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// Setting key for the platform commission rate
pub const COMMISSION_RATE_KEY: &str = "commission_rate";
