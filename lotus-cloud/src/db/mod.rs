//! Repository layer
//!
//! Plain async functions over the SQLite pool. Multi-step business
//! operations (booking creation, status changes, payout requests) open a
//! single transaction and either commit everything or nothing; lookup
//! helpers run against whatever executor the caller holds.

pub mod bookings;
pub mod coupons;
pub mod loyalty;
pub mod payments;
pub mod payouts;
pub mod settings;
pub mod spas;
pub mod users;
