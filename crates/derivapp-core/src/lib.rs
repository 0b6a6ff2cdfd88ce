//! derivapp-core
//!
//! Pure domain types and document-key conventions for the DerivApp
//! referral-tracking backend. No AWS SDK dependency — this is the shared
//! vocabulary of the system.

pub mod error;
pub mod models;
pub mod store_keys;
