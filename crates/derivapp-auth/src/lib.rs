//! derivapp-auth
//!
//! Cognito token verification, user-profile lookup, and the
//! role/permission model gating the REST surface.

pub mod client;
pub mod error;
pub mod jwt;
pub mod permissions;
pub mod profile;
