//! derivapp-storage
//!
//! The document store: JSON objects in S3, one document per entity.
//! Thin wrapper around the AWS S3 SDK.

pub mod client;
pub mod docs;
pub mod error;
pub mod objects;
