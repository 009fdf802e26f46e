//! Shared domain types for Trustseal.
//!
//! This crate contains the domain types used across the workspace: hash
//! algorithms, hex digests, verification reports, uploaded-file records,
//! grievances and their custody log, plus the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod algorithm;
pub mod config;
pub mod digest;
pub mod error;
pub mod grievance;
pub mod upload;
pub mod verification;
