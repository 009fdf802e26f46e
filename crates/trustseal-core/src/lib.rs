//! Business logic and port definitions for Trustseal.
//!
//! This crate defines the `FileDigester` port that the infrastructure layer
//! implements, plus the services built on it: integrity verification,
//! upload fingerprinting, and audit re-checks. It also holds the grievance
//! lifecycle state machine. It depends only on `trustseal-types` -- never on
//! `trustseal-infra` or any filesystem/crypto crate.

pub mod grievance;
pub mod service;
