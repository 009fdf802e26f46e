//! Cryptographic adapters.
//!
//! - `digest`: chunked SHA-256 / MD5 / SHA-1 file hashing

pub mod digest;
