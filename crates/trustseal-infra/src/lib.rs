//! Infrastructure layer for Trustseal.
//!
//! Contains the implementation of the `FileDigester` port defined in
//! `trustseal-core` (streaming RustCrypto digests), the `config.toml` loader,
//! JSON upload manifests, and data directory resolution.

pub mod config;
pub mod crypto;
pub mod filesystem;
pub mod manifest;
