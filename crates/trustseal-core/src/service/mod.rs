//! Business logic services (use cases).
//!
//! Services orchestrate the digest port and integrity rules. They depend on
//! traits (ports) -- never on concrete infrastructure implementations.

pub mod audit;
pub mod hash;
pub mod integrity;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;
