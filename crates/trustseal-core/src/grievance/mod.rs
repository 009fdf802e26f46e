//! Grievance lifecycle: forensic status transitions and the append-only
//! chain-of-custody log that records every change.

pub mod custody;
pub mod lifecycle;
