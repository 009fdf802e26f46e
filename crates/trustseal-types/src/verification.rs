//! Verification outcomes.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::algorithm::HashAlgorithm;
use crate::digest::HexDigest;

/// Why a verification ended the way it did.
///
/// Only `Match` counts as verified. Every other variant is a failed
/// verification, whether the file was proven different or simply could not
/// be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Computed digest equals the expected digest.
    Match,
    /// Computed digest differs from the expected digest.
    Mismatch,
    /// Expected digest is not hex, or has the wrong length for the algorithm.
    MalformedExpected,
    /// Algorithm refused by the active policy.
    AlgorithmRejected,
    /// The file could not be read (missing, denied, I/O failure).
    Unreadable,
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Match)
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationOutcome::Match => write!(f, "match"),
            VerificationOutcome::Mismatch => write!(f, "mismatch"),
            VerificationOutcome::MalformedExpected => write!(f, "malformed_expected"),
            VerificationOutcome::AlgorithmRejected => write!(f, "algorithm_rejected"),
            VerificationOutcome::Unreadable => write!(f, "unreadable"),
        }
    }
}

/// Full record of one integrity check.
///
/// `actual` is present whenever the file was hashed, including on mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub path: PathBuf,
    pub algorithm: HashAlgorithm,
    /// The expected digest exactly as supplied by the caller.
    pub expected: String,
    pub actual: Option<HexDigest>,
    pub outcome: VerificationOutcome,
    /// Human-readable cause for non-matching outcomes.
    pub reason: Option<String>,
}

impl VerificationReport {
    pub fn is_verified(&self) -> bool {
        self.outcome.is_verified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_match_is_verified() {
        assert!(VerificationOutcome::Match.is_verified());
        assert!(!VerificationOutcome::Mismatch.is_verified());
        assert!(!VerificationOutcome::MalformedExpected.is_verified());
        assert!(!VerificationOutcome::AlgorithmRejected.is_verified());
        assert!(!VerificationOutcome::Unreadable.is_verified());
    }

    #[test]
    fn test_report_serializes_outcome_snake_case() {
        let report = VerificationReport {
            path: PathBuf::from("evidence.pdf"),
            algorithm: HashAlgorithm::Sha256,
            expected: "ABCD".to_string(),
            actual: None,
            outcome: VerificationOutcome::MalformedExpected,
            reason: Some("expected 64 hex characters, got 4".to_string()),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "malformed_expected");
        assert_eq!(json["algorithm"], "sha256");
        assert!(json["actual"].is_null());
    }
}
