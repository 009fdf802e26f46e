//! Integrity verification service.
//!
//! Answers "does this file still match a previously recorded fingerprint?"
//! The answer is fail-closed: a file is trusted only when its freshly
//! computed digest provably equals the expected one. A missing file, a read
//! error, a malformed expected value, or a refused algorithm all yield
//! "not verified" and never an error.

use std::path::Path;

use trustseal_types::algorithm::HashAlgorithm;
use trustseal_types::digest::HexDigest;
use trustseal_types::error::IntegrityError;
use trustseal_types::verification::{VerificationOutcome, VerificationReport};

use crate::service::hash::FileDigester;

/// Which algorithms the verifier accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmPolicy {
    /// Accept MD5 and SHA-1. Their use is logged either way.
    pub allow_legacy: bool,
}

impl AlgorithmPolicy {
    /// SHA-256 only.
    pub fn strict() -> Self {
        Self { allow_legacy: false }
    }

    pub fn permits(&self, algorithm: HashAlgorithm) -> bool {
        self.allow_legacy || !algorithm.is_legacy()
    }
}

impl Default for AlgorithmPolicy {
    fn default() -> Self {
        Self { allow_legacy: true }
    }
}

/// Verifies files against expected digests.
///
/// Generic over the digester so tests can run without touching disk.
pub struct IntegrityVerifier<D: FileDigester> {
    digester: D,
    policy: AlgorithmPolicy,
}

impl<D: FileDigester> IntegrityVerifier<D> {
    /// Create a verifier with the default (legacy-permitting) policy.
    pub fn new(digester: D) -> Self {
        Self {
            digester,
            policy: AlgorithmPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AlgorithmPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AlgorithmPolicy {
        self.policy
    }

    /// Compute a file digest, propagating failures.
    ///
    /// Unlike [`verify`](Self::verify), errors reach the caller here.
    pub async fn compute(&self, path: &Path, algorithm: HashAlgorithm) -> Result<HexDigest, IntegrityError> {
        self.digester.digest_file(path, algorithm).await
    }

    /// Returns true only if the file's digest equals `expected`.
    ///
    /// Comparison is case-insensitive. Never fails.
    pub async fn verify(&self, path: &Path, expected: &str, algorithm: HashAlgorithm) -> bool {
        self.inspect(path, expected, algorithm).await.is_verified()
    }

    /// Same decision as [`verify`](Self::verify), with the evidence behind it.
    #[tracing::instrument(
        name = "verify_integrity",
        skip_all,
        fields(path = %path.display(), algorithm = %algorithm)
    )]
    pub async fn inspect(&self, path: &Path, expected: &str, algorithm: HashAlgorithm) -> VerificationReport {
        let mut report = VerificationReport {
            path: path.to_path_buf(),
            algorithm,
            expected: expected.to_string(),
            actual: None,
            outcome: VerificationOutcome::Unreadable,
            reason: None,
        };

        if !self.policy.permits(algorithm) {
            tracing::warn!("legacy algorithm {algorithm} refused by policy");
            report.outcome = VerificationOutcome::AlgorithmRejected;
            report.reason = Some(format!("{algorithm} is not permitted for verification"));
            return report;
        }
        if algorithm.is_legacy() {
            tracing::warn!("verifying with legacy algorithm {algorithm}; result is not collision-resistant");
        }

        let expected_digest = match HexDigest::parse(expected) {
            Ok(digest) if digest.byte_len() == algorithm.digest_len() => digest,
            Ok(digest) => {
                report.outcome = VerificationOutcome::MalformedExpected;
                report.reason = Some(format!(
                    "expected {} hex characters for {algorithm}, got {}",
                    algorithm.hex_len(),
                    digest.as_str().len()
                ));
                return report;
            }
            Err(err) => {
                report.outcome = VerificationOutcome::MalformedExpected;
                report.reason = Some(err.to_string());
                return report;
            }
        };

        match self.digester.digest_file(path, algorithm).await {
            Ok(actual) if actual == expected_digest => {
                report.outcome = VerificationOutcome::Match;
                report.actual = Some(actual);
            }
            Ok(actual) => {
                report.outcome = VerificationOutcome::Mismatch;
                report.reason = Some("digest does not match the recorded fingerprint".to_string());
                report.actual = Some(actual);
            }
            Err(err) => {
                // Inability to prove a match is treated as a failed match.
                tracing::warn!("integrity check could not read file: {err}");
                report.outcome = VerificationOutcome::Unreadable;
                report.reason = Some(err.to_string());
            }
        }

        tracing::info!(outcome = %report.outcome, "integrity check finished");
        report
    }
}
