//! Audit-time re-verification of stored uploads.
//!
//! Each record's `file_hash` was written when the file was uploaded. The
//! auditor recomputes every digest and classifies the record. Records are
//! hashed concurrently up to a fixed limit; each check owns its own stream,
//! so no coordination is needed beyond the limit.

use chrono::Utc;
use futures_util::stream::{self, StreamExt};

use trustseal_types::upload::{AuditEntry, AuditReport, AuditStatus, UploadRecord};
use trustseal_types::verification::VerificationOutcome;

use crate::service::hash::FileDigester;
use crate::service::integrity::IntegrityVerifier;

/// Re-checks batches of upload records against their recorded fingerprints.
pub struct IntegrityAuditor<D: FileDigester> {
    verifier: IntegrityVerifier<D>,
    concurrency: usize,
}

impl<D: FileDigester> IntegrityAuditor<D> {
    /// Create an auditor. A `concurrency` of zero is treated as one.
    pub fn new(verifier: IntegrityVerifier<D>, concurrency: usize) -> Self {
        Self {
            verifier,
            concurrency: concurrency.max(1),
        }
    }

    pub fn verifier(&self) -> &IntegrityVerifier<D> {
        &self.verifier
    }

    /// Re-verify every record. Entries come back in input order.
    pub async fn audit(&self, records: &[UploadRecord]) -> AuditReport {
        let started_at = Utc::now();
        tracing::info!(records = records.len(), concurrency = self.concurrency, "starting integrity audit");

        let entries: Vec<AuditEntry> = stream::iter(records)
            .map(|record| self.check(record))
            .buffered(self.concurrency)
            .collect()
            .await;

        let report = AuditReport {
            entries,
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!(
            verified = report.verified(),
            failed = report.failed(),
            unhashed = report.unhashed(),
            "integrity audit finished"
        );
        report
    }

    /// Re-verify a single record.
    pub async fn check(&self, record: &UploadRecord) -> AuditEntry {
        let Some(expected) = record.file_hash.as_deref() else {
            tracing::debug!(record_id = record.id, "record has no fingerprint");
            return AuditEntry {
                record_id: record.id,
                filepath: record.filepath.clone(),
                status: AuditStatus::Unhashed,
                report: None,
            };
        };

        let report = self
            .verifier
            .inspect(&record.filepath, expected, record.algorithm)
            .await;

        let status = match report.outcome {
            VerificationOutcome::Match => AuditStatus::Verified,
            VerificationOutcome::Unreadable => AuditStatus::Unreadable,
            VerificationOutcome::AlgorithmRejected => AuditStatus::PolicyRejected,
            VerificationOutcome::Mismatch | VerificationOutcome::MalformedExpected => AuditStatus::Tampered,
        };
        if status == AuditStatus::Tampered {
            tracing::warn!(record_id = record.id, path = %record.filepath.display(), "stored file failed integrity check");
        }

        AuditEntry {
            record_id: record.id,
            filepath: record.filepath.clone(),
            status,
            report: Some(report),
        }
    }
}
