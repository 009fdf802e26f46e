//! Upload fingerprinting.
//!
//! Fills in `file_hash` on freshly stored upload records. Hashing failure
//! never fails the upload: the record is kept with no fingerprint and the
//! failure is logged, so a later audit reports it as unhashed.

use futures_util::stream::{self, StreamExt};

use trustseal_types::algorithm::HashAlgorithm;
use trustseal_types::error::IntegrityError;
use trustseal_types::upload::UploadRecord;

use crate::service::hash::FileDigester;
use crate::service::integrity::AlgorithmPolicy;

pub struct UploadService<D: FileDigester> {
    digester: D,
    algorithm: HashAlgorithm,
    concurrency: usize,
}

impl<D: FileDigester> UploadService<D> {
    /// Create a service that fingerprints with `algorithm`.
    ///
    /// Fails with `AlgorithmRejected` when `policy` forbids the algorithm, so
    /// no fingerprint is ever recorded that a later audit would refuse.
    pub fn new(
        digester: D,
        algorithm: HashAlgorithm,
        policy: AlgorithmPolicy,
        concurrency: usize,
    ) -> Result<Self, IntegrityError> {
        if !policy.permits(algorithm) {
            tracing::warn!("legacy algorithm {algorithm} refused for new fingerprints");
            return Err(IntegrityError::AlgorithmRejected { algorithm });
        }
        if algorithm.is_legacy() {
            tracing::warn!("fingerprinting with legacy algorithm {algorithm}; result is not collision-resistant");
        }
        Ok(Self {
            digester,
            algorithm,
            concurrency: concurrency.max(1),
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Compute the record's fingerprint if it has none.
    ///
    /// A record that already carries a hash is returned untouched.
    pub async fn fingerprint(&self, mut record: UploadRecord) -> UploadRecord {
        if record.file_hash.is_some() {
            return record;
        }

        let result = self.digester.digest_file(&record.filepath, self.algorithm).await;
        match result {
            Ok(digest) => {
                tracing::debug!(record_id = record.id, hash = %digest.short(12), "fingerprinted upload");
                record.file_hash = Some(digest.into());
                record.algorithm = self.algorithm;
            }
            Err(err) => {
                tracing::warn!(
                    record_id = record.id,
                    "could not calculate hash for {}: {err}",
                    record.filepath.display()
                );
            }
        }
        record
    }

    /// Fingerprint a batch, preserving order.
    pub async fn fingerprint_all(&self, records: Vec<UploadRecord>) -> Vec<UploadRecord> {
        stream::iter(records)
            .map(|record| self.fingerprint(record))
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{FakeDigester, EVIDENCE_MD5, EVIDENCE_SHA256, OTHER_SHA256};
    use trustseal_types::upload::UploadType;

    fn digester() -> FakeDigester {
        FakeDigester::new()
            .with_file("evidence.txt", HashAlgorithm::Sha256, EVIDENCE_SHA256)
            .with_file("evidence.txt", HashAlgorithm::Md5, EVIDENCE_MD5)
            .with_file("app.apk", HashAlgorithm::Sha256, OTHER_SHA256)
    }

    fn service() -> UploadService<FakeDigester> {
        UploadService::new(digester(), HashAlgorithm::Sha256, AlgorithmPolicy::default(), 2).unwrap()
    }

    #[tokio::test]
    async fn test_fingerprint_fills_hash() {
        let svc = service();
        let record = svc
            .fingerprint(UploadRecord::new(1, "evidence.txt", 21, UploadType::GrievanceAttachment))
            .await;
        assert_eq!(record.file_hash.as_deref(), Some(EVIDENCE_SHA256));
        assert_eq!(record.algorithm, HashAlgorithm::Sha256);
    }

    #[tokio::test]
    async fn test_fingerprint_failure_keeps_record() {
        let svc = service();
        let record = svc
            .fingerprint(UploadRecord::new(2, "missing.bin", 0, UploadType::Other))
            .await;
        assert_eq!(record.id, 2);
        assert!(record.file_hash.is_none());
    }

    #[tokio::test]
    async fn test_fingerprint_keeps_existing_hash() {
        let svc = service();
        let mut record = UploadRecord::new(3, "evidence.txt", 21, UploadType::Other);
        record.file_hash = Some("00ff".to_string());
        let record = svc.fingerprint(record).await;
        assert_eq!(record.file_hash.as_deref(), Some("00ff"));
        assert_eq!(svc.digester.calls(), 0);
    }

    #[tokio::test]
    async fn test_fingerprint_all_preserves_order() {
        let svc = service();
        let records = vec![
            UploadRecord::new(1, "app.apk", 10, UploadType::AppFile),
            UploadRecord::new(2, "missing.bin", 0, UploadType::Other),
            UploadRecord::new(3, "evidence.txt", 21, UploadType::GrievanceAttachment),
        ];
        let out = svc.fingerprint_all(records).await;
        let ids: Vec<_> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(out[0].file_hash.as_deref(), Some(OTHER_SHA256));
        assert!(out[1].file_hash.is_none());
        assert_eq!(out[2].file_hash.as_deref(), Some(EVIDENCE_SHA256));
    }

    #[test]
    fn test_strict_policy_refuses_legacy_fingerprints() {
        for algorithm in [HashAlgorithm::Md5, HashAlgorithm::Sha1] {
            let err = UploadService::new(digester(), algorithm, AlgorithmPolicy::strict(), 2)
                .err()
                .unwrap();
            assert!(matches!(err, IntegrityError::AlgorithmRejected { algorithm: a } if a == algorithm));
        }
        let svc = UploadService::new(digester(), HashAlgorithm::Sha256, AlgorithmPolicy::strict(), 2).unwrap();
        assert_eq!(svc.algorithm(), HashAlgorithm::Sha256);
    }

    #[tokio::test]
    async fn test_legacy_fingerprint_allowed_by_default_policy() {
        let svc = UploadService::new(digester(), HashAlgorithm::Md5, AlgorithmPolicy::default(), 1).unwrap();
        let record = svc
            .fingerprint(UploadRecord::new(4, "evidence.txt", 21, UploadType::GrievanceAttachment))
            .await;
        assert_eq!(record.file_hash.as_deref(), Some(EVIDENCE_MD5));
        assert_eq!(record.algorithm, HashAlgorithm::Md5);
    }
}
