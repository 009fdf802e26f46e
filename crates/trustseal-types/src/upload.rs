//! Uploaded-file records and audit results.
//!
//! An `UploadRecord` is what the upload pipeline persists for every stored
//! file. Its `file_hash` is written once at upload time and re-checked at
//! audit time.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::HashAlgorithm;
use crate::verification::VerificationReport;

/// Category of an uploaded file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadType {
    GrievanceAttachment,
    IdentityDocument,
    AppFile,
    VoiceAudio,
    #[default]
    Other,
}

impl fmt::Display for UploadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadType::GrievanceAttachment => write!(f, "grievance_attachment"),
            UploadType::IdentityDocument => write!(f, "identity_document"),
            UploadType::AppFile => write!(f, "app_file"),
            UploadType::VoiceAudio => write!(f, "voice_audio"),
            UploadType::Other => write!(f, "other"),
        }
    }
}

impl FromStr for UploadType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grievance_attachment" => Ok(UploadType::GrievanceAttachment),
            "identity_document" => Ok(UploadType::IdentityDocument),
            "app_file" => Ok(UploadType::AppFile),
            "voice_audio" => Ok(UploadType::VoiceAudio),
            "other" => Ok(UploadType::Other),
            other => Err(format!("invalid upload type: '{other}'")),
        }
    }
}

/// A stored file and its recorded fingerprint.
///
/// Serialized in camelCase so `fileHash` lines up with the persisted column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub id: i64,
    /// Original filename supplied by the uploader.
    pub filename: String,
    /// Where the stored copy lives on disk.
    pub filepath: PathBuf,
    #[serde(default)]
    pub mimetype: Option<String>,
    pub size: u64,
    /// Hex digest recorded at upload time; `None` if hashing failed.
    #[serde(default)]
    pub file_hash: Option<String>,
    /// Algorithm that produced `file_hash`.
    #[serde(default)]
    pub algorithm: HashAlgorithm,
    #[serde(default)]
    pub upload_type: UploadType,
    /// Related entity, e.g. "Grievance" / 42.
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub entity_id: Option<i64>,
    #[serde(default)]
    pub uploaded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl UploadRecord {
    /// Create a record for a freshly stored file with no fingerprint yet.
    pub fn new(id: i64, filepath: impl Into<PathBuf>, size: u64, upload_type: UploadType) -> Self {
        let filepath = filepath.into();
        let filename = filepath
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            id,
            filename,
            filepath,
            mimetype: None,
            size,
            file_hash: None,
            algorithm: HashAlgorithm::default(),
            upload_type,
            entity_type: None,
            entity_id: None,
            uploaded_by: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the record to a related entity.
    pub fn with_entity(mut self, entity_type: impl Into<String>, entity_id: i64) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id);
        self
    }
}

/// Audit-time classification of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// File still matches its recorded fingerprint.
    Verified,
    /// File content (or the recorded fingerprint) no longer agrees.
    Tampered,
    /// Record carries no fingerprint to check against.
    Unhashed,
    /// File could not be read at audit time.
    Unreadable,
    /// Recorded algorithm is refused by the active policy.
    PolicyRejected,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditStatus::Verified => write!(f, "verified"),
            AuditStatus::Tampered => write!(f, "tampered"),
            AuditStatus::Unhashed => write!(f, "unhashed"),
            AuditStatus::Unreadable => write!(f, "unreadable"),
            AuditStatus::PolicyRejected => write!(f, "policy_rejected"),
        }
    }
}

/// Result of re-checking one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub record_id: i64,
    pub filepath: PathBuf,
    pub status: AuditStatus,
    /// Absent for `Unhashed` records.
    pub report: Option<VerificationReport>,
}

/// Result of re-checking a batch of records, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub entries: Vec<AuditEntry>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AuditReport {
    pub fn count(&self, status: AuditStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    pub fn verified(&self) -> usize {
        self.count(AuditStatus::Verified)
    }

    /// Entries that were checked and did not verify.
    pub fn failed(&self) -> usize {
        self.count(AuditStatus::Tampered)
            + self.count(AuditStatus::Unreadable)
            + self.count(AuditStatus::PolicyRejected)
    }

    pub fn unhashed(&self) -> usize {
        self.count(AuditStatus::Unhashed)
    }

    /// True when at least one record was checked and every record verified.
    ///
    /// An empty batch proves nothing and is not verified.
    pub fn all_verified(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|e| e.status == AuditStatus::Verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_type_display_fromstr() {
        let types = [
            UploadType::GrievanceAttachment,
            UploadType::IdentityDocument,
            UploadType::AppFile,
            UploadType::VoiceAudio,
            UploadType::Other,
        ];
        for t in types {
            assert_eq!(t.to_string().parse::<UploadType>().unwrap(), t);
        }
        assert!("selfie".parse::<UploadType>().is_err());
    }

    #[test]
    fn test_record_new_takes_filename_from_path() {
        let record = UploadRecord::new(7, "/srv/uploads/a1b2-report.pdf", 1024, UploadType::GrievanceAttachment)
            .with_entity("Grievance", 42);
        assert_eq!(record.filename, "a1b2-report.pdf");
        assert_eq!(record.entity_type.as_deref(), Some("Grievance"));
        assert_eq!(record.entity_id, Some(42));
        assert!(record.file_hash.is_none());
        assert_eq!(record.algorithm, HashAlgorithm::Sha256);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let mut record = UploadRecord::new(1, "app.apk", 10, UploadType::AppFile);
        record.file_hash = Some("abcd".to_string());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fileHash"], "abcd");
        assert_eq!(json["uploadType"], "app_file");
        assert!(json.get("file_hash").is_none());
    }

    #[test]
    fn test_record_deserializes_with_defaults() {
        let json = r#"{
            "id": 3,
            "filename": "scan.jpg",
            "filepath": "/tmp/scan.jpg",
            "size": 2048,
            "createdAt": "2025-11-23T12:00:00Z"
        }"#;
        let record: UploadRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.upload_type, UploadType::Other);
        assert_eq!(record.algorithm, HashAlgorithm::Sha256);
        assert!(record.file_hash.is_none());
    }

    fn entry(id: i64, status: AuditStatus) -> AuditEntry {
        AuditEntry {
            record_id: id,
            filepath: PathBuf::from(format!("{id}.bin")),
            status,
            report: None,
        }
    }

    #[test]
    fn test_audit_report_counts() {
        let now = Utc::now();
        let report = AuditReport {
            entries: vec![
                entry(1, AuditStatus::Verified),
                entry(2, AuditStatus::Tampered),
                entry(3, AuditStatus::Unreadable),
                entry(4, AuditStatus::Unhashed),
                entry(5, AuditStatus::Verified),
                entry(6, AuditStatus::PolicyRejected),
            ],
            started_at: now,
            finished_at: now,
        };
        assert_eq!(report.verified(), 2);
        assert_eq!(report.failed(), 3);
        assert_eq!(report.unhashed(), 1);
        assert!(!report.all_verified());
    }

    #[test]
    fn test_empty_audit_is_not_verified() {
        let now = Utc::now();
        let report = AuditReport {
            entries: Vec::new(),
            started_at: now,
            finished_at: now,
        };
        assert!(!report.all_verified());
        assert_eq!(report.failed(), 0);

        let single = AuditReport {
            entries: vec![entry(1, AuditStatus::Verified)],
            started_at: now,
            finished_at: now,
        };
        assert!(single.all_verified());
    }
}
