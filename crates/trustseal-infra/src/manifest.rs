//! JSON manifests of upload records.
//!
//! A manifest is a JSON array of [`UploadRecord`]s, the same shape the
//! upload pipeline persists. `tseal manifest` writes one; `tseal audit`
//! reads one back and re-verifies it.

use std::path::{Path, PathBuf};

use thiserror::Error;

use trustseal_types::upload::UploadRecord;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize manifest: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write manifest {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub async fn read_manifest(path: &Path) -> Result<Vec<UploadRecord>, ManifestError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Render records as pretty-printed JSON.
///
/// Fails when a record cannot be represented, e.g. a filepath that is not
/// valid UTF-8. No partial output is produced.
pub fn render_manifest(records: &[UploadRecord]) -> Result<String, ManifestError> {
    serde_json::to_string_pretty(records).map_err(|source| ManifestError::Serialize { source })
}

/// Write records to `path`, creating parent directories as needed.
pub async fn write_manifest(path: &Path, records: &[UploadRecord]) -> Result<(), ManifestError> {
    let write_err = |source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };
    let rendered = render_manifest(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    tokio::fs::write(path, rendered)
        .await
        .map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use trustseal_types::upload::UploadType;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audits").join("manifest.json");
        let mut record = UploadRecord::new(1, "/srv/uploads/app.apk", 2048, UploadType::AppFile)
            .with_entity("App", 3);
        record.file_hash = Some("956f5d8f7579d611c82402b7cd1e4230cda07e2322db801913ed683562a1d2f3".to_string());

        write_manifest(&path, std::slice::from_ref(&record)).await.unwrap();
        let loaded = read_manifest(&path).await.unwrap();
        assert_eq!(loaded, vec![record]);

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains("\"fileHash\""));
    }

    #[tokio::test]
    async fn test_read_missing_manifest() {
        let dir = tempdir().unwrap();
        let err = read_manifest(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }

    #[tokio::test]
    async fn test_read_malformed_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        tokio::fs::write(&path, "{\"not\": \"an array\"}").await.unwrap();
        let err = read_manifest(&path).await.unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse manifest"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_manifest(&[]).unwrap(), "[]");
    }

    #[cfg(unix)]
    fn non_utf8_record() -> UploadRecord {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let filepath = PathBuf::from(OsStr::from_bytes(b"dir/evid\xffence.apk"));
        let mut record = UploadRecord::new(7, filepath, 21, UploadType::GrievanceAttachment);
        record.file_hash = Some("956f5d8f7579d611c82402b7cd1e4230cda07e2322db801913ed683562a1d2f3".to_string());
        record
    }

    #[cfg(unix)]
    #[test]
    fn test_render_rejects_non_utf8_path() {
        let err = render_manifest(&[non_utf8_record()]).unwrap_err();
        assert!(matches!(err, ManifestError::Serialize { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_non_utf8_path_fails_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let err = write_manifest(&path, &[non_utf8_record()]).await.unwrap_err();
        assert!(matches!(err, ManifestError::Serialize { .. }));
        assert!(!path.exists());
    }
}
