//! In-memory `FileDigester` for service tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use trustseal_types::algorithm::HashAlgorithm;
use trustseal_types::digest::HexDigest;
use trustseal_types::error::IntegrityError;

use crate::service::hash::FileDigester;

enum FakeFile {
    Content(HashMap<HashAlgorithm, HexDigest>),
    Denied,
}

/// Digester backed by a path -> digest table. Unknown paths are missing.
#[derive(Default)]
pub struct FakeDigester {
    files: HashMap<PathBuf, FakeFile>,
    calls: AtomicUsize,
}

impl FakeDigester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, algorithm: HashAlgorithm, hex: &str) -> Self {
        let digest = HexDigest::parse(hex).unwrap();
        match self.files.entry(PathBuf::from(path)).or_insert_with(|| FakeFile::Content(HashMap::new())) {
            FakeFile::Content(map) => {
                map.insert(algorithm, digest);
            }
            FakeFile::Denied => panic!("{path} is registered as unreadable"),
        }
        self
    }

    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.files.insert(PathBuf::from(path), FakeFile::Denied);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FileDigester for FakeDigester {
    async fn digest_file(&self, path: &Path, algorithm: HashAlgorithm) -> Result<HexDigest, IntegrityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.files.get(path) {
            Some(FakeFile::Content(map)) => map.get(&algorithm).cloned().ok_or_else(|| IntegrityError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other(format!("no {algorithm} digest registered")),
            }),
            Some(FakeFile::Denied) => Err(IntegrityError::from_io(
                path,
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            )),
            None => Err(IntegrityError::FileNotFound {
                path: path.to_path_buf(),
            }),
        }
    }
}

pub const EVIDENCE_SHA256: &str = "956f5d8f7579d611c82402b7cd1e4230cda07e2322db801913ed683562a1d2f3";
pub const EVIDENCE_MD5: &str = "97e67eab2b9fae9beded4c2c6d81facf";
pub const OTHER_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
