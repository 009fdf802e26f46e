use std::path::PathBuf;

use thiserror::Error;

use crate::algorithm::HashAlgorithm;
use crate::grievance::GrievanceStatus;

/// Errors from computing a file digest.
///
/// The verifier never surfaces these to its caller; they only escape from
/// the digest engine itself.
#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("digest worker failed: {0}")]
    Worker(String),

    #[error("{algorithm} is not permitted by the algorithm policy")]
    AlgorithmRejected { algorithm: HashAlgorithm },
}

impl IntegrityError {
    /// Classify an I/O error raised while opening or reading `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            IntegrityError::FileNotFound { path }
        } else {
            IntegrityError::Io { path, source }
        }
    }
}

/// Errors from parsing a hex digest string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestParseError {
    #[error("digest is empty")]
    Empty,

    #[error("digest has odd length {0}")]
    OddLength(usize),

    #[error("invalid hex character '{ch}' at index {index}")]
    InvalidCharacter { ch: char, index: usize },
}

/// An algorithm name outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported hash algorithm: '{0}'")]
pub struct AlgorithmParseError(pub String);

/// Errors from grievance lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrievanceError {
    #[error("cannot move grievance from '{from}' to '{to}'")]
    InvalidTransition {
        from: GrievanceStatus,
        to: GrievanceStatus,
    },

    #[error("grievance is already '{0}'")]
    UnchangedStatus(GrievanceStatus),

    #[error("risk score {0} is outside 0..=100")]
    RiskScoreOutOfRange(u8),

    #[error("note text is empty")]
    EmptyNote,
}
