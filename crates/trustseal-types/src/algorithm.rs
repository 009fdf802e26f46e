//! Supported digest algorithms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AlgorithmParseError;

/// Digest function used to fingerprint a file.
///
/// SHA-256 is the default. MD5 and SHA-1 exist for comparing against legacy
/// fingerprints only; both are broken against an adversary who controls the
/// file, so callers should treat them as audit aids rather than proof.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Md5,
    Sha1,
}

impl HashAlgorithm {
    /// All supported algorithms, default first.
    pub const ALL: [HashAlgorithm; 3] = [
        HashAlgorithm::Sha256,
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
    ];

    /// Digest length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
        }
    }

    /// Digest length in hex characters.
    pub fn hex_len(&self) -> usize {
        self.digest_len() * 2
    }

    /// Whether the algorithm is collision-broken and kept for legacy comparison only.
    pub fn is_legacy(&self) -> bool {
        matches!(self, HashAlgorithm::Md5 | HashAlgorithm::Sha1)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha256 => write!(f, "sha256"),
            HashAlgorithm::Md5 => write!(f, "md5"),
            HashAlgorithm::Sha1 => write!(f, "sha1"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = AlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
            other => Err(AlgorithmParseError(other.to_string())),
        }
    }
}
