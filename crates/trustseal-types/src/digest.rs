//! Canonical hex representation of a file digest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DigestParseError;

/// A digest rendered as lowercase hexadecimal.
///
/// Construction always normalizes, so two `HexDigest`s compare equal exactly
/// when their underlying bytes are equal. Uppercase input is accepted and
/// folded to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexDigest(String);

impl HexDigest {
    /// Parse a hex string, trimming surrounding whitespace and folding case.
    pub fn parse(s: &str) -> Result<Self, DigestParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DigestParseError::Empty);
        }
        if let Some((index, ch)) = trimmed.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(DigestParseError::InvalidCharacter { ch, index });
        }
        if trimmed.len() % 2 != 0 {
            return Err(DigestParseError::OddLength(trimmed.len()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Render raw digest bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let hex = bytes.iter().map(|b| format!("{b:02x}")).collect::<String>();
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digest bytes represented.
    pub fn byte_len(&self) -> usize {
        self.0.len() / 2
    }

    /// Compare against an arbitrary expected string.
    ///
    /// Returns false when `expected` is not valid hex.
    pub fn matches(&self, expected: &str) -> bool {
        HexDigest::parse(expected).is_ok_and(|other| other == *self)
    }

    /// First `n` hex characters, for compact display.
    pub fn short(&self, n: usize) -> &str {
        &self.0[..n.min(self.0.len())]
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexDigest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexDigest {
    type Error = DigestParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexDigest> for String {
    fn from(digest: HexDigest) -> Self {
        digest.0
    }
}
