//! Global configuration types for Trustseal.
//!
//! `IntegrityConfig` represents the top-level `config.toml` that controls
//! digest defaults, streaming chunk size, algorithm policy, and audit fan-out.

use serde::{Deserialize, Serialize};

use crate::algorithm::HashAlgorithm;

/// Top-level configuration.
///
/// Loaded from `~/.trustseal/config.toml`. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityConfig {
    /// Algorithm used when the caller does not name one.
    #[serde(default)]
    pub default_algorithm: HashAlgorithm,

    /// Bytes read per chunk by the streaming digest engine.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Whether MD5/SHA-1 may be used for verification at all.
    #[serde(default = "default_allow_legacy")]
    pub allow_legacy_algorithms: bool,

    /// Maximum number of files hashed at once during an audit.
    #[serde(default = "default_audit_concurrency")]
    pub audit_concurrency: usize,
}

pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_allow_legacy() -> bool {
    true
}

fn default_audit_concurrency() -> usize {
    4
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            default_algorithm: HashAlgorithm::default(),
            chunk_size: default_chunk_size(),
            allow_legacy_algorithms: default_allow_legacy(),
            audit_concurrency: default_audit_concurrency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = IntegrityConfig::default();
        assert_eq!(config.default_algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.chunk_size, 65_536);
        assert!(config.allow_legacy_algorithms);
        assert_eq!(config.audit_concurrency, 4);
    }

    #[test]
    fn test_config_deserialize_empty_uses_defaults() {
        let config: IntegrityConfig = toml::from_str("").unwrap();
        assert_eq!(config, IntegrityConfig::default());
    }

    #[test]
    fn test_config_deserialize_with_values() {
        let toml_str = r#"
default_algorithm = "sha1"
chunk_size = 1048576
allow_legacy_algorithms = false
audit_concurrency = 16
"#;
        let config: IntegrityConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_algorithm, HashAlgorithm::Sha1);
        assert_eq!(config.chunk_size, 1_048_576);
        assert!(!config.allow_legacy_algorithms);
        assert_eq!(config.audit_concurrency, 16);
    }

    #[test]
    fn test_config_rejects_unknown_algorithm() {
        let result = toml::from_str::<IntegrityConfig>(r#"default_algorithm = "crc32""#);
        assert!(result.is_err());
    }
}
