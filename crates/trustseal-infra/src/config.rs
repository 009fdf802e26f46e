//! Configuration loader for Trustseal.
//!
//! Reads `config.toml` from the data directory (`~/.trustseal/` in production)
//! and deserializes it into [`IntegrityConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::Path;

use trustseal_types::config::IntegrityConfig;

/// Smallest chunk the digest engine will read.
pub const MIN_CHUNK_SIZE: usize = 4 * 1024;

/// Largest chunk the digest engine will read.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`IntegrityConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(data_dir: &Path) -> IntegrityConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return IntegrityConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return IntegrityConfig::default();
        }
    };

    match toml::from_str::<IntegrityConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", config_path.display());
            IntegrityConfig::default()
        }
    }
}

/// Chunk size clamped to [`MIN_CHUNK_SIZE`, `MAX_CHUNK_SIZE`].
pub fn resolve_chunk_size(config: &IntegrityConfig) -> usize {
    config.chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

/// Audit concurrency with a floor of one.
pub fn resolve_concurrency(config: &IntegrityConfig) -> usize {
    config.audit_concurrency.max(1)
}
