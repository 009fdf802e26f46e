//! Application state wiring the services together.
//!
//! Services are generic over the `FileDigester` port; AppState pins them to
//! the streaming RustCrypto digester from trustseal-infra.

use std::path::PathBuf;
use std::sync::Arc;

use trustseal_core::service::audit::IntegrityAuditor;
use trustseal_core::service::integrity::{AlgorithmPolicy, IntegrityVerifier};
use trustseal_infra::config::{load_config, resolve_chunk_size, resolve_concurrency};
use trustseal_infra::crypto::digest::StreamingFileDigester;
use trustseal_infra::filesystem::resolve_data_dir;
use trustseal_types::config::IntegrityConfig;

pub type ConcreteVerifier = IntegrityVerifier<StreamingFileDigester>;
pub type ConcreteAuditor = IntegrityAuditor<StreamingFileDigester>;

/// Shared state for CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub digester: StreamingFileDigester,
    pub verifier: Arc<ConcreteVerifier>,
    pub auditor: Arc<ConcreteAuditor>,
    pub config: IntegrityConfig,
}

impl AppState {
    /// Load configuration and wire services.
    ///
    /// `data_dir` overrides the environment/platform default.
    pub async fn init(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.unwrap_or_else(resolve_data_dir);
        let config = load_config(&data_dir).await;

        let digester = StreamingFileDigester::new(resolve_chunk_size(&config));
        let policy = AlgorithmPolicy {
            allow_legacy: config.allow_legacy_algorithms,
        };

        let verifier = IntegrityVerifier::new(digester).with_policy(policy);
        let auditor = IntegrityAuditor::new(
            IntegrityVerifier::new(digester).with_policy(policy),
            resolve_concurrency(&config),
        );

        tracing::debug!(
            data_dir = %data_dir.display(),
            chunk_size = digester.chunk_size(),
            allow_legacy = policy.allow_legacy,
            "application state initialized"
        );

        Ok(Self {
            digester,
            verifier: Arc::new(verifier),
            auditor: Arc::new(auditor),
            config,
        })
    }
}
