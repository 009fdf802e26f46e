//! `tseal hash`: print a file's digest.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use trustseal_types::algorithm::HashAlgorithm;

use crate::state::AppState;

/// Compute and print the digest of `path`.
///
/// Unlike `verify`, failures surface as errors: a missing file is reported,
/// not silently turned into a verdict.
pub async fn hash_file(
    state: &AppState,
    path: &Path,
    algorithm: Option<HashAlgorithm>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode> {
    let algorithm = algorithm.unwrap_or(state.config.default_algorithm);
    let digest = state.verifier.compute(path, algorithm).await?;

    if json {
        let out = serde_json::json!({
            "path": path.display().to_string(),
            "algorithm": algorithm,
            "digest": digest,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if quiet {
        println!("{digest}");
    } else {
        // Same layout as sha256sum and friends
        println!("{digest}  {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}
