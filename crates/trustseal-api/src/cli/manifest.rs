//! `tseal manifest`: fingerprint files into upload records.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use console::style;

use trustseal_core::service::upload::UploadService;
use trustseal_infra::config::resolve_concurrency;
use trustseal_infra::manifest::{render_manifest, write_manifest};
use trustseal_types::algorithm::HashAlgorithm;
use trustseal_types::upload::{UploadRecord, UploadType};

use crate::state::AppState;

/// Parsed arguments of `tseal manifest`.
pub struct ManifestRequest {
    pub files: Vec<PathBuf>,
    pub upload_type: UploadType,
    pub algorithm: Option<HashAlgorithm>,
    pub entity: Option<(String, i64)>,
    pub start_id: i64,
    pub output: Option<PathBuf>,
}

/// Build one record per file, fingerprint them, and emit the manifest.
///
/// An algorithm refused by policy, or a file that cannot be stat'ed, aborts
/// the command before anything is hashed. A file that can be stat'ed but not
/// hashed is still recorded, with no `fileHash`; a later audit reports it as
/// unhashed. Exits 1 if any record is left unhashed.
pub async fn build_manifest(
    state: &AppState,
    request: ManifestRequest,
    json: bool,
    quiet: bool,
) -> Result<ExitCode> {
    let algorithm = request.algorithm.unwrap_or(state.config.default_algorithm);
    let service = UploadService::new(
        state.digester,
        algorithm,
        state.verifier.policy(),
        resolve_concurrency(&state.config),
    )?;

    let mut records = Vec::with_capacity(request.files.len());
    for (id, path) in (request.start_id..).zip(request.files) {
        let metadata = tokio::fs::metadata(&path)
            .await
            .with_context(|| format!("cannot stat {}", path.display()))?;
        let mut record = UploadRecord::new(id, path, metadata.len(), request.upload_type);
        if let Some((entity_type, entity_id)) = &request.entity {
            record = record.with_entity(entity_type.clone(), *entity_id);
        }
        records.push(record);
    }

    let records = service.fingerprint_all(records).await;
    let unhashed = records.iter().filter(|r| r.file_hash.is_none()).count();

    match &request.output {
        Some(output) => {
            write_manifest(output, &records).await?;
            if json {
                let out = serde_json::json!({
                    "output": output.display().to_string(),
                    "records": records.len(),
                    "unhashed": unhashed,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if !quiet {
                println!();
                println!(
                    "  {} Wrote {} record{} to {}",
                    style("✓").green().bold(),
                    style(records.len()).bold(),
                    if records.len() == 1 { "" } else { "s" },
                    style(output.display()).cyan()
                );
                if unhashed > 0 {
                    println!(
                        "  {} {unhashed} file{} could not be hashed",
                        style("!").yellow().bold(),
                        if unhashed == 1 { "" } else { "s" }
                    );
                }
                println!();
            }
        }
        None => println!("{}", render_manifest(&records)?),
    }

    Ok(if unhashed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
