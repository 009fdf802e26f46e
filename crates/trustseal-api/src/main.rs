//! Trustseal CLI entry point.
//!
//! Binary name: `tseal`
//!
//! Parses CLI arguments, loads configuration, wires the integrity services,
//! then dispatches to the command handler. The process exit code carries the
//! verification verdict: 0 only when everything checked out.

mod cli;
mod state;

use std::process::ExitCode;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;
use trustseal_observe::tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let options = TracingOptions {
        otel: cli.otel,
        ..TracingOptions::from_verbosity(cli.verbose, cli.quiet)
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;

    // Flush buffered spans on every exit path, errors included.
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "tseal", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let state = AppState::init(cli.data_dir).await?;

    match cli.command {
        Commands::Hash { path, algorithm } => {
            cli::hash::hash_file(&state, &path, algorithm, cli.json, cli.quiet).await
        }

        Commands::Verify {
            path,
            expected,
            algorithm,
        } => cli::verify::verify_file(&state, &path, &expected, algorithm, cli.json, cli.quiet).await,

        Commands::Manifest {
            files,
            upload_type,
            algorithm,
            entity_type,
            entity_id,
            start_id,
            output,
        } => {
            let request = cli::manifest::ManifestRequest {
                files,
                upload_type,
                algorithm,
                entity: entity_type.zip(entity_id),
                start_id,
                output,
            };
            cli::manifest::build_manifest(&state, request, cli.json, cli.quiet).await
        }

        Commands::Audit { manifest } => {
            cli::audit::audit_manifest(&state, &manifest, cli.json, cli.quiet).await
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_command_returns_to_main_for_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_str().unwrap();
        let manifest = dir.path().join("missing.json");
        let cli = Cli::try_parse_from(["tseal", "--data-dir", data_dir, "audit", manifest.to_str().unwrap()])
            .unwrap();

        assert!(run(cli).await.is_err());
        // Safe whether or not a tracer provider was installed.
        shutdown_tracing();
    }

    #[tokio::test]
    async fn test_completions_skip_state() {
        let cli = Cli::try_parse_from(["tseal", "completions", "bash"]).unwrap();
        assert_eq!(run(cli).await.unwrap(), ExitCode::SUCCESS);
    }
}
