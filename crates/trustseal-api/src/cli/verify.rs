//! `tseal verify`: check one file against an expected digest.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use console::style;

use trustseal_types::algorithm::HashAlgorithm;
use trustseal_types::verification::VerificationReport;

use crate::state::AppState;

/// Verify `path` against `expected` and report the verdict.
///
/// Exits 0 only on a match. Every other outcome, including an unreadable
/// file, exits 1.
pub async fn verify_file(
    state: &AppState,
    path: &Path,
    expected: &str,
    algorithm: Option<HashAlgorithm>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode> {
    let algorithm = algorithm.unwrap_or(state.config.default_algorithm);
    let report = state.verifier.inspect(path, expected, algorithm).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !quiet {
        print_report(&report);
    }

    Ok(exit_code(&report))
}

pub(crate) fn exit_code(report: &VerificationReport) -> ExitCode {
    if report.is_verified() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_report(report: &VerificationReport) {
    println!();
    if report.is_verified() {
        println!(
            "  {} {} is intact",
            style("✓").green().bold(),
            style(report.path.display()).cyan()
        );
    } else {
        println!(
            "  {} {} failed verification ({})",
            style("✗").red().bold(),
            style(report.path.display()).cyan(),
            style(report.outcome).red()
        );
    }
    println!();
    println!("  {}  {}", style("Algorithm:").bold(), report.algorithm);
    println!("  {}   {}", style("Expected:").bold(), report.expected);
    if let Some(actual) = &report.actual {
        println!("  {}     {}", style("Actual:").bold(), actual);
    }
    if let Some(reason) = &report.reason {
        println!("  {}     {}", style("Reason:").bold(), style(reason).dim());
    }
    println!();
}
