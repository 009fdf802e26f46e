//! `tseal audit`: re-verify every record in a manifest.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use trustseal_infra::manifest::read_manifest;
use trustseal_types::upload::{AuditEntry, AuditReport, AuditStatus};

use crate::state::AppState;

/// Re-verify `manifest` and report each record.
///
/// Exits 0 only when the manifest holds at least one record and every
/// record verified. An empty manifest has nothing to prove and exits 1.
pub async fn audit_manifest(state: &AppState, manifest: &Path, json: bool, quiet: bool) -> Result<ExitCode> {
    let records = read_manifest(manifest).await?;
    let report = state.auditor.audit(&records).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !quiet {
        print_report(&report);
    }

    Ok(if report.all_verified() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn status_cell(status: AuditStatus) -> Cell {
    match status {
        AuditStatus::Verified => Cell::new("● verified").fg(Color::Green),
        AuditStatus::Tampered => Cell::new("✗ tampered").fg(Color::Red),
        AuditStatus::Unreadable => Cell::new("✗ unreadable").fg(Color::Red),
        AuditStatus::PolicyRejected => Cell::new("✗ policy_rejected").fg(Color::Red),
        AuditStatus::Unhashed => Cell::new("○ unhashed").fg(Color::Yellow),
    }
}

fn detail(entry: &AuditEntry) -> String {
    match &entry.report {
        Some(report) => match (&report.reason, &report.actual) {
            (Some(reason), _) => reason.clone(),
            (None, Some(actual)) => format!("{} {}", report.algorithm, actual.short(16)),
            (None, None) => String::new(),
        },
        None => "no fingerprint recorded".to_string(),
    }
}

fn print_report(report: &AuditReport) {
    if report.entries.is_empty() {
        println!();
        println!(
            "  {} Manifest contains no records; nothing to verify.",
            style("✗").red().bold()
        );
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("File").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Detail").fg(Color::White),
    ]);

    for entry in &report.entries {
        table.add_row(vec![
            Cell::new(entry.record_id).fg(Color::DarkGrey),
            Cell::new(entry.filepath.display()).fg(Color::Cyan),
            status_cell(entry.status),
            Cell::new(detail(entry)),
        ]);
    }

    let elapsed = report.finished_at - report.started_at;

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} verified, {} failed, {} unhashed {}",
        style(report.verified()).green().bold(),
        style(report.failed()).red().bold(),
        style(report.unhashed()).yellow().bold(),
        style(format!("({} ms)", elapsed.num_milliseconds())).dim()
    );
    println!();
}
