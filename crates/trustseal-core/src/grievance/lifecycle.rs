//! Grievance status state machine.
//!
//! - `pending_analysis` -> `under_forensics` | `rejected`
//! - `under_forensics` -> `verified_safe` | `confirmed_fraud` | `rejected`
//! - `verified_safe` | `confirmed_fraud` -> `under_forensics` (reopened)
//! - `rejected` is terminal
//!
//! Every accepted change appends to the grievance's custody log. A rejected
//! change leaves both the grievance and its log untouched.

use chrono::Utc;

use trustseal_types::error::GrievanceError;
use trustseal_types::grievance::{
    Grievance, GrievanceAction, GrievanceLogEntry, GrievancePriority, GrievanceStatus,
};
use trustseal_types::upload::AuditEntry;

use crate::grievance::custody::CustodyLog;

const MAX_RISK_SCORE: u8 = 100;

/// Statuses reachable from `from` in one step.
pub fn allowed_transitions(from: GrievanceStatus) -> &'static [GrievanceStatus] {
    use GrievanceStatus::*;
    match from {
        PendingAnalysis => &[UnderForensics, Rejected],
        UnderForensics => &[VerifiedSafe, ConfirmedFraud, Rejected],
        VerifiedSafe | ConfirmedFraud => &[UnderForensics],
        Rejected => &[],
    }
}

pub fn can_transition(from: GrievanceStatus, to: GrievanceStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// A grievance together with its chain of custody.
#[derive(Debug, Clone)]
pub struct GrievanceLifecycle {
    grievance: Grievance,
    log: CustodyLog,
}

impl GrievanceLifecycle {
    /// Start tracking a grievance. The intake is logged as a system action.
    pub fn new(grievance: Grievance) -> Self {
        let mut log = CustodyLog::new();
        log.append(GrievanceLogEntry::new(
            grievance.id,
            None,
            GrievanceAction::AiTriage,
            format!("Grievance filed with status '{}'", grievance.status),
        ));
        Self { grievance, log }
    }

    pub fn grievance(&self) -> &Grievance {
        &self.grievance
    }

    pub fn log(&self) -> &CustodyLog {
        &self.log
    }

    pub fn into_parts(self) -> (Grievance, CustodyLog) {
        (self.grievance, self.log)
    }

    /// Move the grievance to `to`.
    ///
    /// `actor` is `None` for system-driven changes. Blank `remarks` fall back
    /// to a generated description.
    pub fn transition(
        &mut self,
        to: GrievanceStatus,
        actor: Option<i64>,
        remarks: Option<&str>,
        risk_score: Option<u8>,
    ) -> Result<&GrievanceLogEntry, GrievanceError> {
        let from = self.grievance.status;
        if from == to {
            return Err(GrievanceError::UnchangedStatus(from));
        }
        if !can_transition(from, to) {
            return Err(GrievanceError::InvalidTransition { from, to });
        }
        if let Some(score) = risk_score.filter(|s| *s > MAX_RISK_SCORE) {
            return Err(GrievanceError::RiskScoreOutOfRange(score));
        }

        self.grievance.status = to;
        if risk_score.is_some() {
            self.grievance.risk_score = risk_score;
        }
        self.grievance.updated_at = Utc::now();

        let details = match remarks.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("Status changed from {from} to {to}"),
        };
        tracing::info!(grievance_id = self.grievance.id, %from, %to, ?actor, "grievance status updated");

        let entry = GrievanceLogEntry::new(self.grievance.id, actor, GrievanceAction::StatusUpdate, details)
            .with_statuses(from, to);
        Ok(self.log.append(entry))
    }

    /// Change priority. Returns `None` when the priority is already `priority`.
    pub fn change_priority(
        &mut self,
        priority: GrievancePriority,
        actor: Option<i64>,
    ) -> Option<&GrievanceLogEntry> {
        let previous = self.grievance.priority;
        if previous == priority {
            return None;
        }
        self.grievance.priority = priority;
        self.grievance.updated_at = Utc::now();

        let entry = GrievanceLogEntry::new(
            self.grievance.id,
            actor,
            GrievanceAction::PriorityChange,
            format!("Priority changed from {previous} to {priority}"),
        );
        Some(self.log.append(entry))
    }

    pub fn add_note(&mut self, actor: Option<i64>, text: &str) -> Result<&GrievanceLogEntry, GrievanceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GrievanceError::EmptyNote);
        }
        let entry = GrievanceLogEntry::new(self.grievance.id, actor, GrievanceAction::NoteAdded, text);
        Ok(self.log.append(entry))
    }

    /// Record the result of re-verifying one piece of evidence.
    pub fn record_evidence_check(&mut self, audit: &AuditEntry) -> &GrievanceLogEntry {
        let mut details = format!(
            "Evidence #{} ({}) integrity check: {}",
            audit.record_id,
            audit.filepath.display(),
            audit.status
        );
        if let Some(actual) = audit.report.as_ref().and_then(|r| r.actual.as_ref()) {
            details.push_str(&format!(" [{}]", actual.short(16)));
        }
        let entry = GrievanceLogEntry::new(self.grievance.id, None, GrievanceAction::EvidenceCheck, details);
        self.log.append(entry)
    }
}
