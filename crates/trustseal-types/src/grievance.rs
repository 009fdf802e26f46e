//! Grievance (fraud report) domain types and custody log entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Forensic workflow states of a grievance.
///
/// - PendingAnalysis: filed, awaiting triage
/// - UnderForensics: evidence is being examined
/// - VerifiedSafe: examined, no fraud found
/// - ConfirmedFraud: examined, fraud confirmed
/// - Rejected: dismissed (terminal)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrievanceStatus {
    #[default]
    PendingAnalysis,
    UnderForensics,
    VerifiedSafe,
    ConfirmedFraud,
    Rejected,
}

impl fmt::Display for GrievanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrievanceStatus::PendingAnalysis => write!(f, "pending_analysis"),
            GrievanceStatus::UnderForensics => write!(f, "under_forensics"),
            GrievanceStatus::VerifiedSafe => write!(f, "verified_safe"),
            GrievanceStatus::ConfirmedFraud => write!(f, "confirmed_fraud"),
            GrievanceStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for GrievanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending_analysis" => Ok(GrievanceStatus::PendingAnalysis),
            "under_forensics" => Ok(GrievanceStatus::UnderForensics),
            "verified_safe" => Ok(GrievanceStatus::VerifiedSafe),
            "confirmed_fraud" => Ok(GrievanceStatus::ConfirmedFraud),
            "rejected" => Ok(GrievanceStatus::Rejected),
            other => Err(format!("invalid grievance status: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrievancePriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl fmt::Display for GrievancePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrievancePriority::Low => write!(f, "Low"),
            GrievancePriority::Medium => write!(f, "Medium"),
            GrievancePriority::High => write!(f, "High"),
            GrievancePriority::Critical => write!(f, "Critical"),
        }
    }
}

/// Kind of change captured by a custody log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrievanceAction {
    StatusUpdate,
    PriorityChange,
    NoteAdded,
    AiTriage,
    EvidenceCheck,
}

impl fmt::Display for GrievanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrievanceAction::StatusUpdate => write!(f, "STATUS_UPDATE"),
            GrievanceAction::PriorityChange => write!(f, "PRIORITY_CHANGE"),
            GrievanceAction::NoteAdded => write!(f, "NOTE_ADDED"),
            GrievanceAction::AiTriage => write!(f, "AI_TRIAGE"),
            GrievanceAction::EvidenceCheck => write!(f, "EVIDENCE_CHECK"),
        }
    }
}

/// A citizen fraud report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grievance {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub priority: GrievancePriority,
    pub status: GrievanceStatus,
    /// Analyst or model trust score, 0..=100.
    pub risk_score: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Grievance {
    /// A newly filed grievance in `PendingAnalysis`.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            category: None,
            priority: GrievancePriority::default(),
            status: GrievanceStatus::default(),
            risk_score: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One immutable entry in a grievance's chain of custody.
///
/// Entries have a creation timestamp only; they are never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrievanceLogEntry {
    pub id: Uuid,
    pub grievance_id: i64,
    /// Official who acted; `None` when the system acted.
    pub actor_id: Option<i64>,
    pub action: GrievanceAction,
    pub details: String,
    pub previous_status: Option<GrievanceStatus>,
    pub new_status: Option<GrievanceStatus>,
    pub created_at: DateTime<Utc>,
}

impl GrievanceLogEntry {
    pub fn new(
        grievance_id: i64,
        actor_id: Option<i64>,
        action: GrievanceAction,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            grievance_id,
            actor_id,
            action,
            details: details.into(),
            previous_status: None,
            new_status: None,
            created_at: Utc::now(),
        }
    }

    /// Snapshot the status before and after the change.
    pub fn with_statuses(mut self, previous: GrievanceStatus, new: GrievanceStatus) -> Self {
        self.previous_status = Some(previous);
        self.new_status = Some(new);
        self
    }
}
