//! Case records, consent flags, and audit events.
//!
//! These model what the external case store persists around the engine:
//! who the progress history belongs to, whether the guardian consented to
//! storage and forecasting, and a trail of what happened when.

use serde::{Deserialize, Serialize};
use crate::id::CaseId;
use crate::report::DtfeReport;
use crate::Time;

/// A clinical case record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Unique identifier
    pub id: CaseId,

    /// Child's age in months at intake
    pub child_age_months: u32,

    /// Free-text intake notes
    pub notes: String,

    /// When the case was created
    pub created_at: Time,
}

impl CaseRecord {
    /// Create a new case record with a fresh id.
    pub fn new(child_age_months: u32, notes: impl Into<String>) -> Self {
        Self {
            id: CaseId::new(),
            child_age_months,
            notes: notes.into(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// Kinds of guardian consent tracked per case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentKind {
    /// Consent to store progress data
    DataStorage,
    /// Consent to run trend analysis and forecasting
    Forecasting,
}

impl std::fmt::Display for ConsentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataStorage => write!(f, "data_storage"),
            Self::Forecasting => write!(f, "forecasting"),
        }
    }
}

/// A DTFE report as persisted by the case store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReport {
    /// Case the report was computed for
    pub case_id: CaseId,

    /// The report itself
    pub report: DtfeReport,

    /// When the report was generated
    pub created_at: Time,
}

/// One entry in the per-case audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// When the action happened
    pub at: Time,

    /// What happened (e.g. `PROGRESS_LOGGED`, `FORECAST_SAVED`)
    pub action: String,

    /// Case the action concerned
    pub case_id: CaseId,

    /// Optional structured details
    pub details: Option<serde_json::Value>,
}
