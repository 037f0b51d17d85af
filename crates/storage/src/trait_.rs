//! Storage trait abstraction.

use async_trait::async_trait;
use dtfe_core::{AuditEvent, CaseId, CaseRecord, ConsentKind, ProgressEntry, StoredReport};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Required guardian consent is withheld
    #[error("consent withheld for case {case_id}: {kind}")]
    ConsentWithheld {
        /// Case the check was performed for
        case_id: CaseId,
        /// Which consent kind was missing
        kind: ConsentKind,
    },
}

/// Storage abstraction for the DTFE case store.
///
/// The engine consumes a read accessor (ordered progress history) and a
/// write accessor (forecast reports); the remaining operations cover the
/// case/consent lifecycle around it. Implementations append an audit
/// event for every mutation.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Case operations ===

    /// Save a case record (create or update).
    async fn save_case(&mut self, case: &CaseRecord) -> Result<()>;

    /// Load a case record by ID.
    async fn load_case(&self, id: CaseId) -> Result<Option<CaseRecord>>;

    /// List all case records.
    async fn list_cases(&self) -> Result<Vec<CaseRecord>>;

    // === Consent operations ===

    /// Set a consent flag for a case.
    async fn set_consent(&mut self, case_id: CaseId, kind: ConsentKind, granted: bool)
        -> Result<()>;

    /// Read all consent flags for a case. Absent flags are withheld.
    async fn get_consents(&self, case_id: CaseId) -> Result<Vec<(ConsentKind, bool)>>;

    /// Fail with [`StorageError::ConsentWithheld`] unless the given
    /// consent is currently granted.
    async fn require_consent(&self, case_id: CaseId, kind: ConsentKind) -> Result<()> {
        let granted = self
            .get_consents(case_id)
            .await?
            .into_iter()
            .any(|(k, g)| k == kind && g);
        if granted {
            Ok(())
        } else {
            Err(StorageError::ConsentWithheld { case_id, kind })
        }
    }

    // === Progress log operations ===

    /// Append a progress log entry for a case.
    async fn add_progress_entry(&mut self, case_id: CaseId, entry: &ProgressEntry) -> Result<()>;

    /// Load a case's full progress history, ordered by week ascending.
    ///
    /// Callers hand the returned snapshot to the engine as-is; reading
    /// once and computing over the owned snapshot is what keeps an
    /// in-flight forecast consistent under concurrent appends.
    async fn get_progress_history(&self, case_id: CaseId) -> Result<Vec<ProgressEntry>>;

    // === Forecast report operations ===

    /// Persist a generated DTFE report.
    async fn save_report(&mut self, report: &StoredReport) -> Result<()>;

    /// Load the most recently generated report for a case.
    async fn latest_report(&self, case_id: CaseId) -> Result<Option<StoredReport>>;

    // === Audit operations ===

    /// Append an audit event.
    async fn log_audit(&mut self, event: &AuditEvent) -> Result<()>;

    /// List all audit events for a case, oldest first.
    async fn list_audit(&self, case_id: CaseId) -> Result<Vec<AuditEvent>>;
}
