//! JSON file storage implementation.
//!
//! Stores data as JSON files in a `.dtfe` directory: one file per case
//! for the record itself, and one append-array file per case for consent
//! flags, progress logs, reports, and audit events.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dtfe_core::{AuditEvent, CaseId, CaseRecord, ConsentKind, ProgressEntry, StoredReport};
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::debug;

use super::{Storage, Result};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at the given directory, creating the
    /// per-kind subdirectories as needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("cases")).await?;
        fs::create_dir_all(root.join("consents")).await?;
        fs::create_dir_all(root.join("progress")).await?;
        fs::create_dir_all(root.join("reports")).await?;
        fs::create_dir_all(root.join("audit")).await?;

        Ok(Self { root })
    }

    fn case_path(&self, id: CaseId) -> PathBuf {
        self.root.join("cases").join(format!("{}.json", id))
    }
    fn consent_path(&self, id: CaseId) -> PathBuf {
        self.root.join("consents").join(format!("{}.json", id))
    }
    fn progress_path(&self, id: CaseId) -> PathBuf {
        self.root.join("progress").join(format!("{}.json", id))
    }
    fn report_path(&self, id: CaseId) -> PathBuf {
        self.root.join("reports").join(format!("{}.json", id))
    }
    fn audit_path(&self, id: CaseId) -> PathBuf {
        self.root.join("audit").join(format!("{}.json", id))
    }

    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(path, bytes).await?;
        Ok(())
    }

    async fn append_audit(
        &self,
        action: &str,
        case_id: CaseId,
        details: Option<serde_json::Value>,
    ) -> Result<()> {
        let event = AuditEvent {
            at: chrono::Utc::now(),
            action: action.to_string(),
            case_id,
            details,
        };
        let path = self.audit_path(case_id);
        let mut events: Vec<AuditEvent> = self.read_json(&path).await?.unwrap_or_default();
        events.push(event);
        self.write_json(&path, &events).await
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn save_case(&mut self, case: &CaseRecord) -> Result<()> {
        self.write_json(&self.case_path(case.id), case).await?;
        self.append_audit("CASE_SAVED", case.id, None).await?;
        debug!(case_id = %case.id, "saved case record");
        Ok(())
    }

    async fn load_case(&self, id: CaseId) -> Result<Option<CaseRecord>> {
        self.read_json(&self.case_path(id)).await
    }

    async fn list_cases(&self) -> Result<Vec<CaseRecord>> {
        let mut cases = Vec::new();
        let mut entries = fs::read_dir(self.root.join("cases")).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.path().extension().is_some_and(|e| e == "json") {
                if let Some(case) = self.read_json::<CaseRecord>(&entry.path()).await? {
                    cases.push(case);
                }
            }
        }
        cases.sort_by_key(|c| c.created_at);
        Ok(cases)
    }

    async fn set_consent(
        &mut self,
        case_id: CaseId,
        kind: ConsentKind,
        granted: bool,
    ) -> Result<()> {
        let path = self.consent_path(case_id);
        let mut consents: HashMap<ConsentKind, bool> =
            self.read_json(&path).await?.unwrap_or_default();
        consents.insert(kind, granted);
        self.write_json(&path, &consents).await?;
        self.append_audit(
            "CONSENT_UPDATED",
            case_id,
            Some(serde_json::json!({ "kind": kind, "granted": granted })),
        )
        .await?;
        Ok(())
    }

    async fn get_consents(&self, case_id: CaseId) -> Result<Vec<(ConsentKind, bool)>> {
        let consents: HashMap<ConsentKind, bool> = self
            .read_json(&self.consent_path(case_id))
            .await?
            .unwrap_or_default();
        Ok(consents.into_iter().collect())
    }

    async fn add_progress_entry(&mut self, case_id: CaseId, entry: &ProgressEntry) -> Result<()> {
        let path = self.progress_path(case_id);
        let mut entries: Vec<ProgressEntry> = self.read_json(&path).await?.unwrap_or_default();
        entries.push(entry.clone());
        self.write_json(&path, &entries).await?;
        self.append_audit(
            "PROGRESS_LOGGED",
            case_id,
            Some(serde_json::json!({ "week": entry.week, "score": entry.score })),
        )
        .await?;
        debug!(case_id = %case_id, week = entry.week, "logged progress entry");
        Ok(())
    }

    async fn get_progress_history(&self, case_id: CaseId) -> Result<Vec<ProgressEntry>> {
        let mut entries: Vec<ProgressEntry> = self
            .read_json(&self.progress_path(case_id))
            .await?
            .unwrap_or_default();
        entries.sort_by_key(|e| e.week);
        Ok(entries)
    }

    async fn save_report(&mut self, report: &StoredReport) -> Result<()> {
        let path = self.report_path(report.case_id);
        let mut reports: Vec<StoredReport> = self.read_json(&path).await?.unwrap_or_default();
        reports.push(report.clone());
        self.write_json(&path, &reports).await?;
        self.append_audit("FORECAST_SAVED", report.case_id, None).await?;
        debug!(case_id = %report.case_id, "saved DTFE report");
        Ok(())
    }

    async fn latest_report(&self, case_id: CaseId) -> Result<Option<StoredReport>> {
        let reports: Vec<StoredReport> = self
            .read_json(&self.report_path(case_id))
            .await?
            .unwrap_or_default();
        Ok(reports.into_iter().max_by_key(|r| r.created_at))
    }

    async fn log_audit(&mut self, event: &AuditEvent) -> Result<()> {
        let path = self.audit_path(event.case_id);
        let mut events: Vec<AuditEvent> = self.read_json(&path).await?.unwrap_or_default();
        events.push(event.clone());
        self.write_json(&path, &events).await
    }

    async fn list_audit(&self, case_id: CaseId) -> Result<Vec<AuditEvent>> {
        Ok(self
            .read_json(&self.audit_path(case_id))
            .await?
            .unwrap_or_default())
    }
}
