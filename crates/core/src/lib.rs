//! DTFE core data models.
//!
//! This crate defines the data structures shared by the forecasting
//! engine, the case store, and the CLI: progress observations, trend and
//! forecast results, engine configuration, and the error taxonomy.

#![warn(missing_docs)]

// Core identities
mod id;

// Observations and derived results
mod point;
mod report;

// Case, consent, and audit records
mod case;

// Engine configuration and errors
mod config;
mod error;

// Score-range primitives
mod score;

// Re-exports
pub use id::CaseId;

pub use point::{ProgressPoint, ProgressEntry};
pub use report::{
    TrendResult, TrendDirection, ForecastResult, ConfidenceInterval,
    PlateauAssessment, SimulationResult, DtfeReport,
};

pub use case::{CaseRecord, ConsentKind, StoredReport, AuditEvent};

pub use config::DtfeConfig;
pub use error::{EngineError, Result};

pub use score::{clamp_score, round2, round3, SCORE_MIN, SCORE_MAX};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
