//! Derived trend, forecast, and report models.
//!
//! Numeric fields carry the canonical rounding: slopes to 3 decimal
//! places, forecast means/bounds/adjusted values to 2. Downstream
//! consumers compare against these exact values, so the rounding is part
//! of the data contract, not a display concern.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Direction of a fitted progress trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    /// Slope above the plateau threshold
    Improving,
    /// Slope below the negated plateau threshold
    Regressing,
    /// Slope within the plateau band around zero
    Plateau,
}

/// Result of a trend classification. Transient, never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Fitted weekly slope, rounded to 3 decimals
    pub slope: f64,

    /// Direction classification
    pub direction: TrendDirection,

    /// True iff the direction is plateau
    pub plateau_risk: bool,
}

/// Symmetric-before-clamping confidence band around a mean forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound per forecast week, clamped to [0, 100]
    pub lower: Vec<f64>,

    /// Upper bound per forecast week, clamped to [0, 100]
    pub upper: Vec<f64>,
}

/// A short-horizon probabilistic forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Number of future weeks projected
    pub forecast_weeks: u32,

    /// Fitted weekly slope, rounded to 3 decimals
    pub trend_slope: f64,

    /// Projected mean score per future week, clamped and rounded to 2 decimals
    pub mean_forecast: Vec<f64>,

    /// 95% confidence band, bounds clamped independently of the mean
    pub confidence_interval: ConfidenceInterval,

    /// Advisory interpretation text
    pub interpretation: String,
}

/// Whole-history plateau risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateauAssessment {
    /// True iff the whole-history slope falls below the plateau threshold
    pub plateau_risk: bool,

    /// Fitted weekly slope, rounded to 3 decimals
    pub trend_slope: f64,

    /// Human-readable assessment message
    pub message: String,
}

/// A what-if simulation of changed therapy intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Intensity multiplier applied to the baseline mean (> 0)
    pub intensity_multiplier: f64,

    /// Rescaled mean forecast, clamped and rounded to 2 decimals
    pub adjusted_forecast: Vec<f64>,

    /// Advisory interpretation text
    pub interpretation: String,
}

/// Full DTFE analysis report.
///
/// Only ever constructed from a series satisfying the minimum-length
/// precondition; never partially populated. Callers persist it with a case
/// identifier and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtfeReport {
    /// Baseline forecast over the default horizon
    pub forecast: ForecastResult,

    /// Whole-history plateau assessment
    pub plateau_analysis: PlateauAssessment,

    /// Named what-if scenarios, keyed by scenario label
    pub what_if: BTreeMap<String, SimulationResult>,

    /// Advisory note attached to every report
    pub clinical_note: String,
}
