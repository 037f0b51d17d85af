//! Full DTFE analysis pipeline.

use std::collections::BTreeMap;

use dtfe_core::{DtfeConfig, DtfeReport, ProgressPoint, Result};

use crate::forecast::ForecastEngine;

/// Scenario multipliers for the standard what-if pair.
const SCENARIO_INCREASE: (&str, f64) = ("+20% therapy", 1.2);
const SCENARIO_DECREASE: (&str, f64) = ("-20% therapy", 0.8);

/// Assembles forecast, plateau assessment, and what-if scenarios into one
/// report.
///
/// All sub-computations run over the same input snapshot; if the
/// minimum-length precondition fails, the whole run fails and no partial
/// report is produced.
pub struct DtfeEngine {
    forecast: ForecastEngine,
}

impl DtfeEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: DtfeConfig) -> Self {
        Self {
            forecast: ForecastEngine::new(config),
        }
    }

    /// Run the full DTFE analysis pipeline over a progress series.
    pub fn run(&self, series: &[ProgressPoint]) -> Result<DtfeReport> {
        let forecast = self.forecast.forecast_progress(series)?;
        let plateau_analysis = self.forecast.detect_plateau_risk(series)?;

        let mut what_if = BTreeMap::new();
        for (label, multiplier) in [SCENARIO_INCREASE, SCENARIO_DECREASE] {
            what_if.insert(
                label.to_string(),
                self.forecast.simulate_therapy_adjustment(series, multiplier)?,
            );
        }

        tracing::debug!(
            points = series.len(),
            plateau_risk = plateau_analysis.plateau_risk,
            "assembled DTFE report"
        );

        Ok(DtfeReport {
            forecast,
            plateau_analysis,
            what_if,
            clinical_note: "DTFE outputs are advisory and must be reviewed by a \
                            qualified clinician before any changes."
                .into(),
        })
    }
}

impl Default for DtfeEngine {
    fn default() -> Self {
        Self::new(DtfeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtfe_core::EngineError;

    fn series(pairs: &[(u32, f64)]) -> Vec<ProgressPoint> {
        pairs.iter().map(|&(w, s)| ProgressPoint::new(w, s)).collect()
    }

    #[test]
    fn test_report_assembled_at_minimum_length() {
        let s = series(&[(1, 20.0), (2, 25.0), (3, 30.0), (4, 35.0)]);
        let report = DtfeEngine::default().run(&s).unwrap();

        assert_eq!(report.forecast.forecast_weeks, 8);
        let labels: Vec<&str> = report.what_if.keys().map(String::as_str).collect();
        assert_eq!(labels, ["+20% therapy", "-20% therapy"]);
        assert!(report.clinical_note.contains("advisory"));
    }

    #[test]
    fn test_report_fails_atomically_below_minimum() {
        let s = series(&[(1, 20.0), (2, 25.0), (3, 30.0)]);
        assert!(matches!(
            DtfeEngine::default().run(&s),
            Err(EngineError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_scenarios_scale_in_opposite_directions() {
        let s = series(&[(1, 20.0), (2, 25.0), (3, 30.0), (4, 35.0)]);
        let report = DtfeEngine::default().run(&s).unwrap();

        let increased = &report.what_if["+20% therapy"];
        let decreased = &report.what_if["-20% therapy"];
        assert_eq!(increased.intensity_multiplier, 1.2);
        assert_eq!(decreased.intensity_multiplier, 0.8);
        for i in 0..report.forecast.mean_forecast.len() {
            let mean = report.forecast.mean_forecast[i];
            assert!(increased.adjusted_forecast[i] >= mean);
            assert!(decreased.adjusted_forecast[i] <= mean);
        }
    }

    #[test]
    fn test_plateau_case_flagged_throughout() {
        let s = series(&[(1, 60.0), (2, 60.0), (3, 60.0), (4, 60.0)]);
        let report = DtfeEngine::default().run(&s).unwrap();
        assert!(report.plateau_analysis.plateau_risk);
        assert_eq!(report.plateau_analysis.trend_slope, 0.0);
        // Flat history forecasts flat.
        assert!(report.forecast.mean_forecast.iter().all(|&v| v == 60.0));
    }

    #[test]
    fn test_report_serializes_with_contract_field_names() {
        let s = series(&[(1, 20.0), (2, 25.0), (3, 30.0), (4, 35.0)]);
        let report = DtfeEngine::default().run(&s).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["forecast"]["mean_forecast"].is_array());
        assert!(json["forecast"]["confidence_interval"]["lower"].is_array());
        assert!(json["plateau_analysis"]["plateau_risk"].is_boolean());
        assert!(json["what_if"]["+20% therapy"]["adjusted_forecast"].is_array());
        assert!(json["clinical_note"].is_string());

        // Numeric fields round-trip through JSON unchanged.
        let back: DtfeReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}
