//! Forecast projection, plateau risk, and what-if simulation.

use dtfe_core::{
    ConfidenceInterval, DtfeConfig, EngineError, ForecastResult, PlateauAssessment,
    ProgressPoint, Result, SimulationResult, clamp_score, round2, round3,
};

use crate::fit::LinearFit;

/// Projects future scores with uncertainty bounds, assesses plateau risk
/// over the full history, and simulates therapy intensity changes.
///
/// Unlike [`TrendAnalyzer`](crate::TrendAnalyzer), every operation here
/// fits over the entire series, never a recency window.
pub struct ForecastEngine {
    config: DtfeConfig,
}

impl ForecastEngine {
    /// Create a forecast engine with the given configuration.
    pub fn new(config: DtfeConfig) -> Self {
        Self { config }
    }

    /// Forecast future progress over the configured default horizon.
    pub fn forecast_progress(&self, series: &[ProgressPoint]) -> Result<ForecastResult> {
        self.forecast_with_horizon(series, self.config.forecast_horizon)
    }

    /// Forecast future progress over an explicit horizon.
    ///
    /// Fits a line over the whole series and projects `horizon` weeks
    /// beyond the last observed week. The mean projection and both bounds
    /// of the 95% band are clamped to `[0, 100]` independently, so the
    /// band may collapse toward the mean near the range edges; that
    /// asymmetry is intentional.
    pub fn forecast_with_horizon(
        &self,
        series: &[ProgressPoint],
        horizon: u32,
    ) -> Result<ForecastResult> {
        self.require_min_weeks(series, "forecasting")?;

        let normalized = normalize(series);
        let fit = LinearFit::fit(&normalized, self.config.fallback_residual_std)?;

        let last_week = normalized[normalized.len() - 1].week;
        let band = self.config.confidence_multiplier * fit.residual_std;

        let mut mean_forecast = Vec::with_capacity(horizon as usize);
        let mut lower = Vec::with_capacity(horizon as usize);
        let mut upper = Vec::with_capacity(horizon as usize);
        for offset in 1..=horizon {
            let mean = fit.predict(last_week + offset);
            mean_forecast.push(round2(clamp_score(mean)));
            lower.push(round2(clamp_score(mean - band)));
            upper.push(round2(clamp_score(mean + band)));
        }

        tracing::debug!(
            slope = fit.slope,
            horizon,
            last_week,
            "projected forecast"
        );

        Ok(ForecastResult {
            forecast_weeks: horizon,
            trend_slope: round3(fit.slope),
            mean_forecast,
            confidence_interval: ConfidenceInterval { lower, upper },
            interpretation: "Forecast represents probabilistic trajectory guidance \
                             based on recent progress trends."
                .into(),
        })
    }

    /// Assess the risk of a developmental plateau over the full history.
    ///
    /// Flags plateau risk iff the whole-history slope falls below the
    /// configured forecast plateau threshold. This is a deliberately
    /// different judgment from the analyzer's windowed classification.
    pub fn detect_plateau_risk(&self, series: &[ProgressPoint]) -> Result<PlateauAssessment> {
        self.require_min_weeks(series, "plateau analysis")?;

        let normalized = normalize(series);
        let fit = LinearFit::fit(&normalized, self.config.fallback_residual_std)?;

        let plateau_risk = fit.slope < self.config.forecast_plateau_threshold;
        let message = if plateau_risk {
            "Potential plateau detected. Consider reviewing therapy intensity."
        } else {
            "Progress trend appears on track."
        };

        Ok(PlateauAssessment {
            plateau_risk,
            trend_slope: round3(fit.slope),
            message: message.into(),
        })
    }

    /// Simulate the effect of a proportional therapy intensity change.
    ///
    /// `multiplier > 1` increases therapy, `< 1` decreases it. The
    /// baseline mean forecast is rescaled proportionally without refitting
    /// the model; this is a coarse sensitivity analysis, not a predictive
    /// claim. Fails with [`EngineError::InvalidParameter`] unless the
    /// multiplier is positive.
    pub fn simulate_therapy_adjustment(
        &self,
        series: &[ProgressPoint],
        multiplier: f64,
    ) -> Result<SimulationResult> {
        if multiplier.is_nan() || multiplier <= 0.0 {
            return Err(EngineError::InvalidParameter(
                "intensity multiplier must be positive".into(),
            ));
        }

        let baseline = self.forecast_progress(series)?;

        let adjusted_forecast = baseline
            .mean_forecast
            .iter()
            .map(|&v| round2(clamp_score(v * multiplier)))
            .collect();

        Ok(SimulationResult {
            intensity_multiplier: multiplier,
            adjusted_forecast,
            interpretation: "Simulated outcome assuming proportional change in therapy \
                             intensity. Requires clinician judgment."
                .into(),
        })
    }

    fn require_min_weeks(&self, series: &[ProgressPoint], operation: &str) -> Result<()> {
        if series.len() < self.config.min_weeks_for_forecast {
            return Err(EngineError::InsufficientData(format!(
                "{operation} requires at least {} progress points, got {}",
                self.config.min_weeks_for_forecast,
                series.len()
            )));
        }
        Ok(())
    }
}

fn normalize(series: &[ProgressPoint]) -> Vec<ProgressPoint> {
    series
        .iter()
        .map(|p| ProgressPoint::new(p.week, p.score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ForecastEngine {
        ForecastEngine::new(DtfeConfig::default())
    }

    fn series(pairs: &[(u32, f64)]) -> Vec<ProgressPoint> {
        pairs.iter().map(|&(w, s)| ProgressPoint::new(w, s)).collect()
    }

    fn rising() -> Vec<ProgressPoint> {
        series(&[(1, 20.0), (2, 24.0), (3, 28.0), (4, 32.0)])
    }

    #[test]
    fn test_forecast_shape_and_bounds() {
        let forecast = engine().forecast_progress(&rising()).unwrap();
        assert_eq!(forecast.forecast_weeks, 8);
        assert_eq!(forecast.mean_forecast.len(), 8);
        assert_eq!(forecast.confidence_interval.lower.len(), 8);
        assert_eq!(forecast.confidence_interval.upper.len(), 8);
        for i in 0..8 {
            let mean = forecast.mean_forecast[i];
            assert!((0.0..=100.0).contains(&mean));
            assert!(forecast.confidence_interval.lower[i] <= mean);
            assert!(mean <= forecast.confidence_interval.upper[i]);
        }
    }

    #[test]
    fn test_forecast_extends_exact_line() {
        // Perfect fit: slope 4, intercept 16, zero residual spread, so
        // both bounds coincide with the mean.
        let forecast = engine().forecast_progress(&rising()).unwrap();
        assert_eq!(forecast.trend_slope, 4.0);
        assert_eq!(forecast.mean_forecast[0], 36.0);
        assert_eq!(forecast.mean_forecast[7], 64.0);
        assert_eq!(forecast.confidence_interval.lower, forecast.mean_forecast);
        assert_eq!(forecast.confidence_interval.upper, forecast.mean_forecast);
    }

    #[test]
    fn test_forecast_clamped_at_range_top() {
        let s = series(&[(1, 70.0), (2, 80.0), (3, 90.0), (4, 100.0)]);
        let forecast = engine().forecast_progress(&s).unwrap();
        // Slope 10/week saturates the range quickly; everything stays
        // within bounds and the band collapses at the ceiling.
        assert_eq!(*forecast.mean_forecast.last().unwrap(), 100.0);
        for i in 0..8 {
            assert!(forecast.confidence_interval.upper[i] <= 100.0);
            assert!(forecast.confidence_interval.lower[i] >= 0.0);
        }
    }

    #[test]
    fn test_forecast_requires_min_weeks() {
        let s = series(&[(1, 10.0), (2, 20.0), (3, 30.0)]);
        assert!(matches!(
            engine().forecast_progress(&s),
            Err(EngineError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_forecast_custom_horizon() {
        let forecast = engine().forecast_with_horizon(&rising(), 3).unwrap();
        assert_eq!(forecast.forecast_weeks, 3);
        assert_eq!(forecast.mean_forecast, vec![36.0, 40.0, 44.0]);
    }

    #[test]
    fn test_plateau_detected_on_flat_series() {
        let s = series(&[(1, 60.0), (2, 60.0), (3, 60.0), (4, 60.0)]);
        let assessment = engine().detect_plateau_risk(&s).unwrap();
        assert!(assessment.plateau_risk);
        assert_eq!(assessment.trend_slope, 0.0);
        assert!(assessment.message.contains("plateau"));
    }

    #[test]
    fn test_no_plateau_on_steady_gain() {
        let assessment = engine().detect_plateau_risk(&rising()).unwrap();
        assert!(!assessment.plateau_risk);
        assert_eq!(assessment.message, "Progress trend appears on track.");
    }

    #[test]
    fn test_plateau_threshold_is_whole_history() {
        // Slope 0.45 is a plateau for the 0.5 whole-history threshold
        // even though the windowed analyzer threshold (0.4) would call
        // the same slope improving.
        let s = series(&[(1, 50.0), (2, 50.45), (3, 50.9), (4, 51.35)]);
        let assessment = engine().detect_plateau_risk(&s).unwrap();
        assert!(assessment.plateau_risk);
    }

    #[test]
    fn test_simulation_identity() {
        let e = engine();
        let baseline = e.forecast_progress(&rising()).unwrap();
        let sim = e.simulate_therapy_adjustment(&rising(), 1.0).unwrap();
        assert_eq!(sim.adjusted_forecast, baseline.mean_forecast);
    }

    #[test]
    fn test_simulation_rescales_mean() {
        let e = engine();
        let baseline = e.forecast_progress(&rising()).unwrap();
        let sim = e.simulate_therapy_adjustment(&rising(), 1.2).unwrap();
        assert_eq!(sim.intensity_multiplier, 1.2);
        for (adjusted, mean) in sim.adjusted_forecast.iter().zip(&baseline.mean_forecast) {
            assert_eq!(*adjusted, round2((mean * 1.2).min(100.0)));
        }
    }

    #[test]
    fn test_simulation_rejects_nonpositive_multiplier() {
        let e = engine();
        assert!(matches!(
            e.simulate_therapy_adjustment(&rising(), 0.0),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            e.simulate_therapy_adjustment(&rising(), -1.2),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        let e = engine();
        let a = e.forecast_progress(&rising()).unwrap();
        let b = e.forecast_progress(&rising()).unwrap();
        assert_eq!(a, b);
    }
}
