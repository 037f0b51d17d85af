//! Trend classification and stagnation alerting.

use dtfe_core::{
    DtfeConfig, EngineError, ProgressPoint, Result, TrendDirection, TrendResult, round3,
};

use crate::fit::LinearFit;

/// Number of most-recent points evaluated by the attention check.
const ATTENTION_WINDOW: usize = 4;

/// Classifies the direction of a progress series and flags when clinician
/// attention is warranted.
///
/// The attention check deliberately looks at a short recency window so
/// that an early plateau or regression is not masked by historical gains.
pub struct TrendAnalyzer {
    config: DtfeConfig,
}

impl TrendAnalyzer {
    /// Create an analyzer with the given configuration.
    pub fn new(config: DtfeConfig) -> Self {
        Self { config }
    }

    /// Classify the trend direction of a progress series.
    ///
    /// Requires at least 2 points, else fails with
    /// [`EngineError::InsufficientData`]. Scores are re-clamped to
    /// `[0, 100]` before fitting. The slope is compared against the
    /// configured plateau threshold: above it is improving, below its
    /// negation is regressing, anything in between is a plateau.
    pub fn compute_trend(&self, series: &[ProgressPoint]) -> Result<TrendResult> {
        if series.len() < 2 {
            return Err(EngineError::InsufficientData(
                "at least two progress points are required for trend analysis".into(),
            ));
        }

        let normalized: Vec<ProgressPoint> = series
            .iter()
            .map(|p| ProgressPoint::new(p.week, p.score))
            .collect();

        let fit = LinearFit::fit(&normalized, self.config.fallback_residual_std)?;

        let threshold = self.config.plateau_slope_threshold;
        let direction = if fit.slope > threshold {
            TrendDirection::Improving
        } else if fit.slope < -threshold {
            TrendDirection::Regressing
        } else {
            TrendDirection::Plateau
        };

        tracing::debug!(slope = fit.slope, ?direction, "classified trend");

        Ok(TrendResult {
            slope: round3(fit.slope),
            direction,
            plateau_risk: direction == TrendDirection::Plateau,
        })
    }

    /// Decide whether clinician review is recommended.
    ///
    /// Returns `Ok(false)` for fewer than 4 points: too early to judge,
    /// a policy decision rather than an error. Otherwise classifies only
    /// the most recent 4 points and recommends review iff that windowed
    /// trend is a plateau or a regression.
    pub fn needs_attention(&self, series: &[ProgressPoint]) -> Result<bool> {
        if series.len() < ATTENTION_WINDOW {
            return Ok(false);
        }

        let window = &series[series.len() - ATTENTION_WINDOW..];
        let trend = self.compute_trend(window)?;
        Ok(trend.plateau_risk || trend.direction == TrendDirection::Regressing)
    }
}
