//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Explicit configuration handed to the engine at construction.
///
/// The windowed analyzer threshold and the whole-history forecast
/// threshold guard similar plateau judgments at different sensitivities;
/// they are kept as independent knobs rather than unified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DtfeConfig {
    /// Minimum number of observed weeks required for forecasting
    pub min_weeks_for_forecast: usize,

    /// Plateau slope threshold for windowed trend classification
    /// (score-units per week)
    pub plateau_slope_threshold: f64,

    /// Plateau slope threshold for the whole-history forecast check
    pub forecast_plateau_threshold: f64,

    /// Default forecast horizon in weeks
    pub forecast_horizon: u32,

    /// Confidence band multiplier (1.96 ~ 95%)
    pub confidence_multiplier: f64,

    /// Residual standard deviation substituted when fewer than 2
    /// residuals are available
    pub fallback_residual_std: f64,
}

impl Default for DtfeConfig {
    fn default() -> Self {
        Self {
            min_weeks_for_forecast: 4,
            plateau_slope_threshold: 0.4,
            forecast_plateau_threshold: 0.5,
            forecast_horizon: 8,
            confidence_multiplier: 1.96,
            fallback_residual_std: 2.0,
        }
    }
}
