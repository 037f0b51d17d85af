//! Ordinary least-squares line fitting.

use dtfe_core::{EngineError, ProgressPoint, Result};

/// A fitted line `score ≈ slope·week + intercept` with residual spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Weekly slope of the fitted line
    pub slope: f64,

    /// Intercept of the fitted line
    pub intercept: f64,

    /// Sample standard deviation of the fit residuals
    pub residual_std: f64,
}

impl LinearFit {
    /// Fit a line over `(week, score)` pairs via closed-form OLS.
    ///
    /// `fallback_std` is substituted for the residual standard deviation
    /// when fewer than 2 residuals are available, so tiny samples never
    /// produce a spuriously tight confidence band.
    ///
    /// Fails with [`EngineError::InsufficientData`] for fewer than 2
    /// points or when all week values are identical (zero variance in the
    /// independent variable).
    pub fn fit(series: &[ProgressPoint], fallback_std: f64) -> Result<Self> {
        if series.len() < 2 {
            return Err(EngineError::InsufficientData(
                "at least two progress points are required for a trend fit".into(),
            ));
        }

        let n = series.len() as f64;
        let mean_week = series.iter().map(|p| f64::from(p.week)).sum::<f64>() / n;
        let mean_score = series.iter().map(|p| p.score).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for p in series {
            let dx = f64::from(p.week) - mean_week;
            sxx += dx * dx;
            sxy += dx * (p.score - mean_score);
        }

        if sxx.abs() < 1e-10 {
            return Err(EngineError::InsufficientData(
                "all week values are identical; trend fit is degenerate".into(),
            ));
        }

        let slope = sxy / sxx;
        let intercept = mean_score - slope * mean_week;

        let residuals: Vec<f64> = series
            .iter()
            .map(|p| p.score - (slope * f64::from(p.week) + intercept))
            .collect();

        let residual_std = if residuals.len() >= 2 {
            let mean_residual = residuals.iter().sum::<f64>() / n;
            let ss = residuals
                .iter()
                .map(|r| (r - mean_residual) * (r - mean_residual))
                .sum::<f64>();
            (ss / (n - 1.0)).sqrt()
        } else {
            fallback_std
        };

        tracing::debug!(
            slope,
            intercept,
            residual_std,
            points = series.len(),
            "fitted linear trend"
        );

        Ok(Self {
            slope,
            intercept,
            residual_std,
        })
    }

    /// Value of the fitted line at a given week.
    pub fn predict(&self, week: u32) -> f64 {
        self.slope * f64::from(week) + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(u32, f64)]) -> Vec<ProgressPoint> {
        pairs.iter().map(|&(w, s)| ProgressPoint::new(w, s)).collect()
    }

    #[test]
    fn test_exact_line_recovered() {
        let s = series(&[(1, 12.0), (2, 14.0), (3, 16.0), (4, 18.0)]);
        let fit = LinearFit::fit(&s, 2.0).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 10.0).abs() < 1e-9);
        assert!(fit.residual_std.abs() < 1e-9);
    }

    #[test]
    fn test_noncontiguous_weeks() {
        // Weeks need not be contiguous, only strictly increasing.
        let s = series(&[(1, 10.0), (3, 20.0), (7, 40.0)]);
        let fit = LinearFit::fit(&s, 2.0).unwrap();
        assert!((fit.slope - 5.0).abs() < 1e-9);
        assert!((fit.intercept - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_residual_std_nonzero_for_noisy_series() {
        let s = series(&[(1, 10.0), (2, 15.0), (3, 12.0), (4, 20.0)]);
        let fit = LinearFit::fit(&s, 2.0).unwrap();
        assert!(fit.residual_std > 0.0);
    }

    #[test]
    fn test_flat_series_has_zero_slope() {
        let s = series(&[(1, 50.0), (2, 50.0), (3, 50.0), (4, 50.0)]);
        let fit = LinearFit::fit(&s, 2.0).unwrap();
        assert!(fit.slope.abs() < 1e-9);
        assert!((fit.intercept - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_points() {
        let s = series(&[(1, 10.0)]);
        assert!(matches!(
            LinearFit::fit(&s, 2.0),
            Err(EngineError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_identical_weeks_degenerate() {
        let s = series(&[(3, 10.0), (3, 20.0), (3, 30.0)]);
        assert!(matches!(
            LinearFit::fit(&s, 2.0),
            Err(EngineError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_predict() {
        let s = series(&[(1, 12.0), (2, 14.0), (3, 16.0)]);
        let fit = LinearFit::fit(&s, 2.0).unwrap();
        assert!((fit.predict(5) - 20.0).abs() < 1e-9);
    }
}
