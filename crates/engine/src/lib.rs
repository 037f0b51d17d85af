//! Developmental Trajectory Forecasting Engine (DTFE).
//!
//! Longitudinal trend analysis and short-horizon probabilistic forecasting
//! over weekly clinical progress observations:
//!
//! - directional trend classification with plateau/regression alerting
//! - linear-extrapolation forecasts with residual-based uncertainty bounds
//! - plateau risk assessment over the full history
//! - what-if simulations of changed therapy intensity
//!
//! Every operation is a pure function of its input series and an explicit
//! [`DtfeConfig`](dtfe_core::DtfeConfig); nothing here holds state across
//! calls or touches storage. Outputs are advisory and require clinician
//! interpretation.

#![warn(missing_docs)]

pub mod fit;
pub mod trend;
pub mod forecast;
pub mod report;

pub use fit::LinearFit;
pub use trend::TrendAnalyzer;
pub use forecast::ForecastEngine;
pub use report::DtfeEngine;
