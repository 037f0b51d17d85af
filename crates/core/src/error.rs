//! Engine error taxonomy.

/// Result type for engine computations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors reported by the forecasting engine.
///
/// These are deterministic input-validation failures, never transient:
/// the engine reports them synchronously and never retries or substitutes
/// a default result.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Series shorter than the operation's minimum length, or a
    /// degenerate fit (all week values identical)
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A caller-supplied parameter violates a documented precondition
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
