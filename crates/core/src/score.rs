//! Score-range primitives.
//!
//! Progress scores are semantically bounded to `[0, 100]`. Every derived
//! value is re-clamped to this range before being reported or stored.

/// Lower bound of the progress score range.
pub const SCORE_MIN: f64 = 0.0;

/// Upper bound of the progress score range.
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a score to the `[0, 100]` range.
///
/// Upstream data may arrive out of range; this is applied to every raw
/// score before computation and to every derived value before reporting.
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}

/// Round to 2 decimal places (forecast means, bounds, adjusted values).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 3 decimal places (slopes and probabilities).
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(105.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
        assert_eq!(clamp_score(0.0), 0.0);
        assert_eq!(clamp_score(100.0), 100.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(99.996), 100.0);
        assert_eq!(round3(0.12342), 0.123);
        assert_eq!(round3(-0.4006), -0.401);
    }
}
