//! Weekly progress observations.

use serde::{Deserialize, Serialize};
use crate::score::clamp_score;
use crate::Time;

/// One clinician-logged weekly observation.
///
/// Ordering is by `week` ascending; weeks need not be contiguous but must
/// be strictly increasing within a series handed to the engine. Immutable
/// once stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    /// Week number, starting at 1
    pub week: u32,

    /// Progress score, bounded to [0, 100]
    pub score: f64,
}

impl ProgressPoint {
    /// Create a point with the score normalized into the [0, 100] range.
    pub fn new(week: u32, score: f64) -> Self {
        Self {
            week,
            score: clamp_score(score),
        }
    }
}

/// A stored progress log entry: an observation plus its clinical context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Week number, starting at 1
    pub week: u32,

    /// Raw progress score as logged
    pub score: f64,

    /// Free-text clinician notes
    pub notes: String,

    /// When the entry was logged
    pub logged_at: Time,
}

impl ProgressEntry {
    /// Convert to a normalized engine observation.
    pub fn to_point(&self) -> ProgressPoint {
        ProgressPoint::new(self.week, self.score)
    }
}
