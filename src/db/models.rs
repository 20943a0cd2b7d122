use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Scoreline;

/// One logged prediction with its eventual real-world result.
/// Append-only: records are never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Option<i64>,
    pub home_team: String,
    pub away_team: String,
    /// The model's top-ranked scoreline at prediction time.
    pub predicted: Scoreline,
    /// The actual final score.
    pub actual: Scoreline,
    /// Exact scoreline equality of predicted and actual.
    pub correct: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Running prediction accuracy over all feedback records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accuracy {
    pub correct: i64,
    pub total: i64,
}

impl Accuracy {
    /// Hit rate in percent. `total` is guaranteed nonzero by the store,
    /// which reports the empty state as `NoData` instead.
    pub fn hit_rate(&self) -> f64 {
        self.correct as f64 / self.total as f64 * 100.0
    }
}
