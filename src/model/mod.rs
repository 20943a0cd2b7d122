pub mod aggregate;
pub mod outcome;
pub mod report;
pub mod scoreline;

pub use aggregate::aggregate;
pub use outcome::{classify, MatchOutcome};
pub use report::{build_report, ComparisonReport};
pub use scoreline::{predict_top_scorelines, ScorelineProbability};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One historical match's raw signals for a single team, as returned by the
/// stats provider. Consumed by aggregation; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchObservation {
    pub shots: u32,
    pub shots_on_target: u32,
    pub corners: u32,
    pub cards: u32,
    pub both_teams_scored: bool,
    pub over_2_5: bool,
    /// Expected goals for this team in this match (non-negative).
    pub xg: f64,
}

/// Aggregate of a team's recent match observations.
///
/// Counts are rounded to one decimal place, xG to two, and the two
/// flag-derived probabilities to whole percentages, matching what the
/// report displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub avg_shots: f64,
    pub avg_shots_on_target: f64,
    pub avg_corners: f64,
    pub avg_cards: f64,
    /// Both-teams-to-score rate in percent (0–100).
    pub btts_pct: u8,
    /// Over-2.5-goals rate in percent (0–100).
    pub over25_pct: u8,
    pub avg_xg: f64,
    /// How many matches the averages were computed over.
    pub sample_size: usize,
}

/// An exact final score, home goals first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoreline {
    pub home: u32,
    pub away: u32,
}

impl Scoreline {
    pub fn new(home: u32, away: u32) -> Self {
        Scoreline { home, away }
    }
}

impl fmt::Display for Scoreline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

impl FromStr for Scoreline {
    type Err = String;

    /// Parses `"2:1"` (also accepts `"2-1"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, a) = s
            .split_once(':')
            .or_else(|| s.split_once('-'))
            .ok_or_else(|| format!("expected H:A, got '{s}'"))?;
        let home = h
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("bad home goals in '{s}'"))?;
        let away = a
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("bad away goals in '{s}'"))?;
        Ok(Scoreline { home, away })
    }
}
