//! Coarse 1X2 classification from the two goal rates.

use std::fmt;

use serde::Serialize;

/// Three-way match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::HomeWin => write!(f, "1 (home win)"),
            MatchOutcome::Draw => write!(f, "X (draw)"),
            MatchOutcome::AwayWin => write!(f, "2 (away win)"),
        }
    }
}

/// Classify the expected result from the two goal rates.
///
/// Home win when the home rate exceeds the away rate by more than `margin`,
/// away win in the mirrored case, draw otherwise. A difference of exactly
/// `margin` is a draw.
pub fn classify(lambda_home: f64, lambda_away: f64, margin: f64) -> MatchOutcome {
    if lambda_home - lambda_away > margin {
        MatchOutcome::HomeWin
    } else if lambda_away - lambda_home > margin {
        MatchOutcome::AwayWin
    } else {
        MatchOutcome::Draw
    }
}
