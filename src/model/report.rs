//! Side-by-side comparison of two team summaries.

use serde::Serialize;

use crate::model::TeamSummary;

/// Display-ready comparison of the two teams' aggregates, plus the combined
/// match-level BTTS and over-2.5 probabilities (mean of both teams' rates).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub home: TeamSummary,
    pub away: TeamSummary,
    pub combined_btts_pct: u8,
    pub combined_over25_pct: u8,
}

/// Assemble the comparison report. Pure data assembly, no failure modes.
pub fn build_report(home: &TeamSummary, away: &TeamSummary) -> ComparisonReport {
    ComparisonReport {
        combined_btts_pct: mean_pct(home.btts_pct, away.btts_pct),
        combined_over25_pct: mean_pct(home.over25_pct, away.over25_pct),
        home: home.clone(),
        away: away.clone(),
    }
}

fn mean_pct(a: u8, b: u8) -> u8 {
    ((a as f64 + b as f64) / 2.0).round() as u8
}
