//! One full forecast: fetch both teams' form, aggregate, predict, classify.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::error::ForecastError;
use crate::model::{
    aggregate, build_report, classify, predict_top_scorelines, ComparisonReport, MatchOutcome,
    ScorelineProbability, TeamSummary,
};
use crate::stats::{fetch_team_form, FormProvider, FormQuery, TeamId};

/// Model knobs shared by every forecast.
#[derive(Debug, Clone, Copy)]
pub struct ModelParams {
    /// Goal cap per team for the scoreline grid.
    pub max_goals: u32,
    /// How many scorelines to rank.
    pub top_k: usize,
    /// xG-difference threshold for calling a winner.
    pub outcome_margin: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        ModelParams {
            max_goals: 5,
            top_k: 3,
            outcome_margin: 0.3,
        }
    }
}

/// Everything the caller displays for one fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchForecast {
    pub home_team: String,
    pub away_team: String,
    pub home_summary: TeamSummary,
    pub away_summary: TeamSummary,
    pub report: ComparisonReport,
    pub top_scorelines: Vec<ScorelineProbability>,
    pub outcome: MatchOutcome,
}

impl MatchForecast {
    /// The model's single best scoreline. The predictor always returns at
    /// least one cell for a valid grid.
    pub fn top_scoreline(&self) -> ScorelineProbability {
        self.top_scorelines[0]
    }
}

/// Run the whole prediction pipeline for one fixture.
///
/// The two provider calls run concurrently, each with its own timeout and
/// bounded retry. A team with no data fails the forecast with
/// `DataUnavailable`; nothing is fabricated in its place.
pub async fn forecast(
    provider: &dyn FormProvider,
    home: &TeamId,
    away: &TeamId,
    query: &FormQuery,
    params: &ModelParams,
    fetch_timeout: Duration,
) -> Result<MatchForecast, ForecastError> {
    let (home_form, away_form) = tokio::try_join!(
        fetch_team_form(provider, home, query, fetch_timeout),
        fetch_team_form(provider, away, query, fetch_timeout),
    )?;

    let home_summary = aggregate(&home_form)?;
    let away_summary = aggregate(&away_form)?;
    info!(
        "Aggregated {} vs {}: xG {:.2} vs {:.2} over {}/{} matches",
        home, away, home_summary.avg_xg, away_summary.avg_xg,
        home_summary.sample_size, away_summary.sample_size
    );

    let top_scorelines = predict_top_scorelines(
        home_summary.avg_xg,
        away_summary.avg_xg,
        params.max_goals,
        params.top_k,
    )?;
    let outcome = classify(
        home_summary.avg_xg,
        away_summary.avg_xg,
        params.outcome_margin,
    );
    let report = build_report(&home_summary, &away_summary);

    Ok(MatchForecast {
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_summary,
        away_summary,
        report,
        top_scorelines,
        outcome,
    })
}
