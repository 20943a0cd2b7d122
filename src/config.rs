use clap::{Parser, Subcommand};

use crate::model::Scoreline;
use crate::pipeline::ModelParams;
use crate::stats::Venue;

/// Football match forecaster: Poisson scoreline predictions from recent team form
#[derive(Parser, Debug, Clone)]
#[command(name = "matchcast", version, about)]
pub struct Config {
    /// SQLite database path for the feedback log
    #[arg(long, env = "DATABASE_PATH", default_value = "forecasts.db")]
    pub database_path: String,

    /// Base URL of the team statistics API
    #[arg(
        long,
        env = "STATS_API_URL",
        default_value = "https://api.sofascore.com/api/v1"
    )]
    pub stats_api_url: String,

    /// Timeout for a single stats fetch, in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value = "10")]
    pub fetch_timeout_secs: u64,

    /// Goal cap per team for the scoreline grid
    #[arg(long, env = "MAX_GOALS", default_value = "5")]
    pub max_goals: u32,

    /// Number of scorelines to rank
    #[arg(long, env = "TOP_K", default_value = "3")]
    pub top_k: usize,

    /// xG-difference threshold for calling a winner (below it: draw)
    #[arg(long, env = "OUTCOME_MARGIN", default_value = "0.3")]
    pub outcome_margin: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Forecast a fixture from both teams' recent form
    Predict {
        /// Home team name
        home: String,
        /// Away team name
        away: String,
        /// Restrict the lookup to one season (year)
        #[arg(long)]
        season: Option<u16>,
        /// Restrict the lookup to one venue split
        #[arg(long, value_enum)]
        venue: Option<Venue>,
        /// How many recent matches to aggregate
        #[arg(long, default_value = "38")]
        last: usize,
        /// Use the built-in demo fixtures instead of the stats API
        #[arg(long, default_value = "false")]
        offline: bool,
    },
    /// Log a prediction against the actual final score
    Record {
        /// Home team name
        home: String,
        /// Away team name
        away: String,
        /// Predicted top scoreline, e.g. 2:1
        #[arg(long)]
        predicted: Scoreline,
        /// Actual final score, e.g. 1:1
        #[arg(long)]
        actual: Scoreline,
    },
    /// Show running prediction accuracy
    Accuracy,
    /// Show recent feedback records
    History {
        /// Maximum number of records to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.top_k == 0 {
            anyhow::bail!("top_k must be at least 1");
        }
        if self.max_goals > 15 {
            anyhow::bail!("max_goals above 15 adds nothing but grid cells");
        }
        if !self.outcome_margin.is_finite() || self.outcome_margin < 0.0 {
            anyhow::bail!("outcome_margin must be a non-negative number");
        }
        if self.fetch_timeout_secs == 0 {
            anyhow::bail!("fetch_timeout_secs must be positive");
        }
        if self.stats_api_url.trim().is_empty() {
            anyhow::bail!("stats_api_url must not be empty");
        }
        Ok(())
    }

    pub fn model_params(&self) -> ModelParams {
        ModelParams {
            max_goals: self.max_goals,
            top_k: self.top_k,
            outcome_margin: self.outcome_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(command: Command) -> Config {
        Config {
            database_path: "forecasts.db".into(),
            stats_api_url: "https://api.example.com".into(),
            fetch_timeout_secs: 10,
            max_goals: 5,
            top_k: 3,
            outcome_margin: 0.3,
            command,
        }
    }

    #[test]
    fn default_configuration_validates() {
        assert!(base_config(Command::Accuracy).validate().is_ok());
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let mut config = base_config(Command::Accuracy);
        config.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_margin_is_rejected() {
        let mut config = base_config(Command::Accuracy);
        config.outcome_margin = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn record_subcommand_parses_scorelines() {
        let config = Config::parse_from([
            "matchcast", "record", "Liverpool", "Man City", "--predicted", "2:1", "--actual",
            "1:1",
        ]);
        match config.command {
            Command::Record {
                predicted, actual, ..
            } => {
                assert_eq!(predicted, Scoreline::new(2, 1));
                assert_eq!(actual, Scoreline::new(1, 1));
            }
            other => panic!("expected record, got {other:?}"),
        }
    }
}
