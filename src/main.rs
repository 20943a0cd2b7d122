use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

mod config;
mod db;
mod error;
mod model;
mod pipeline;
mod stats;

use config::{Command, Config};
use db::FeedbackStore;
use error::ForecastError;
use model::Scoreline;
use pipeline::{forecast, MatchForecast};
use stats::{FixedFormProvider, FormProvider, FormQuery, SofascoreApi, TeamId, Venue};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    match config.command.clone() {
        Command::Predict {
            home,
            away,
            season,
            venue,
            last,
            offline,
        } => run_predict(&config, &home, &away, season, venue, last, offline).await,
        Command::Record {
            home,
            away,
            predicted,
            actual,
        } => run_record(&config, &home, &away, predicted, actual),
        Command::Accuracy => run_accuracy(&config),
        Command::History { limit } => run_history(&config, limit),
    }
}

async fn run_predict(
    config: &Config,
    home: &str,
    away: &str,
    season: Option<u16>,
    venue: Option<Venue>,
    last: usize,
    offline: bool,
) -> Result<()> {
    let home = TeamId::new(home)?;
    let away = TeamId::new(away)?;
    let query = FormQuery {
        season,
        venue,
        last_n: last,
    };
    let fetch_timeout = Duration::from_secs(config.fetch_timeout_secs);

    let provider: Box<dyn FormProvider> = if offline {
        Box::new(FixedFormProvider::demo())
    } else {
        Box::new(SofascoreApi::new(&config.stats_api_url, fetch_timeout)?)
    };
    info!("Using stats provider '{}'", provider.name());

    let fc = forecast(
        provider.as_ref(),
        &home,
        &away,
        &query,
        &config.model_params(),
        fetch_timeout,
    )
    .await?;

    print_forecast(&fc);
    Ok(())
}

fn print_forecast(fc: &MatchForecast) {
    let report = &fc.report;
    println!("{} vs {}", fc.home_team, fc.away_team);
    println!(
        "  shots            {:>5.1} vs {:<5.1}",
        report.home.avg_shots, report.away.avg_shots
    );
    println!(
        "  on target        {:>5.1} vs {:<5.1}",
        report.home.avg_shots_on_target, report.away.avg_shots_on_target
    );
    println!(
        "  corners          {:>5.1} vs {:<5.1}",
        report.home.avg_corners, report.away.avg_corners
    );
    println!(
        "  cards            {:>5.1} vs {:<5.1}",
        report.home.avg_cards, report.away.avg_cards
    );
    println!("  both teams score {:>4}%", report.combined_btts_pct);
    println!("  over 2.5 goals   {:>4}%", report.combined_over25_pct);
    println!(
        "  xG               {:>5.2} vs {:<5.2}",
        report.home.avg_xg, report.away.avg_xg
    );
    println!();
    println!("Most likely scorelines:");
    for cell in &fc.top_scorelines {
        println!("  {}  ({:.2}%)", cell.scoreline, cell.probability);
    }
    println!();
    let best = fc.top_scoreline();
    println!(
        "Verdict: {} -- most likely score {}",
        fc.outcome, best.scoreline
    );
    println!(
        "(based on {} / {} recent matches)",
        fc.home_summary.sample_size, fc.away_summary.sample_size
    );
}

fn run_record(
    config: &Config,
    home: &str,
    away: &str,
    predicted: Scoreline,
    actual: Scoreline,
) -> Result<()> {
    let store = FeedbackStore::open(&config.database_path)?;
    let record = store.record(home, away, predicted, actual)?;
    info!("Feedback stored: {}", config.database_path);

    println!(
        "{} vs {}: predicted {}, actual {} -> {}",
        record.home_team,
        record.away_team,
        record.predicted,
        record.actual,
        if record.correct { "HIT" } else { "MISS" }
    );

    // A freshly written record implies accuracy is computable.
    match store.accuracy() {
        Ok(acc) => println!(
            "Running accuracy: {}/{} ({:.1}%)",
            acc.correct,
            acc.total,
            acc.hit_rate()
        ),
        Err(e) => warn!("Could not read back accuracy: {}", e),
    }
    Ok(())
}

fn run_accuracy(config: &Config) -> Result<()> {
    let store = FeedbackStore::open(&config.database_path)?;
    match store.accuracy() {
        Ok(acc) => {
            println!(
                "Exact-scoreline accuracy: {}/{} ({:.1}%)",
                acc.correct,
                acc.total,
                acc.hit_rate()
            );
            Ok(())
        }
        Err(ForecastError::NoData) => {
            println!("No predictions recorded yet.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_history(config: &Config, limit: i64) -> Result<()> {
    let store = FeedbackStore::open(&config.database_path)?;
    let records = store.list_recent(limit)?;
    if records.is_empty() {
        println!("No predictions recorded yet.");
        return Ok(());
    }
    for r in records {
        println!(
            "{}  {} vs {}: predicted {}, actual {} -> {}",
            r.recorded_at.format("%Y-%m-%d %H:%M"),
            r.home_team,
            r.away_team,
            r.predicted,
            r.actual,
            if r.correct { "HIT" } else { "MISS" }
        );
    }
    Ok(())
}
