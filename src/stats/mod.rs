pub mod fixed;
pub mod provider;
pub mod sofascore;

pub use fixed::FixedFormProvider;
pub use provider::{FetchError, FormProvider};
pub use sofascore::SofascoreApi;

use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ForecastError;
use crate::model::MatchObservation;

/// Validated team identifier, resolved once at the provider boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(String);

impl TeamId {
    /// Accepts a trimmed, non-empty name of at most 64 characters.
    pub fn new(raw: &str) -> Result<Self, ForecastError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "team name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > 64 {
            return Err(ForecastError::InvalidParameter(format!(
                "team name too long: '{name}'"
            )));
        }
        Ok(TeamId(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL-slug view used by REST providers ("Man City" -> "man-city").
    pub fn slug(&self) -> String {
        self.0
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the fixture a team played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Venue {
    Home,
    Away,
}

/// Scope of a form lookup: optional season and venue split, and the number
/// of recent matches requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormQuery {
    pub season: Option<u16>,
    pub venue: Option<Venue>,
    pub last_n: usize,
}

impl Default for FormQuery {
    fn default() -> Self {
        // Roughly one season of matches.
        FormQuery {
            season: None,
            venue: None,
            last_n: 38,
        }
    }
}

/// Fetch a team's recent form with a hard timeout and at most one retry.
///
/// Transport failures and timeouts are retried once after a short jittered
/// pause; `NotFound` and a second failure surface as
/// [`ForecastError::DataUnavailable`]. No placeholder data is ever
/// substituted for a failed fetch.
pub async fn fetch_team_form(
    provider: &dyn FormProvider,
    team: &TeamId,
    query: &FormQuery,
    timeout: Duration,
) -> Result<Vec<MatchObservation>, ForecastError> {
    for attempt in 0..2 {
        if attempt > 0 {
            let jitter_ms = rand::thread_rng().gen_range(100..300);
            tokio::time::sleep(Duration::from_millis(jitter_ms)).await;
            debug!("Retrying '{}' fetch for {}", provider.name(), team);
        }

        match tokio::time::timeout(timeout, provider.fetch_form(team, query)).await {
            Ok(Ok(observations)) => {
                debug!(
                    "Provider '{}' returned {} observations for {}",
                    provider.name(),
                    observations.len(),
                    team
                );
                return Ok(observations);
            }
            Ok(Err(FetchError::NotFound)) => {
                warn!("Provider '{}' has no data for {}", provider.name(), team);
                return Err(ForecastError::DataUnavailable {
                    team: team.to_string(),
                });
            }
            Ok(Err(e)) => {
                warn!(
                    "Provider '{}' failed for {} (attempt {}): {}",
                    provider.name(),
                    team,
                    attempt + 1,
                    e
                );
            }
            Err(_) => {
                warn!(
                    "Provider '{}' timed out after {:?} for {} (attempt {})",
                    provider.name(),
                    timeout,
                    team,
                    attempt + 1
                );
            }
        }
    }

    Err(ForecastError::DataUnavailable {
        team: team.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn team_id_trims_and_validates() {
        let id = TeamId::new("  Man City ").unwrap();
        assert_eq!(id.as_str(), "Man City");
        assert_eq!(id.slug(), "man-city");
        assert!(TeamId::new("   ").is_err());
        assert!(TeamId::new(&"x".repeat(65)).is_err());
    }

    struct FlakyProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FormProvider for FlakyProvider {
        async fn fetch_form(
            &self,
            _team: &TeamId,
            _query: &FormQuery,
        ) -> Result<Vec<MatchObservation>, FetchError> {
            // Hang forever on the first call, then never get called again:
            // the orchestrator must give up after one retry.
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }

        fn name(&self) -> &str {
            "Flaky"
        }
    }

    #[tokio::test]
    async fn timeout_is_retried_once_then_surfaced() {
        let provider = FlakyProvider {
            calls: AtomicUsize::new(0),
        };
        let team = TeamId::new("Liverpool").unwrap();
        let res = fetch_team_form(
            &provider,
            &team,
            &FormQuery::default(),
            Duration::from_millis(20),
        )
        .await;
        assert!(matches!(res, Err(ForecastError::DataUnavailable { .. })));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    struct MissingProvider;

    #[async_trait]
    impl FormProvider for MissingProvider {
        async fn fetch_form(
            &self,
            _team: &TeamId,
            _query: &FormQuery,
        ) -> Result<Vec<MatchObservation>, FetchError> {
            Err(FetchError::NotFound)
        }

        fn name(&self) -> &str {
            "Missing"
        }
    }

    #[tokio::test]
    async fn not_found_is_not_retried() {
        let team = TeamId::new("Nowhere FC").unwrap();
        let res = fetch_team_form(
            &MissingProvider,
            &team,
            &FormQuery::default(),
            Duration::from_secs(1),
        )
        .await;
        match res {
            Err(ForecastError::DataUnavailable { team }) => assert_eq!(team, "Nowhere FC"),
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }
}
