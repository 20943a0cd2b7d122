use async_trait::async_trait;
use thiserror::Error;

use crate::model::MatchObservation;
use crate::stats::{FormQuery, TeamId};

/// Failure modes of a single provider call. `NotFound` is a first-class
/// outcome, not a transport fault: the pipeline reports the team as
/// unavailable instead of fabricating data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("team not found")]
    NotFound,
    #[error("provider returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Trait that every team-form provider must implement.
#[async_trait]
pub trait FormProvider: Send + Sync {
    /// Return the team's recent match observations, newest first.
    async fn fetch_form(
        &self,
        team: &TeamId,
        query: &FormQuery,
    ) -> Result<Vec<MatchObservation>, FetchError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
