use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::provider::{FetchError, FormProvider};
use super::{FormQuery, TeamId, Venue};
use crate::model::MatchObservation;

/// Team-form provider backed by a Sofascore-style statistics API.
///
/// The endpoint returns one JSON object per team with a `matches` array of
/// per-match statistics. Anything that does not match that schema is skipped
/// row by row rather than failing the whole fetch.
pub struct SofascoreApi {
    http: Client,
    /// Base URL for overriding in tests.
    base_url: String,
}

impl SofascoreApi {
    pub fn new(base_url: &str, request_timeout: std::time::Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(request_timeout).build()?;
        Ok(SofascoreApi {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn form_url(&self, team: &TeamId, query: &FormQuery) -> String {
        let mut url = format!(
            "{}/team/{}/form?last={}",
            self.base_url,
            team.slug(),
            query.last_n
        );
        if let Some(season) = query.season {
            url.push_str(&format!("&season={season}"));
        }
        match query.venue {
            Some(Venue::Home) => url.push_str("&venue=home"),
            Some(Venue::Away) => url.push_str("&venue=away"),
            None => {}
        }
        url
    }
}

#[async_trait]
impl FormProvider for SofascoreApi {
    fn name(&self) -> &str {
        "Sofascore"
    }

    async fn fetch_form(
        &self,
        team: &TeamId,
        query: &FormQuery,
    ) -> Result<Vec<MatchObservation>, FetchError> {
        let url = self.form_url(team, query);
        debug!("Fetching team form from {}", url);

        let resp = self.http.get(&url).send().await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }

        let raw: serde_json::Value = resp.json().await?;
        Ok(parse_form_response(&raw))
    }
}

fn parse_form_response(raw: &serde_json::Value) -> Vec<MatchObservation> {
    let matches = match raw["matches"].as_array() {
        Some(a) => a,
        None => return vec![],
    };

    matches
        .iter()
        .filter_map(|m| {
            let xg = m["xg"].as_f64()?;
            if !xg.is_finite() || xg < 0.0 {
                return None;
            }
            Some(MatchObservation {
                shots: m["shots"].as_u64()? as u32,
                shots_on_target: m["shotsOnTarget"].as_u64().unwrap_or(0) as u32,
                corners: m["corners"].as_u64()? as u32,
                cards: m["cards"].as_u64()? as u32,
                both_teams_scored: json_flag(&m["bothTeamsScored"])?,
                over_2_5: json_flag(&m["over25"])?,
                xg,
            })
        })
        .collect()
}

/// Providers encode flags inconsistently: as booleans or as 0/1 integers.
fn json_flag(v: &serde_json::Value) -> Option<bool> {
    v.as_bool().or_else(|| v.as_i64().map(|n| n != 0))
}
