//! Deterministic in-memory provider for tests and offline demos.

use std::collections::HashMap;

use async_trait::async_trait;

use super::provider::{FetchError, FormProvider};
use super::{FormQuery, TeamId};
use crate::model::MatchObservation;

/// Serves pre-loaded observation sequences keyed by team. Teams that were
/// never loaded get `NotFound`, exactly like a real provider. No randomness:
/// the forecast for a given fixture set is reproducible.
#[derive(Default)]
pub struct FixedFormProvider {
    forms: HashMap<TeamId, Vec<MatchObservation>>,
}

impl FixedFormProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, team: TeamId, observations: Vec<MatchObservation>) -> Self {
        self.forms.insert(team, observations);
        self
    }

    /// A small built-in fixture set for the `--offline` demo mode.
    pub fn demo() -> Self {
        let attack = |xg: f64, shots: u32| MatchObservation {
            shots,
            shots_on_target: shots / 3,
            corners: 6,
            cards: 2,
            both_teams_scored: xg > 1.5,
            over_2_5: xg > 1.8,
            xg,
        };

        let mut forms = HashMap::new();
        forms.insert(
            TeamId::new("Liverpool").expect("static name"),
            vec![
                attack(2.1, 18),
                attack(1.8, 15),
                attack(2.4, 19),
                attack(1.5, 12),
                attack(2.0, 16),
            ],
        );
        forms.insert(
            TeamId::new("Man City").expect("static name"),
            vec![
                attack(2.3, 17),
                attack(2.0, 16),
                attack(2.6, 20),
                attack(1.9, 14),
                attack(2.2, 18),
            ],
        );
        FixedFormProvider { forms }
    }
}

#[async_trait]
impl FormProvider for FixedFormProvider {
    async fn fetch_form(
        &self,
        team: &TeamId,
        query: &FormQuery,
    ) -> Result<Vec<MatchObservation>, FetchError> {
        let form = self.forms.get(team).ok_or(FetchError::NotFound)?;
        Ok(form.iter().take(query.last_n).cloned().collect())
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}
