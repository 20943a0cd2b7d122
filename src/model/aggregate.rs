//! Reduction of a team's raw match observations into summary rates.

use crate::error::ForecastError;
use crate::model::{MatchObservation, TeamSummary};

/// Reduce a non-empty observation sequence into a [`TeamSummary`].
///
/// Each scalar field is the arithmetic mean of the corresponding field across
/// all observations. The BTTS and over-2.5 probabilities are the mean of the
/// 0/1 flags scaled to percent.
///
/// Returns [`ForecastError::InsufficientData`] for an empty sequence instead
/// of producing a 0/0 mean.
pub fn aggregate(observations: &[MatchObservation]) -> Result<TeamSummary, ForecastError> {
    if observations.is_empty() {
        return Err(ForecastError::InsufficientData);
    }

    let n = observations.len() as f64;
    let mut shots = 0.0;
    let mut shots_on_target = 0.0;
    let mut corners = 0.0;
    let mut cards = 0.0;
    let mut btts = 0.0;
    let mut over25 = 0.0;
    let mut xg = 0.0;

    for obs in observations {
        shots += obs.shots as f64;
        shots_on_target += obs.shots_on_target as f64;
        corners += obs.corners as f64;
        cards += obs.cards as f64;
        btts += if obs.both_teams_scored { 1.0 } else { 0.0 };
        over25 += if obs.over_2_5 { 1.0 } else { 0.0 };
        xg += obs.xg;
    }

    Ok(TeamSummary {
        avg_shots: round_dp(shots / n, 1),
        avg_shots_on_target: round_dp(shots_on_target / n, 1),
        avg_corners: round_dp(corners / n, 1),
        avg_cards: round_dp(cards / n, 1),
        btts_pct: round_pct(btts / n),
        over25_pct: round_pct(over25 / n),
        avg_xg: round_dp(xg / n, 2),
        sample_size: observations.len(),
    })
}

/// Round to `dp` decimal places.
pub(crate) fn round_dp(v: f64, dp: u32) -> f64 {
    let scale = 10f64.powi(dp as i32);
    (v * scale).round() / scale
}

/// Convert a 0–1 rate to a whole percentage.
fn round_pct(rate: f64) -> u8 {
    (rate * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn obs(xg: f64, btts: bool, over: bool) -> MatchObservation {
        MatchObservation {
            shots: 14,
            shots_on_target: 5,
            corners: 6,
            cards: 2,
            both_teams_scored: btts,
            over_2_5: over,
            xg,
        }
    }

    #[test]
    fn empty_sequence_is_insufficient_data() {
        let err = aggregate(&[]).unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientData));
    }

    #[test]
    fn xg_mean_rounds_to_two_decimals() {
        // mean of [1.8, 2.1, 1.5, 2.4, 2.0] = 1.96
        let observations: Vec<_> = [1.8, 2.1, 1.5, 2.4, 2.0]
            .iter()
            .map(|&x| obs(x, false, false))
            .collect();
        let summary = aggregate(&observations).unwrap();
        assert_relative_eq!(summary.avg_xg, 1.96, epsilon = 1e-9);
        assert_eq!(summary.sample_size, 5);
    }

    #[test]
    fn count_means_round_to_one_decimal() {
        let observations = vec![
            MatchObservation {
                shots: 10,
                shots_on_target: 3,
                corners: 4,
                cards: 1,
                both_teams_scored: false,
                over_2_5: false,
                xg: 1.0,
            },
            MatchObservation {
                shots: 15,
                shots_on_target: 6,
                corners: 9,
                cards: 2,
                both_teams_scored: false,
                over_2_5: false,
                xg: 1.0,
            },
            MatchObservation {
                shots: 12,
                shots_on_target: 4,
                corners: 5,
                cards: 2,
                both_teams_scored: false,
                over_2_5: false,
                xg: 1.0,
            },
        ];
        let summary = aggregate(&observations).unwrap();
        // 37/3 = 12.333... -> 12.3, 13/3 = 4.333... -> 4.3, 18/3 = 6.0, 5/3 -> 1.7
        assert_relative_eq!(summary.avg_shots, 12.3, epsilon = 1e-9);
        assert_relative_eq!(summary.avg_shots_on_target, 4.3, epsilon = 1e-9);
        assert_relative_eq!(summary.avg_corners, 6.0, epsilon = 1e-9);
        assert_relative_eq!(summary.avg_cards, 1.7, epsilon = 1e-9);
    }

    #[test]
    fn flag_rates_become_whole_percentages() {
        let observations = vec![
            obs(1.0, true, true),
            obs(1.0, true, false),
            obs(1.0, true, false),
        ];
        let summary = aggregate(&observations).unwrap();
        assert_eq!(summary.btts_pct, 100);
        // 1/3 -> 33.33% -> 33
        assert_eq!(summary.over25_pct, 33);
    }

    #[test]
    fn outputs_are_in_range_for_arbitrary_inputs() {
        let observations = vec![obs(0.0, false, true), obs(3.7, true, true)];
        let summary = aggregate(&observations).unwrap();
        assert!(summary.avg_shots >= 0.0);
        assert!(summary.avg_xg >= 0.0);
        assert!(summary.btts_pct <= 100);
        assert!(summary.over25_pct <= 100);
    }
}
