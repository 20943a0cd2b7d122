//! Exact-scoreline distribution under independent Poisson goal counts.
//!
//! Each team's goal count is modelled as Poisson with rate equal to its
//! average xG over recent matches. The joint grid is truncated at a
//! configurable goal cap, so the retained mass sums to at most 100%.

use serde::Serialize;

use crate::error::ForecastError;
use crate::model::{aggregate::round_dp, Scoreline};

/// One cell of the truncated scoreline grid: an exact score and its
/// probability in percent, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScorelineProbability {
    pub scoreline: Scoreline,
    pub probability: f64,
}

/// Rank the most probable exact scorelines for the given goal rates.
///
/// Computes the full `(max_goals+1)²` grid of
/// `Poisson(h; lambda_home) * Poisson(a; lambda_away)`, scales each cell to
/// percent and returns the `top_k` most probable cells, ordered by
/// probability descending. Ties keep the grid's enumeration order (home goals
/// ascending, then away goals ascending) so repeated runs are reproducible.
///
/// Returns fewer than `top_k` entries only when the grid itself is smaller.
/// Deterministic: identical inputs yield identical output.
pub fn predict_top_scorelines(
    lambda_home: f64,
    lambda_away: f64,
    max_goals: u32,
    top_k: usize,
) -> Result<Vec<ScorelineProbability>, ForecastError> {
    if !lambda_home.is_finite() || lambda_home < 0.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "home goal rate must be a non-negative number, got {lambda_home}"
        )));
    }
    if !lambda_away.is_finite() || lambda_away < 0.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "away goal rate must be a non-negative number, got {lambda_away}"
        )));
    }
    if top_k == 0 {
        return Err(ForecastError::InvalidParameter(
            "top_k must be at least 1".to_string(),
        ));
    }

    let pmf_home = poisson_pmf(lambda_home, max_goals);
    let pmf_away = poisson_pmf(lambda_away, max_goals);

    let mut grid = Vec::with_capacity(pmf_home.len() * pmf_away.len());
    for (h, p_h) in pmf_home.iter().enumerate() {
        for (a, p_a) in pmf_away.iter().enumerate() {
            grid.push(ScorelineProbability {
                scoreline: Scoreline::new(h as u32, a as u32),
                probability: round_dp(p_h * p_a * 100.0, 2),
            });
        }
    }

    // Stable sort over the enumeration order gives the documented tie-break.
    grid.sort_by(|x, y| y.probability.total_cmp(&x.probability));
    grid.truncate(top_k);
    Ok(grid)
}

/// Poisson pmf for k = 0..=max_k, computed iteratively to avoid factorials.
///
/// Well-defined at lambda = 0: all mass at k = 0. The tail beyond `max_k` is
/// deliberately dropped, not folded back in.
fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let mut pmf = Vec::with_capacity(max_k as usize + 1);
    pmf.push((-lambda).exp());
    for k in 1..=max_k as usize {
        let prev = pmf[k - 1];
        pmf.push(prev * lambda / k as f64);
    }
    pmf
}
