//! Bayesian skill model (TrueSkill).
//!
//! A thin, typed layer over the `skillratings` TrueSkill implementation:
//! default beliefs for new competitors, conservative ordinals, draw
//! prediction via match quality, and multi-team rating updates. Pure
//! functions, no I/O.

use skillratings::trueskill::{
    match_quality_two_teams, trueskill_multi_team, TrueSkillConfig, TrueSkillRating,
};
use skillratings::MultiTeamOutcome;

use crate::models::Rating;

/// Starting mean for a never-rated competitor.
pub const DEFAULT_MU: f64 = 25.0;

/// Starting uncertainty for a never-rated competitor (25/3).
pub const DEFAULT_SIGMA: f64 = 25.0 / 3.0;

/// Floor applied to post-update uncertainty; keeps `sigma > 0` even at the
/// algorithm's convergence limit.
const MIN_SIGMA: f64 = 1e-6;

/// The rating model shared by matchmaking and settlement.
#[derive(Debug, Clone)]
pub struct SkillModel {
    config: TrueSkillConfig,
}

impl Default for SkillModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillModel {
    /// Model with the standard TrueSkill configuration (beta = 25/6).
    pub fn new() -> Self {
        Self {
            config: TrueSkillConfig::new(),
        }
    }

    /// Fixed starting belief for every new competitor.
    pub fn default_rating(&self) -> Rating {
        Rating::new(DEFAULT_MU, DEFAULT_SIGMA)
    }

    /// Conservative point estimate: `mu − 3σ`.
    pub fn ordinal(&self, rating: &Rating) -> f64 {
        rating.ordinal()
    }

    /// Probability that the given teams would draw, in [0, 1].
    ///
    /// Match quality under the Gaussian comparison model: a function of the
    /// combined variance and the mean separation of the teams. Two teams
    /// map directly onto the pairwise comparison; for more teams the
    /// pairwise values are averaged. Higher when team strengths are close
    /// and/or uncertainty is high; symmetric under team reordering.
    pub fn predict_draw(&self, teams: &[Vec<Rating>]) -> f64 {
        if teams.len() < 2 {
            return 0.0;
        }

        let converted: Vec<Vec<TrueSkillRating>> = teams
            .iter()
            .map(|team| team.iter().map(to_model).collect())
            .collect();

        let mut total = 0.0;
        let mut pairs = 0u32;
        for i in 0..converted.len() {
            for j in (i + 1)..converted.len() {
                total += match_quality_two_teams(&converted[i], &converted[j], &self.config);
                pairs += 1;
            }
        }

        (total / f64::from(pairs)).clamp(0.0, 1.0)
    }

    /// New ratings for every competitor, given teams ordered by placement
    /// (index 0 = winner). Output has the same shape as the input.
    ///
    /// Winners gain mean, losers lose mean, and everyone's uncertainty
    /// shrinks, scaled by pre-match uncertainty and by how surprising the
    /// outcome was. `sigma` stays strictly positive.
    pub fn rate(&self, teams_ordered_by_placement: &[Vec<Rating>]) -> Vec<Vec<Rating>> {
        let converted: Vec<Vec<TrueSkillRating>> = teams_ordered_by_placement
            .iter()
            .map(|team| team.iter().map(to_model).collect())
            .collect();

        let teams_and_ranks: Vec<(&[TrueSkillRating], MultiTeamOutcome)> = converted
            .iter()
            .enumerate()
            .map(|(i, team)| (team.as_slice(), MultiTeamOutcome::new(i + 1)))
            .collect();

        trueskill_multi_team(&teams_and_ranks, &self.config)
            .into_iter()
            .map(|team| team.iter().map(from_model).collect())
            .collect()
    }
}

fn to_model(rating: &Rating) -> TrueSkillRating {
    TrueSkillRating {
        rating: rating.mu,
        uncertainty: rating.sigma,
    }
}

fn from_model(rating: &TrueSkillRating) -> Rating {
    Rating::new(rating.rating, rating.uncertainty.max(MIN_SIGMA))
}
