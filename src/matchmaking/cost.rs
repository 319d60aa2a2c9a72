//! Candidate pairing cost. Lower is better.

use crate::config::MatchmakingOptions;
use crate::models::{CompetitorSnapshot, RecentOpponents};
use crate::skill::SkillModel;

/// Added once per cross-team pair that already met within the lookback
/// window.
pub const REPEAT_OPPONENT_PENALTY: f64 = 0.3;

/// Cost per ordinal point by which the team skill gap exceeds the
/// configured maximum.
pub const SKILL_GAP_PENALTY_RATE: f64 = 0.1;

/// Scores candidate team pairings for one matchmaking run.
pub struct MatchCostEvaluator<'a> {
    skill: &'a SkillModel,
    recent_opponents: &'a RecentOpponents,
    options: &'a MatchmakingOptions,
}

impl<'a> MatchCostEvaluator<'a> {
    pub fn new(
        skill: &'a SkillModel,
        recent_opponents: &'a RecentOpponents,
        options: &'a MatchmakingOptions,
    ) -> Self {
        Self {
            skill,
            recent_opponents,
            options,
        }
    }

    /// Cost of fielding `team_a` against `team_b`. Always ≥ 0.
    ///
    /// Balanced matches (high draw probability) are cheapest; repeat
    /// opponents and oversized skill gaps add penalties. Large mismatches
    /// are discouraged, not forbidden. Ties are resolved later by
    /// selection, not here.
    pub fn cost(&self, team_a: &[&CompetitorSnapshot], team_b: &[&CompetitorSnapshot]) -> f64 {
        let ratings_a: Vec<_> = team_a.iter().map(|s| s.rating).collect();
        let ratings_b: Vec<_> = team_b.iter().map(|s| s.rating).collect();

        let mut cost = 1.0 - self.skill.predict_draw(&[ratings_a, ratings_b]);

        if self.options.avoid_recent_opponents {
            cost += REPEAT_OPPONENT_PENALTY * f64::from(self.repeat_pairs(team_a, team_b));
        }

        let gap = (mean_ordinal(team_a) - mean_ordinal(team_b)).abs();
        if gap > self.options.max_skill_gap {
            cost += SKILL_GAP_PENALTY_RATE * (gap - self.options.max_skill_gap);
        }

        cost
    }

    /// Cross-team pairs that appear in each other's recent-opponent sets.
    fn repeat_pairs(&self, team_a: &[&CompetitorSnapshot], team_b: &[&CompetitorSnapshot]) -> u32 {
        let mut count = 0;
        for a in team_a {
            for b in team_b {
                let met = self
                    .recent_opponents
                    .get(&a.id)
                    .is_some_and(|set| set.contains(&b.id))
                    || self
                        .recent_opponents
                        .get(&b.id)
                        .is_some_and(|set| set.contains(&a.id));
                if met {
                    count += 1;
                }
            }
        }
        count
    }
}

fn mean_ordinal(team: &[&CompetitorSnapshot]) -> f64 {
    if team.is_empty() {
        return 0.0;
    }
    team.iter().map(|s| s.ordinal).sum::<f64>() / team.len() as f64
}
