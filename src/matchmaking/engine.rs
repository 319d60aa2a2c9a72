//! Entropy-greedy matchmaking engine.
//!
//! Carves a roster into simultaneous matches: enumerate candidate teams,
//! score every disjoint pairing, perturb the costs, weighted-pick one, and
//! repeat on the remaining pool. Never raises: every outcome, including
//! "no matches possible", is a tagged `MatchmakingResult`.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::MatchmakingOptions;
use crate::models::{
    Algorithm, CompetitorSnapshot, GeneratedMatch, MatchmakingResult, Roster, Team,
};
use crate::skill::SkillModel;

use super::combinations::TeamCombinations;
use super::cost::MatchCostEvaluator;
use super::entropy;

/// Orchestrates team enumeration, cost scoring, and entropy selection.
#[derive(Debug, Clone, Default)]
pub struct MatchmakingEngine {
    skill: SkillModel,
}

impl MatchmakingEngine {
    pub fn new() -> Self {
        Self {
            skill: SkillModel::new(),
        }
    }

    /// Generate a round using OS entropy.
    pub fn generate(&self, roster: &Roster, options: &MatchmakingOptions) -> MatchmakingResult {
        self.generate_with_rng(roster, options, &mut rand::thread_rng())
    }

    /// Generate a round with a caller-supplied rng (seedable in tests).
    pub fn generate_with_rng<R: Rng>(
        &self,
        roster: &Roster,
        options: &MatchmakingOptions,
        rng: &mut R,
    ) -> MatchmakingResult {
        if let Err(err) = options.validate() {
            warn!("Matchmaking options rejected: {}", err);
            return MatchmakingResult::empty(
                roster.members().to_vec(),
                options.team_size,
                Algorithm::InvalidOptions,
                options.entropy_level,
            );
        }

        let per_match = options.players_per_match();
        if roster.len() < per_match {
            info!(
                "Roster of {} cannot field a {}-player match",
                roster.len(),
                per_match
            );
            return MatchmakingResult::empty(
                roster.members().to_vec(),
                options.team_size,
                Algorithm::InsufficientPlayers,
                options.entropy_level,
            );
        }

        let max_matches = roster.len() / per_match;
        let needed = max_matches * per_match;

        let mut pool: Vec<CompetitorSnapshot> = roster.members().to_vec();
        let mut excluded: Vec<CompetitorSnapshot> = Vec::new();
        if pool.len() > needed {
            // Uniform shuffle so no fixed rule benches the same competitors
            // every round.
            pool.shuffle(rng);
            excluded = pool.split_off(needed);
            debug!("Excluded {} surplus competitors this round", excluded.len());
        }

        let evaluator = MatchCostEvaluator::new(&self.skill, roster.recent_opponents(), options);

        let mut used = vec![false; pool.len()];
        let mut matches: Vec<GeneratedMatch> = Vec::with_capacity(max_matches);

        for _ in 0..max_matches {
            let available: Vec<usize> = (0..pool.len()).filter(|&i| !used[i]).collect();

            let Some((team_a, team_b)) =
                self.carve_pair(&pool, &available, &evaluator, options, rng)
            else {
                debug!(
                    "No valid disjoint pairing among {} remaining competitors; stopping early",
                    available.len()
                );
                break;
            };

            for &member in team_a.iter().chain(team_b.iter()) {
                used[member] = true;
            }
            matches.push(self.materialize(&pool, &team_a, &team_b));
        }

        let mut unmatched: Vec<CompetitorSnapshot> = (0..pool.len())
            .filter(|&i| !used[i])
            .map(|i| pool[i].clone())
            .collect();
        unmatched.extend(excluded);

        let algorithm = if matches.is_empty() {
            Algorithm::InsufficientPlayersAfterExclusion
        } else {
            Algorithm::EntropyGreedy
        };

        info!(
            "Generated {} matches ({} unmatched) via {}",
            matches.len(),
            unmatched.len(),
            algorithm
        );

        MatchmakingResult {
            matches,
            unmatched_players: unmatched,
            team_size: options.team_size,
            total_players: roster.len(),
            algorithm,
            entropy_level: options.entropy_level,
            generated_at: Utc::now(),
        }
    }

    /// Score every disjoint team pairing of the available pool and pick one.
    fn carve_pair<R: Rng>(
        &self,
        pool: &[CompetitorSnapshot],
        available: &[usize],
        evaluator: &MatchCostEvaluator<'_>,
        options: &MatchmakingOptions,
        rng: &mut R,
    ) -> Option<(Vec<usize>, Vec<usize>)> {
        let teams: Vec<Vec<usize>> = TeamCombinations::new(available.len(), options.team_size)
            .map(|combo| combo.into_iter().map(|i| available[i]).collect())
            .collect();

        let mut candidates: Vec<(usize, usize)> = Vec::new();
        let mut costs: Vec<f64> = Vec::new();
        for i in 0..teams.len() {
            for j in (i + 1)..teams.len() {
                if !disjoint(&teams[i], &teams[j]) {
                    continue;
                }
                let team_a: Vec<&CompetitorSnapshot> =
                    teams[i].iter().map(|&p| &pool[p]).collect();
                let team_b: Vec<&CompetitorSnapshot> =
                    teams[j].iter().map(|&p| &pool[p]).collect();
                candidates.push((i, j));
                costs.push(evaluator.cost(&team_a, &team_b));
            }
        }

        let perturbed = entropy::perturb(&costs, options.entropy_level, rng);
        let picked = entropy::select(&perturbed, options.entropy_level, rng)?;

        let (i, j) = candidates[picked];
        Some((teams[i].clone(), teams[j].clone()))
    }

    /// Turn a selected pairing into an immutable match record.
    fn materialize(
        &self,
        pool: &[CompetitorSnapshot],
        team_a: &[usize],
        team_b: &[usize],
    ) -> GeneratedMatch {
        let members: Vec<&CompetitorSnapshot> = team_a
            .iter()
            .chain(team_b.iter())
            .map(|&i| &pool[i])
            .collect();

        let ordinals: Vec<f64> = members.iter().map(|s| s.ordinal).collect();
        let max = ordinals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = ordinals.iter().cloned().fold(f64::INFINITY, f64::min);
        let average = ordinals.iter().sum::<f64>() / ordinals.len() as f64;

        let mean_sigma =
            members.iter().map(|s| s.rating.sigma).sum::<f64>() / members.len() as f64;

        let ratings_a: Vec<_> = team_a.iter().map(|&i| pool[i].rating).collect();
        let ratings_b: Vec<_> = team_b.iter().map(|&i| pool[i].rating).collect();
        let draw_probability = self.skill.predict_draw(&[ratings_a, ratings_b]);

        let to_team = |indices: &[usize]| {
            Team::new(indices.iter().map(|&i| pool[i].id.clone()).collect())
        };

        GeneratedMatch::new(
            vec![to_team(team_a), to_team(team_b)],
            max - min,
            average,
            1.0 / mean_sigma,
            draw_probability,
        )
    }
}

fn disjoint(a: &[usize], b: &[usize]) -> bool {
    a.iter().all(|x| !b.contains(x))
}
