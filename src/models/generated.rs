//! Generated match and round-result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CompetitorId, CompetitorSnapshot, EntityId, MatchId};

/// A fixed-size set of competitors fielded together.
///
/// Member order carries no meaning; teams within one match are disjoint by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub members: Vec<CompetitorId>,
}

impl Team {
    pub fn new(members: Vec<CompetitorId>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &CompetitorId) -> bool {
        self.members.contains(id)
    }
}

/// One match produced by a matchmaking run. Immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMatch {
    /// Deterministic id derived from the member ids
    pub id: MatchId,

    /// The opposing teams
    pub teams: Vec<Team>,

    /// Max − min ordinal across all match members
    pub skill_difference: f64,

    /// Mean ordinal across all match members
    pub average_skill: f64,

    /// Inverse of the mean sigma; higher means better-known ratings
    pub confidence: f64,

    /// Model-predicted draw probability for the pairing
    pub draw_probability: f64,
}

impl GeneratedMatch {
    /// Create a match, deriving the id from the member ids in team order.
    pub fn new(
        teams: Vec<Team>,
        skill_difference: f64,
        average_skill: f64,
        confidence: f64,
        draw_probability: f64,
    ) -> Self {
        let fields: Vec<&str> = teams
            .iter()
            .flat_map(|t| t.members.iter().map(|id| id.as_str()))
            .collect();

        Self {
            id: EntityId::generate(&fields),
            teams,
            skill_difference,
            average_skill,
            confidence,
            draw_probability,
        }
    }

    /// All competitor ids across all teams.
    pub fn player_ids(&self) -> impl Iterator<Item = &CompetitorId> {
        self.teams.iter().flat_map(|t| t.members.iter())
    }
}

/// How a matchmaking run concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// The entropy-greedy search ran and produced matches
    EntropyGreedy,
    /// The roster could not field a single match
    InsufficientPlayers,
    /// Surplus exclusion ran but no valid pairing existed afterwards
    InsufficientPlayersAfterExclusion,
    /// Options failed validation (guarded, not raised)
    InvalidOptions,
}

impl Algorithm {
    /// Whether this tag marks a guard path rather than a completed search.
    pub fn is_guard(&self) -> bool {
        !matches!(self, Algorithm::EntropyGreedy)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::EntropyGreedy => write!(f, "entropy-greedy"),
            Algorithm::InsufficientPlayers => write!(f, "insufficient-players"),
            Algorithm::InsufficientPlayersAfterExclusion => {
                write!(f, "insufficient-players-after-exclusion")
            }
            Algorithm::InvalidOptions => write!(f, "invalid-options"),
        }
    }
}

/// The full outcome of one "generate round" call.
///
/// Invariant: every roster member appears exactly once across `matches` and
/// `unmatched_players`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchmakingResult {
    pub matches: Vec<GeneratedMatch>,
    pub unmatched_players: Vec<CompetitorSnapshot>,
    pub team_size: usize,
    pub total_players: usize,
    pub algorithm: Algorithm,
    pub entropy_level: f64,
    pub generated_at: DateTime<Utc>,
}

impl MatchmakingResult {
    /// An empty result for guard paths: no matches, everyone unmatched.
    pub fn empty(
        unmatched_players: Vec<CompetitorSnapshot>,
        team_size: usize,
        algorithm: Algorithm,
        entropy_level: f64,
    ) -> Self {
        Self {
            matches: Vec::new(),
            total_players: unmatched_players.len(),
            unmatched_players,
            team_size,
            algorithm,
            entropy_level,
            generated_at: Utc::now(),
        }
    }

    /// Number of competitors placed into teams.
    pub fn matched_player_count(&self) -> usize {
        self.matches.iter().flat_map(|m| m.player_ids()).count()
    }
}
