//! In-memory storage for tests and embedded hosts.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{CompetitorId, CompetitorSnapshot, Rating, TournamentId};
use crate::skill::{DEFAULT_MU, DEFAULT_SIGMA};

use super::{Storage, StorageError, StoredRating};

/// One settled or generated match kept for recent-opponent lookups.
type RecordedMatch = Vec<Vec<CompetitorId>>;

#[derive(Default)]
struct State {
    ratings: HashMap<CompetitorId, StoredRating>,
    rosters: HashMap<TournamentId, Vec<(CompetitorId, String)>>,
    history: HashMap<TournamentId, Vec<RecordedMatch>>,
}

/// `Storage` backed by process memory.
///
/// The single lock serializes writers, which satisfies the per-competitor
/// single-writer contract wholesale.
#[derive(Default)]
pub struct MemoryStorage {
    state: RwLock<State>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enroll a competitor into a tournament's roster.
    pub async fn enroll(
        &self,
        tournament: &TournamentId,
        competitor: &CompetitorId,
        display_name: &str,
    ) {
        let mut state = self.state.write().await;
        state
            .rosters
            .entry(tournament.clone())
            .or_default()
            .push((competitor.clone(), display_name.to_string()));
    }

    /// Record a played match so recent-opponent lookups can see it. Newest
    /// last.
    pub async fn record_match(&self, tournament: &TournamentId, teams: Vec<Vec<CompetitorId>>) {
        let mut state = self.state.write().await;
        state.history.entry(tournament.clone()).or_default().push(teams);
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load_rating(
        &self,
        competitor: &CompetitorId,
    ) -> Result<Option<StoredRating>, StorageError> {
        let state = self.state.read().await;
        Ok(state.ratings.get(competitor).copied())
    }

    async fn upsert_rating(
        &self,
        competitor: &CompetitorId,
        rating: Rating,
        games_played: u32,
    ) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        state.ratings.insert(
            competitor.clone(),
            StoredRating {
                rating,
                games_played,
            },
        );
        Ok(())
    }

    async fn load_roster(
        &self,
        tournament: &TournamentId,
    ) -> Result<Vec<CompetitorSnapshot>, StorageError> {
        let state = self.state.read().await;
        let entries = state.rosters.get(tournament).cloned().unwrap_or_default();

        let snapshots = entries
            .into_iter()
            .map(|(id, display_name)| {
                let stored = state.ratings.get(&id).copied().unwrap_or(StoredRating {
                    rating: Rating::new(DEFAULT_MU, DEFAULT_SIGMA),
                    games_played: 0,
                });
                CompetitorSnapshot::new(id, display_name, stored.rating, stored.games_played)
            })
            .collect();

        Ok(snapshots)
    }

    async fn load_recent_opponents(
        &self,
        competitor: &CompetitorId,
        tournament: &TournamentId,
        lookback: u32,
    ) -> Result<HashSet<CompetitorId>, StorageError> {
        let state = self.state.read().await;
        let mut opponents = HashSet::new();

        let Some(history) = state.history.get(tournament) else {
            return Ok(opponents);
        };

        // Walk the competitor's matches newest-first, up to the lookback
        let mut seen_matches = 0;
        for teams in history.iter().rev() {
            if seen_matches >= lookback {
                break;
            }
            let own_team = teams.iter().position(|t| t.contains(competitor));
            if let Some(own) = own_team {
                for (i, team) in teams.iter().enumerate() {
                    if i != own {
                        opponents.extend(team.iter().cloned());
                    }
                }
                seen_matches += 1;
            }
        }

        Ok(opponents)
    }
}
