//! Round generation service.
//!
//! Bridges storage and the pure search core: builds the roster snapshot,
//! gathers recent-opponent sets when repeat-avoidance is on, and hands the
//! lot to the engine. The only awaits are the storage reads.

use std::sync::Arc;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::MatchmakingOptions;
use crate::matchmaking::MatchmakingEngine;
use crate::models::{MatchmakingResult, RecentOpponents, Roster, TournamentId};
use crate::storage::{Storage, StorageError};

/// Errors that can occur while preparing a round.
#[derive(Debug, Error)]
pub enum RoundError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Generates rounds for a tournament against injected storage.
pub struct RoundGenerator {
    storage: Arc<dyn Storage>,
    engine: MatchmakingEngine,
}

impl RoundGenerator {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            engine: MatchmakingEngine::new(),
        }
    }

    /// Generate the next round using OS entropy.
    ///
    /// Two generations for the same tournament must not run concurrently;
    /// that exclusivity is the caller's scheduling concern.
    pub async fn generate_round(
        &self,
        tournament: &TournamentId,
        options: &MatchmakingOptions,
    ) -> Result<MatchmakingResult, RoundError> {
        let roster = self.build_roster(tournament, options).await?;
        Ok(self.engine.generate(&roster, options))
    }

    /// Generate the next round with a caller-supplied rng (seedable in
    /// tests).
    pub async fn generate_round_with_rng<R: Rng + Send>(
        &self,
        tournament: &TournamentId,
        options: &MatchmakingOptions,
        rng: &mut R,
    ) -> Result<MatchmakingResult, RoundError> {
        let roster = self.build_roster(tournament, options).await?;
        Ok(self.engine.generate_with_rng(&roster, options, rng))
    }

    /// Snapshot the eligible competitors and, when configured, their
    /// recent opponents.
    async fn build_roster(
        &self,
        tournament: &TournamentId,
        options: &MatchmakingOptions,
    ) -> Result<Roster, RoundError> {
        let snapshots = self.storage.load_roster(tournament).await?;
        info!(
            "Loaded roster of {} for tournament {}",
            snapshots.len(),
            tournament
        );

        let mut roster = Roster::new(snapshots);

        if options.avoid_recent_opponents {
            let mut recent = RecentOpponents::new();
            for member in roster.members() {
                let opponents = self
                    .storage
                    .load_recent_opponents(&member.id, tournament, options.recent_match_lookback)
                    .await?;
                if !opponents.is_empty() {
                    recent.insert(member.id.clone(), opponents);
                }
            }
            debug!(
                "Recent-opponent sets loaded for {} competitors",
                recent.len()
            );
            roster = roster.with_recent_opponents(recent);
        }

        Ok(roster)
    }
}
