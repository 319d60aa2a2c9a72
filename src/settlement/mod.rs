//! Result settlement: rating updates after a finished match.
//!
//! Sorts the reported teams by placement, loads (or defaults) each
//! competitor's rating, runs the skill model, and writes the new state
//! back. Settlement is not idempotent: applying the same result twice
//! double-counts, and exactly-once delivery belongs to the caller.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::models::{CompetitorId, MatchResultInput, Rating, TeamResult};
use crate::skill::SkillModel;
use crate::storage::{Storage, StorageError};

/// Errors that can occur during settlement.
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid match result: {0}")]
    InvalidResult(String),
}

/// One competitor's rating transition from a settlement.
#[derive(Debug, Clone)]
pub struct RatingChange {
    pub competitor: CompetitorId,
    pub before: Rating,
    pub after: Rating,
    pub games_played: u32,
}

/// Audit record of a completed settlement.
#[derive(Debug, Clone)]
pub struct SettlementOutcome {
    pub changes: Vec<RatingChange>,
}

/// Applies match results to the persisted ratings.
pub struct RatingUpdater {
    storage: Arc<dyn Storage>,
    skill: SkillModel,
}

impl RatingUpdater {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            skill: SkillModel::new(),
        }
    }

    /// Settle one finished match: every involved competitor gets a new
    /// rating and an incremented games-played counter. Competitors with no
    /// rating on record start from the default belief.
    pub async fn apply_result(
        &self,
        input: &MatchResultInput,
    ) -> Result<SettlementOutcome, SettlementError> {
        validate(input)?;

        let mut teams: Vec<TeamResult> = input.teams.clone();
        teams.sort_by_key(|t| t.placement);

        // Load current state, defaulting never-rated competitors
        let mut states: Vec<Vec<(CompetitorId, Rating, u32)>> = Vec::with_capacity(teams.len());
        for team in &teams {
            let mut members = Vec::with_capacity(team.player_ids.len());
            for id in &team.player_ids {
                let (rating, games_played) = match self.storage.load_rating(id).await? {
                    Some(stored) => (stored.rating, stored.games_played),
                    None => (self.skill.default_rating(), 0),
                };
                members.push((id.clone(), rating, games_played));
            }
            states.push(members);
        }

        let rating_teams: Vec<Vec<Rating>> = states
            .iter()
            .map(|team| team.iter().map(|(_, rating, _)| *rating).collect())
            .collect();
        let rated = self.skill.rate(&rating_teams);

        let mut changes = Vec::new();
        for (team, new_ratings) in states.iter().zip(rated.iter()) {
            for ((id, before, games_played), after) in team.iter().zip(new_ratings.iter()) {
                let games_played = games_played + 1;
                self.storage.upsert_rating(id, *after, games_played).await?;
                changes.push(RatingChange {
                    competitor: id.clone(),
                    before: *before,
                    after: *after,
                    games_played,
                });
            }
        }

        info!("Settled match: {} competitors updated", changes.len());
        Ok(SettlementOutcome { changes })
    }
}

fn validate(input: &MatchResultInput) -> Result<(), SettlementError> {
    if input.teams.len() < 2 {
        return Err(SettlementError::InvalidResult(
            "a result needs at least two teams".to_string(),
        ));
    }

    if input.teams.iter().any(|t| t.player_ids.is_empty()) {
        return Err(SettlementError::InvalidResult(
            "every team needs at least one player".to_string(),
        ));
    }

    if input.teams.iter().any(|t| t.placement < 1) {
        return Err(SettlementError::InvalidResult(
            "placements start at 1".to_string(),
        ));
    }

    let mut placements = HashSet::new();
    if !input.teams.iter().all(|t| placements.insert(t.placement)) {
        return Err(SettlementError::InvalidResult(
            "placements must strictly rank teams; ties are not modeled".to_string(),
        ));
    }

    let mut players = HashSet::new();
    if !input.player_ids().all(|id| players.insert(id.clone())) {
        return Err(SettlementError::InvalidResult(
            "a competitor cannot appear on two teams".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{DEFAULT_MU, DEFAULT_SIGMA};
    use crate::storage::MemoryStorage;

    fn id(s: &str) -> CompetitorId {
        CompetitorId::from(s)
    }

    fn updater() -> (RatingUpdater, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (RatingUpdater::new(storage.clone()), storage)
    }

    #[tokio::test]
    async fn test_winner_overtakes_loser() -> anyhow::Result<()> {
        let (updater, storage) = updater();

        updater
            .apply_result(&MatchResultInput::win_loss(vec![id("a")], vec![id("b")]))
            .await?;

        let a = storage.load_rating(&id("a")).await?.unwrap();
        let b = storage.load_rating(&id("b")).await?.unwrap();

        assert!(a.rating.ordinal() > b.rating.ordinal());
        assert!(a.rating.mu > DEFAULT_MU);
        assert!(b.rating.mu < DEFAULT_MU);
        Ok(())
    }

    #[tokio::test]
    async fn test_sigma_shrinks_for_both_sides() -> anyhow::Result<()> {
        let (updater, storage) = updater();

        updater
            .apply_result(&MatchResultInput::win_loss(vec![id("a")], vec![id("b")]))
            .await?;

        for player in ["a", "b"] {
            let stored = storage.load_rating(&id(player)).await?.unwrap();
            assert!(stored.rating.sigma < DEFAULT_SIGMA);
            assert!(stored.rating.sigma > 0.0);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_creates_missing_ratings() -> anyhow::Result<()> {
        let (updater, storage) = updater();

        // Neither competitor has a rating on record
        let outcome = updater
            .apply_result(&MatchResultInput::win_loss(vec![id("new1")], vec![id("new2")]))
            .await?;

        assert_eq!(outcome.changes.len(), 2);
        for change in &outcome.changes {
            assert!((change.before.mu - DEFAULT_MU).abs() < 1e-9);
            assert_eq!(change.games_played, 1);
        }
        assert!(storage.load_rating(&id("new1")).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_games_played_incremented() -> anyhow::Result<()> {
        let (updater, storage) = updater();
        storage
            .upsert_rating(&id("veteran"), Rating::new(28.0, 4.0), 10)
            .await?;

        updater
            .apply_result(&MatchResultInput::win_loss(
                vec![id("veteran")],
                vec![id("rookie")],
            ))
            .await?;

        assert_eq!(
            storage.load_rating(&id("veteran")).await?.unwrap().games_played,
            11
        );
        assert_eq!(
            storage.load_rating(&id("rookie")).await?.unwrap().games_played,
            1
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_placement_order_not_input_order() -> anyhow::Result<()> {
        let (updater, storage) = updater();

        // Loser listed first; placement decides, not position
        let input = MatchResultInput::new(vec![
            TeamResult::new(vec![id("loser")], 2),
            TeamResult::new(vec![id("winner")], 1),
        ]);
        updater.apply_result(&input).await?;

        let winner = storage.load_rating(&id("winner")).await?.unwrap();
        let loser = storage.load_rating(&id("loser")).await?.unwrap();
        assert!(winner.rating.mu > loser.rating.mu);
        Ok(())
    }

    #[tokio::test]
    async fn test_multi_team_placements() -> anyhow::Result<()> {
        let (updater, storage) = updater();

        let input = MatchResultInput::new(vec![
            TeamResult::new(vec![id("third")], 3),
            TeamResult::new(vec![id("first")], 1),
            TeamResult::new(vec![id("second")], 2),
        ]);
        updater.apply_result(&input).await?;

        let first = storage.load_rating(&id("first")).await?.unwrap();
        let second = storage.load_rating(&id("second")).await?.unwrap();
        let third = storage.load_rating(&id("third")).await?.unwrap();

        assert!(first.rating.mu > second.rating.mu);
        assert!(second.rating.mu > third.rating.mu);
        Ok(())
    }

    #[tokio::test]
    async fn test_team_members_rated_together() -> anyhow::Result<()> {
        let (updater, storage) = updater();

        updater
            .apply_result(&MatchResultInput::win_loss(
                vec![id("w1"), id("w2")],
                vec![id("l1"), id("l2")],
            ))
            .await?;

        for winner in ["w1", "w2"] {
            let stored = storage.load_rating(&id(winner)).await?.unwrap();
            assert!(stored.rating.mu > DEFAULT_MU);
        }
        for loser in ["l1", "l2"] {
            let stored = storage.load_rating(&id(loser)).await?.unwrap();
            assert!(stored.rating.mu < DEFAULT_MU);
        }
        Ok(())
    }

    /// Double settlement double-counts. This pins the current behavior:
    /// deduplication is the caller's responsibility, and this gap is a
    /// known risk rather than desired semantics.
    #[tokio::test]
    async fn test_double_settlement_double_counts() -> anyhow::Result<()> {
        let (updater, storage) = updater();
        let input = MatchResultInput::win_loss(vec![id("a")], vec![id("b")]);

        updater.apply_result(&input).await?;
        let after_one = storage.load_rating(&id("a")).await?.unwrap();

        updater.apply_result(&input).await?;
        let after_two = storage.load_rating(&id("a")).await?.unwrap();

        assert_eq!(after_two.games_played, 2);
        assert!(after_two.rating.mu > after_one.rating.mu);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_single_team() {
        let (updater, _) = updater();
        let input = MatchResultInput::new(vec![TeamResult::new(vec![id("a")], 1)]);

        let err = updater.apply_result(&input).await.unwrap_err();
        assert!(matches!(err, SettlementError::InvalidResult(_)));
    }

    #[tokio::test]
    async fn test_rejects_empty_team() {
        let (updater, _) = updater();
        let input = MatchResultInput::new(vec![
            TeamResult::new(vec![id("a")], 1),
            TeamResult::new(Vec::new(), 2),
        ]);

        let err = updater.apply_result(&input).await.unwrap_err();
        assert!(matches!(err, SettlementError::InvalidResult(_)));
    }

    #[tokio::test]
    async fn test_rejects_tied_placements() {
        let (updater, _) = updater();
        let input = MatchResultInput::new(vec![
            TeamResult::new(vec![id("a")], 1),
            TeamResult::new(vec![id("b")], 1),
        ]);

        let err = updater.apply_result(&input).await.unwrap_err();
        assert!(matches!(err, SettlementError::InvalidResult(_)));
    }

    #[tokio::test]
    async fn test_rejects_zero_placement() {
        let (updater, _) = updater();
        let input = MatchResultInput::new(vec![
            TeamResult::new(vec![id("a")], 0),
            TeamResult::new(vec![id("b")], 1),
        ]);

        let err = updater.apply_result(&input).await.unwrap_err();
        assert!(matches!(err, SettlementError::InvalidResult(_)));
    }

    #[tokio::test]
    async fn test_rejects_player_on_both_teams() {
        let (updater, _) = updater();
        let input = MatchResultInput::new(vec![
            TeamResult::new(vec![id("a")], 1),
            TeamResult::new(vec![id("a")], 2),
        ]);

        let err = updater.apply_result(&input).await.unwrap_err();
        assert!(matches!(err, SettlementError::InvalidResult(_)));
    }
}
