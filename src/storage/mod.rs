//! Storage collaborator boundary.
//!
//! The engine core never talks to persistence directly. Roster loading and
//! rating persistence go through this trait, injected into the round and
//! settlement services; implementations own durability and per-competitor
//! write serialization.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CompetitorId, CompetitorSnapshot, Rating, TournamentId};

mod memory;

pub use memory::MemoryStorage;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record for competitor {0}: {1}")]
    CorruptRecord(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A competitor's persisted rating state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoredRating {
    pub rating: Rating,
    pub games_played: u32,
}

/// The persistence interface consumed by the core.
///
/// Concurrent writes for the same competitor must be serialized by the
/// implementation (row lock, optimistic version, or equivalent); the core
/// assumes single-writer-at-a-time semantics per competitor id.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Current rating and games-played for a competitor, if any is on
    /// record.
    async fn load_rating(
        &self,
        competitor: &CompetitorId,
    ) -> Result<Option<StoredRating>, StorageError>;

    /// Write a competitor's rating state, creating the record if absent.
    async fn upsert_rating(
        &self,
        competitor: &CompetitorId,
        rating: Rating,
        games_played: u32,
    ) -> Result<(), StorageError>;

    /// Eligible competitors for a tournament, with current ratings.
    async fn load_roster(
        &self,
        tournament: &TournamentId,
    ) -> Result<Vec<CompetitorSnapshot>, StorageError>;

    /// Opponents a competitor faced within the last `lookback` of their
    /// matches in this tournament.
    async fn load_recent_opponents(
        &self,
        competitor: &CompetitorId,
        tournament: &TournamentId,
        lookback: u32,
    ) -> Result<HashSet<CompetitorId>, StorageError>;
}
