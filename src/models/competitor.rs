//! Competitor snapshot: one eligible player's state at roster-build time.

use serde::{Deserialize, Serialize};

use super::{CompetitorId, Rating};

/// A competitor as seen by one matchmaking run.
///
/// Snapshots are read-only for the duration of a run; ratings only change
/// through settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorSnapshot {
    /// Unique identifier (owned by the storage collaborator)
    pub id: CompetitorId,

    /// Display name for logs and human-facing output
    pub display_name: String,

    /// Current skill belief
    pub rating: Rating,

    /// Conservative skill estimate derived from the rating (`mu − 3σ`)
    pub ordinal: f64,

    /// Completed matches on record
    pub games_played: u32,
}

impl CompetitorSnapshot {
    /// Create a snapshot, deriving the ordinal from the rating.
    pub fn new(id: CompetitorId, display_name: String, rating: Rating, games_played: u32) -> Self {
        Self {
            id,
            display_name,
            ordinal: rating.ordinal(),
            rating,
            games_played,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_derives_ordinal() {
        let snapshot = CompetitorSnapshot::new(
            CompetitorId::from("alice"),
            "Alice".to_string(),
            Rating::new(30.0, 2.0),
            12,
        );

        assert_eq!(snapshot.games_played, 12);
        assert!((snapshot.ordinal - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = CompetitorSnapshot::new(
            CompetitorId::from("bob"),
            "Bob".to_string(),
            Rating::new(25.0, 25.0 / 3.0),
            0,
        );

        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: CompetitorSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.id, deserialized.id);
        assert_eq!(snapshot.rating, deserialized.rating);
    }
}
