//! Deterministic ID generation using SHA256 hashing.
//!
//! Competitor and tournament ids are opaque strings owned by the storage
//! collaborator; match ids are derived from content so that repeated
//! persistence of the same generated match is keyed stably.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A deterministic entity ID derived from content hash.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new EntityId from an existing id string.
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generate an EntityId from input fields.
    /// Uses SHA256 and takes the first 16 characters for brevity.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let result = hasher.finalize();
        let hash = hex::encode(result);
        Self(hash[..16].to_string())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Type alias for competitor ids
pub type CompetitorId = EntityId;

/// Type alias for tournament ids
pub type TournamentId = EntityId;

/// Type alias for generated match ids
pub type MatchId = EntityId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_generation_deterministic() {
        let id1 = EntityId::generate(&["tournament-7", "alice", "bob"]);
        let id2 = EntityId::generate(&["tournament-7", "alice", "bob"]);
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_match_id_different_members() {
        let id1 = EntityId::generate(&["tournament-7", "alice", "bob"]);
        let id2 = EntityId::generate(&["tournament-7", "alice", "carol"]);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_field_order_matters() {
        let id1 = EntityId::generate(&["alice", "bob"]);
        let id2 = EntityId::generate(&["bob", "alice"]);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_entity_id_length() {
        let id = EntityId::generate(&["test", "input"]);
        assert_eq!(id.as_str().len(), 16);
    }

    #[test]
    fn test_entity_id_hex_format() {
        let id = EntityId::generate(&["test"]);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_entity_id_serialization() {
        let id = EntityId::generate(&["test"]);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_entity_id_display() {
        let id = EntityId::new("player-42".to_string());
        assert_eq!(format!("{}", id), "player-42");
    }

    #[test]
    fn test_entity_id_from_str() {
        let id = CompetitorId::from("external-account-id");
        assert_eq!(id.as_str(), "external-account-id");
    }

    #[test]
    fn test_entity_id_equality() {
        let id1 = CompetitorId::from("same");
        let id2 = CompetitorId::from("same");
        let id3 = CompetitorId::from("different");
        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }
}
