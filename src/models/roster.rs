//! Roster: the snapshot of eligible competitors for one round.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{CompetitorId, CompetitorSnapshot};

/// Map from a competitor to the opponents they faced within the lookback
/// window.
pub type RecentOpponents = HashMap<CompetitorId, HashSet<CompetitorId>>;

/// The eligible competitors for a round, unique by id, in roster order.
///
/// Built fresh per generation call and read-only during a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<CompetitorSnapshot>,

    /// Recently faced opponents, populated when repeat-avoidance is on.
    #[serde(default)]
    recent_opponents: RecentOpponents,
}

impl Roster {
    /// Build a roster from snapshots, dropping duplicate ids (first
    /// occurrence wins).
    pub fn new(snapshots: Vec<CompetitorSnapshot>) -> Self {
        let mut seen = HashSet::new();
        let members = snapshots
            .into_iter()
            .filter(|s| seen.insert(s.id.clone()))
            .collect();

        Self {
            members,
            recent_opponents: RecentOpponents::new(),
        }
    }

    /// Attach recent-opponent sets.
    pub fn with_recent_opponents(mut self, recent: RecentOpponents) -> Self {
        self.recent_opponents = recent;
        self
    }

    pub fn members(&self) -> &[CompetitorSnapshot] {
        &self.members
    }

    pub fn recent_opponents(&self) -> &RecentOpponents {
        &self.recent_opponents
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Look up a member by id.
    pub fn get(&self, id: &CompetitorId) -> Option<&CompetitorSnapshot> {
        self.members.iter().find(|s| &s.id == id)
    }

    /// Members sorted by descending ordinal, the human-facing standings.
    /// Ties keep roster order.
    pub fn standings(&self) -> Vec<&CompetitorSnapshot> {
        let mut ranked: Vec<&CompetitorSnapshot> = self.members.iter().collect();
        ranked.sort_by(|a, b| b.ordinal.partial_cmp(&a.ordinal).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}
