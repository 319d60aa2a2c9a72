//! Settlement input: a finished match's team placements.

use serde::{Deserialize, Serialize};

use super::CompetitorId;

/// One team's final standing in a settled match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResult {
    /// Members of the team
    pub player_ids: Vec<CompetitorId>,

    /// Finishing rank, 1 = best. Placements strictly rank teams; ties are
    /// not modeled.
    pub placement: u32,
}

impl TeamResult {
    pub fn new(player_ids: Vec<CompetitorId>, placement: u32) -> Self {
        Self {
            player_ids,
            placement,
        }
    }
}

/// The result of one finished match, as reported by the caller.
///
/// Settlement is not deduplicated here: applying the same input twice
/// double-counts. Exactly-once delivery belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResultInput {
    pub teams: Vec<TeamResult>,
}

impl MatchResultInput {
    pub fn new(teams: Vec<TeamResult>) -> Self {
        Self { teams }
    }

    /// Convenience constructor for the common two-team outcome.
    pub fn win_loss(winners: Vec<CompetitorId>, losers: Vec<CompetitorId>) -> Self {
        Self {
            teams: vec![TeamResult::new(winners, 1), TeamResult::new(losers, 2)],
        }
    }

    /// All player ids across all teams.
    pub fn player_ids(&self) -> impl Iterator<Item = &CompetitorId> {
        self.teams.iter().flat_map(|t| t.player_ids.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_loss_constructor() {
        let input = MatchResultInput::win_loss(
            vec![CompetitorId::from("alice")],
            vec![CompetitorId::from("bob")],
        );

        assert_eq!(input.teams.len(), 2);
        assert_eq!(input.teams[0].placement, 1);
        assert_eq!(input.teams[1].placement, 2);
    }

    #[test]
    fn test_player_ids_flattened() {
        let input = MatchResultInput::new(vec![
            TeamResult::new(vec![CompetitorId::from("a"), CompetitorId::from("b")], 1),
            TeamResult::new(vec![CompetitorId::from("c")], 2),
        ]);

        let ids: Vec<&str> = input.player_ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_result_input_serialization() {
        let input = MatchResultInput::win_loss(
            vec![CompetitorId::from("alice")],
            vec![CompetitorId::from("bob")],
        );

        let json = serde_json::to_string(&input).unwrap();
        let deserialized: MatchResultInput = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.teams.len(), 2);
        assert_eq!(deserialized.teams[0].player_ids[0].as_str(), "alice");
    }
}
