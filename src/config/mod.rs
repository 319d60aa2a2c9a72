//! Matchmaking options: loading, defaults, and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read options file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse options: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid options: {0}")]
    ValidationError(String),
}

/// Tunables for one matchmaking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchmakingOptions {
    /// Competitors per team
    #[serde(default = "default_team_size")]
    pub team_size: usize,

    /// Teams per match (the pairwise search supports exactly 2)
    #[serde(default = "default_teams_per_match")]
    pub teams_per_match: usize,

    /// Cost perturbation strength in [0, 1]; 0 = deterministic best choice
    #[serde(default = "default_entropy_level")]
    pub entropy_level: f64,

    /// Ordinal gap between teams tolerated before penalties apply
    #[serde(default = "default_max_skill_gap")]
    pub max_skill_gap: f64,

    /// Penalize pairings that repeat recent opponents
    #[serde(default = "default_avoid_recent_opponents")]
    pub avoid_recent_opponents: bool,

    /// How many past rounds count as "recent"
    #[serde(default = "default_recent_match_lookback")]
    pub recent_match_lookback: u32,
}

fn default_team_size() -> usize {
    1
}

fn default_teams_per_match() -> usize {
    2
}

fn default_entropy_level() -> f64 {
    0.3
}

fn default_max_skill_gap() -> f64 {
    5.0
}

fn default_avoid_recent_opponents() -> bool {
    true
}

fn default_recent_match_lookback() -> u32 {
    3
}

impl Default for MatchmakingOptions {
    fn default() -> Self {
        Self {
            team_size: default_team_size(),
            teams_per_match: default_teams_per_match(),
            entropy_level: default_entropy_level(),
            max_skill_gap: default_max_skill_gap(),
            avoid_recent_opponents: default_avoid_recent_opponents(),
            recent_match_lookback: default_recent_match_lookback(),
        }
    }
}

impl MatchmakingOptions {
    /// Load options from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let options: MatchmakingOptions = toml::from_str(&contents)?;
        options.validate()?;
        Ok(options)
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.team_size < 1 {
            return Err(ConfigError::ValidationError(
                "team_size must be at least 1".to_string(),
            ));
        }

        if self.teams_per_match != 2 {
            return Err(ConfigError::ValidationError(
                "the pairwise search supports exactly 2 teams per match".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.entropy_level) {
            return Err(ConfigError::ValidationError(
                "entropy_level must be in [0, 1]".to_string(),
            ));
        }

        if !self.max_skill_gap.is_finite() || self.max_skill_gap < 0.0 {
            return Err(ConfigError::ValidationError(
                "max_skill_gap must be a non-negative number".to_string(),
            ));
        }

        Ok(())
    }

    /// Competitors needed to field one match.
    pub fn players_per_match(&self) -> usize {
        self.team_size * self.teams_per_match
    }
}
