//! # Pairing Engine
//!
//! Tournament matchmaking and Bayesian skill rating.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (ratings, rosters, generated matches)
//! - **skill**: TrueSkill rating model
//! - **matchmaking**: Entropy-greedy pairing search (pure, synchronous)
//! - **storage**: Injected persistence boundary + in-memory implementation
//! - **rounds**: Round generation service over storage
//! - **settlement**: Rating updates from match results
//! - **config**: Matchmaking options loading and validation

pub mod config;
pub mod matchmaking;
pub mod models;
pub mod rounds;
pub mod settlement;
pub mod skill;
pub mod storage;

pub use models::*;

// Re-export the components most hosts touch
pub use config::MatchmakingOptions;
pub use matchmaking::MatchmakingEngine;
pub use rounds::RoundGenerator;
pub use settlement::RatingUpdater;
pub use skill::SkillModel;
pub use storage::{MemoryStorage, Storage};
