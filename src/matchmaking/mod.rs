//! The matchmaking search core.
//!
//! Synchronous and side-effect free: team enumeration (`combinations`),
//! pairing cost (`cost`), randomized selection (`entropy`), and the greedy
//! carve loop (`engine`). Storage never appears below this boundary.

pub mod combinations;
pub mod cost;
pub mod engine;
pub mod entropy;

pub use combinations::TeamCombinations;
pub use cost::MatchCostEvaluator;
pub use engine::MatchmakingEngine;
