//! Core data models for the pairing engine.

mod competitor;
mod generated;
mod ids;
mod match_result;
mod rating;
mod roster;

pub use competitor::*;
pub use generated::*;
pub use ids::*;
pub use match_result::*;
pub use rating::*;
pub use roster::*;
