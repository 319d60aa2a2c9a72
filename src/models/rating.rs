//! Gaussian skill belief (mu, sigma).

use serde::{Deserialize, Serialize};

/// Confidence multiplier for the ordinal: the conservative estimate sits
/// three standard deviations below the mean.
pub const ORDINAL_Z: f64 = 3.0;

/// A competitor's skill belief: mean estimate `mu` and uncertainty `sigma`.
///
/// Invariant: `sigma > 0`. Ratings are running aggregates: they are created
/// once with fixed defaults, mutated only by settlement, and never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Mean of the latent skill estimate
    pub mu: f64,

    /// Uncertainty (standard deviation) of the estimate
    pub sigma: f64,
}

impl Rating {
    /// Create a rating from explicit parameters.
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    /// Whether the rating satisfies the `sigma > 0` invariant.
    pub fn is_valid(&self) -> bool {
        self.sigma > 0.0 && self.mu.is_finite() && self.sigma.is_finite()
    }

    /// Conservative point estimate (`mu − 3σ`) used for human-facing
    /// ranking and skill-gap penalties, never as the canonical rating.
    pub fn ordinal(&self) -> f64 {
        self.mu - ORDINAL_Z * self.sigma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_validity() {
        assert!(Rating::new(25.0, 25.0 / 3.0).is_valid());
        assert!(!Rating::new(25.0, 0.0).is_valid());
        assert!(!Rating::new(25.0, -1.0).is_valid());
        assert!(!Rating::new(f64::NAN, 8.0).is_valid());
    }

    #[test]
    fn test_ordinal_below_mu() {
        // sigma > 0, so the conservative estimate is always below the mean
        let rating = Rating::new(25.0, 25.0 / 3.0);
        assert!(rating.ordinal() < rating.mu);
        assert!((rating.ordinal() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_ordinal_monotonic_in_sigma() {
        let confident = Rating::new(25.0, 2.0);
        let uncertain = Rating::new(25.0, 8.0);
        assert!(confident.ordinal() > uncertain.ordinal());
    }

    #[test]
    fn test_rating_serialization() {
        let rating = Rating::new(27.5, 6.2);
        let json = serde_json::to_string(&rating).unwrap();
        let deserialized: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(rating, deserialized);
    }
}
