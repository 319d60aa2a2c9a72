//! Entropy injection: cost perturbation and weighted candidate selection.
//!
//! Repeatedly generating rounds for the same roster should not keep
//! producing the identical "best" pairing, so selection is randomized and
//! unseeded in production. The rng is injected so tests can seed it.

use rand::Rng;

/// Keeps weights finite when a candidate cost reaches zero.
const WEIGHT_EPSILON: f64 = 1e-6;

/// Multiply each cost by `1 + U`, `U ~ Uniform[−entropy_level,
/// +entropy_level]`, independently per candidate. Identity at level 0.
pub fn perturb<R: Rng>(costs: &[f64], entropy_level: f64, rng: &mut R) -> Vec<f64> {
    if entropy_level <= 0.0 {
        return costs.to_vec();
    }

    costs
        .iter()
        .map(|cost| cost * (1.0 + rng.gen_range(-entropy_level..=entropy_level)))
        .collect()
}

/// Pick a candidate index from perturbed costs.
///
/// At entropy 0 this is the deterministic best choice (first minimum).
/// Otherwise candidates are weighted by `1 / (cost + ε)` and sampled, so
/// cheaper pairings stay likelier without monopolizing selection. Returns
/// `None` for an empty candidate list.
pub fn select<R: Rng>(costs: &[f64], entropy_level: f64, rng: &mut R) -> Option<usize> {
    if costs.is_empty() {
        return None;
    }

    if entropy_level <= 0.0 {
        let mut best = 0;
        for (i, cost) in costs.iter().enumerate() {
            if *cost < costs[best] {
                best = i;
            }
        }
        return Some(best);
    }

    let weights: Vec<f64> = costs.iter().map(|c| 1.0 / (c + WEIGHT_EPSILON)).collect();
    let total: f64 = weights.iter().sum();

    let mut remaining = rng.gen_range(0.0..total);
    for (i, weight) in weights.iter().enumerate() {
        if remaining < *weight {
            return Some(i);
        }
        remaining -= weight;
    }

    // Float drift past the last bucket lands on the final candidate
    Some(costs.len() - 1)
}
