//! Utility functions shared across the selection, expansion and root modules.
//!
//! This module contains the small numeric helpers used throughout the
//! MCTS implementation: legality masking, softmax, argmax with
//! deterministic tie-breaking, and Dirichlet noise sampling.

use rand::Rng;
use rand_distr::{Dirichlet, Distribution};

/// Masks `logits` to `-inf` wherever `legal` is `false`.
pub fn mask_illegal(logits: &[f32], legal: &[bool]) -> Vec<f32> {
    logits
        .iter()
        .zip(legal)
        .map(|(&logit, &is_legal)| if is_legal { logit } else { f32::NEG_INFINITY })
        .collect()
}

/// Numerically stable softmax. An all-`-inf` input (no legal actions)
/// returns an all-zero vector rather than NaNs — callers are expected to
/// check for "no legal actions" before relying on softmax output summing
/// to 1 — a state with no legal actions is terminal, and a terminal node
/// never needs a prior.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return vec![0.0; logits.len()];
    }

    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum <= 0.0 {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|x| x / sum).collect()
}

/// `argmax` over `scores`, breaking ties by the lowest index.
pub fn argmax_lowest_index(scores: &[f64]) -> usize {
    let mut best_index = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &score) in scores.iter().enumerate() {
        if score > best_value {
            best_value = score;
            best_index = i;
        }
    }
    best_index
}

/// Samples a symmetric Dirichlet noise vector `Dir(alpha, ..., alpha)` of
/// length `num_actions`.
pub fn sample_dirichlet_noise<R: Rng>(alpha: f64, num_actions: usize, rng: &mut R) -> Vec<f32> {
    if num_actions == 1 {
        return vec![1.0];
    }
    let dirichlet = Dirichlet::new(&vec![alpha; num_actions]).expect("alpha > 0 validated at construction");
    let sample: Vec<f64> = dirichlet.sample(rng);
    sample.into_iter().map(|v| v as f32).collect()
}

/// Samples a categorical index from `weights` (need not be normalized).
pub fn sample_categorical<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }
    let mut r = rng.gen_range(0.0..total);
    for (i, &w) in weights.iter().enumerate() {
        if r < w {
            return i;
        }
        r -= w;
    }
    weights.len() - 1
}
