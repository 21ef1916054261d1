//! Selection policies for the MCTS algorithm
//!
//! Selection policies determine which action to follow at a given node
//! during traversal, balancing exploration and exploitation.

use crate::arena::{Arena, Slot};

/// Trait for policies that choose an action to descend through at a node.
///
/// Implementations read only from the arena's statistics for `parent` —
/// they must not mutate the tree.
pub trait SelectionPolicy<S: Clone + Send + Sync>: Send + Sync {
    /// Chooses an action index among `0..legal.len()`, masking out
    /// actions where `legal[a]` is `false`.
    fn select_action(&self, arena: &Arena<S>, parent: Slot, legal: &[bool]) -> usize;
}

/// Polynomial Upper Confidence Trees (PUCT) selection policy.
///
/// This is the selection rule used in AlphaZero-style search. Unlike
/// UCB1, it weights the exploration term by a prior probability supplied
/// by the leaf evaluator rather than assuming a uniform prior, and uses
/// `sqrt(1 + sum(N))` rather than `sqrt(ln(parent_visits))` so that an
/// unvisited parent still produces a finite, prior-driven bonus.
#[derive(Debug, Clone, Copy)]
pub struct PUCTSelector {
    /// Exploration coefficient `c`.
    pub puct_coeff: f64,
}

impl PUCTSelector {
    pub fn new(puct_coeff: f64) -> Self {
        PUCTSelector { puct_coeff }
    }
}

impl Default for PUCTSelector {
    fn default() -> Self {
        Self::new(1.414)
    }
}

impl<S: Clone + Send + Sync> SelectionPolicy<S> for PUCTSelector {
    fn select_action(&self, arena: &Arena<S>, parent: Slot, legal: &[bool]) -> usize {
        let num_actions = arena.num_actions();
        let priors = arena.priors(parent);

        let mut visits = vec![0u32; num_actions];
        let mut values = vec![0.0f64; num_actions];
        for a in 0..num_actions {
            if arena.is_edge(parent, a) {
                let child = arena.child(parent, a);
                visits[a] = arena.visits(child);
                values[a] = arena.value_sum(child);
            }
        }

        let sum_n: u32 = visits.iter().sum();
        let explore_scale = self.puct_coeff * (1.0 + sum_n as f64).sqrt();

        let scores: Vec<f64> = (0..num_actions)
            .map(|a| {
                if !legal[a] {
                    return f64::NEG_INFINITY;
                }
                let n_a = visits[a];
                let q = values[a] / (n_a.max(1) as f64);
                let u = explore_scale * priors[a] as f64 / (1.0 + n_a as f64);
                q + u
            })
            .collect();

        crate::utils::argmax_lowest_index(&scores)
    }
}
