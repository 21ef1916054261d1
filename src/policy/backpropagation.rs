//! Backpropagation policies for the MCTS algorithm
//!
//! Backpropagation policies determine how a leaf's value is folded back
//! into the statistics of every node on the path to the root.
//!
//! The sign a node receives depends on its distance *from the node whose
//! value is being propagated* (hop `0`, always unflipped, since that
//! node's own value is already stored from its own to-move player's
//! perspective), and alternates (or tiles, for N-player games) outward
//! from there, one flip per ply. It is not a function of absolute depth
//! from the root: a shared ancestor is reached by leaves at many different
//! depths over the course of a search, and what makes it that ancestor's
//! own-perspective value is how many plies separate it from whichever leaf
//! is currently being credited, not how far it sits from the root.

use crate::arena::{Arena, Slot, NULL, ROOT};

/// Trait for policies that backpropagate a node's own value up the tree.
///
/// `leaf` already has its own `n`/`w` set directly by the driver (its
/// stored value is unflipped, from its own to-move player's perspective);
/// [`BackpropagationPolicy::backpropagate`] walks from `leaf`'s parent up
/// to the root, flipping the sign once per hop away from `leaf`.
pub trait BackpropagationPolicy<S: Clone + Send + Sync>: Send + Sync {
    /// The sign applied to a value that is `hop` plies away from the node
    /// whose own perspective it was originally recorded in. `hop == 0` is
    /// that node itself and is always `1.0`.
    fn sign_at_hop(&self, hop: u32) -> f64;

    /// Walks from `start` up to the root, adding `value * sign_at_hop(hop)`
    /// to each visited node's `w` and incrementing its `n`, with `hop`
    /// counting up from `start_hop` at `start` itself.
    ///
    /// Used directly when the leaf whose value is being propagated was
    /// never materialized as a node (arena exhaustion): `start` is then the
    /// leaf's would-be parent, one hop away.
    fn backpropagate_from(&self, arena: &mut Arena<S>, start: Slot, start_hop: u32, value: f64) {
        let mut node = start;
        let mut hop = start_hop;
        loop {
            if node == NULL {
                break;
            }
            arena.increment_and_add(node, value * self.sign_at_hop(hop));
            if node == ROOT {
                break;
            }
            node = arena.parent_of(node);
            hop += 1;
        }
    }

    /// Walks from `leaf`'s parent up to the root, adding
    /// `leaf_value * sign_at_hop(hop)` to each visited node's `w` and
    /// incrementing its `n`, with `hop` counting up from `1` at `leaf`'s
    /// parent. `leaf` itself is not touched — its own `n`/`w` are set
    /// directly by the caller before this runs.
    fn backpropagate(&self, arena: &mut Arena<S>, leaf: Slot, leaf_value: f64) {
        if leaf == ROOT {
            return;
        }
        self.backpropagate_from(arena, arena.parent_of(leaf), 1, leaf_value);
    }
}

/// Standard two-player zero-sum backpropagation.
///
/// `sign_at_hop(k) = discount^k`: `-1.0` for zero-sum (sign alternates
/// every ply away from the credited node), `+1.0` for cooperative games
/// where every player shares the same value.
#[derive(Debug, Clone, Copy)]
pub struct ZeroSumPolicy {
    pub discount: f64,
}

impl ZeroSumPolicy {
    pub fn new(discount: f64) -> Self {
        ZeroSumPolicy { discount }
    }
}

impl<S: Clone + Send + Sync> BackpropagationPolicy<S> for ZeroSumPolicy {
    fn sign_at_hop(&self, hop: u32) -> f64 {
        self.discount.powi(hop as i32)
    }
}

/// Per-player credit assignment for N-player games.
///
/// Assigns `+value` every `num_players` plies away from the credited node
/// (the same player is to move again there) and `-value` at every other
/// ply — equivalent to [`ZeroSumPolicy`] with `discount = -1.0` when
/// `num_players == 2`.
///
/// This assumes strictly alternating turn order; games with variable turn
/// order need a per-ply player tag instead of this positional tiling. That
/// is left as a configuration extension point rather than guessed at here.
#[derive(Debug, Clone, Copy)]
pub struct PerPlayerPolicy {
    num_players: usize,
}

impl PerPlayerPolicy {
    pub fn new(num_players: usize) -> Self {
        debug_assert!(num_players >= 1);
        PerPlayerPolicy { num_players }
    }
}

impl<S: Clone + Send + Sync> BackpropagationPolicy<S> for PerPlayerPolicy {
    fn sign_at_hop(&self, hop: u32) -> f64 {
        if hop as usize % self.num_players == 0 {
            1.0
        } else {
            -1.0
        }
    }
}
