//! The iteration driver: a single select/expand/evaluate/backpropagate cycle.
//!
//! This is the hot loop of the search. [`run_iteration`] starts at the
//! arena's root, descends via a [`SelectionPolicy`] until it falls off the
//! expanded tree or lands on a terminal node, steps the environment (or
//! reuses the terminal's stored value), consults the evaluator, and
//! backpropagates via a [`BackpropagationPolicy`].

use crate::arena::{Arena, Node, Slot, NULL, ROOT};
use crate::env::{Environment, Evaluator};
use crate::policy::{BackpropagationPolicy, SelectionPolicy};
use crate::utils::{mask_illegal, softmax};

/// Where traversal stopped.
enum Stop {
    /// `(parent, action)` at which the edge is either empty or we hit the
    /// depth limit; may still point at an already-allocated child.
    Expand { parent: Slot, action: usize },
    /// An already-terminal node was reached mid-traversal.
    Terminal(Slot),
}

/// Runs one iteration of selection, expansion/evaluation and
/// backpropagation, starting from [`ROOT`].
///
/// `root_to_move` is the player to move at the root embedding — fixed for
/// the whole search (every iteration starts traversal at the root) and
/// used as the perspective a terminal leaf's reward is recorded from.
/// Returns the depth reached, for [`crate::stats::SearchStatistics`].
pub fn run_iteration<Env, Ev>(
    arena: &mut Arena<Env::State>,
    env: &Env,
    evaluator: &Ev,
    selector: &dyn SelectionPolicy<Env::State>,
    backprop: &dyn BackpropagationPolicy<Env::State>,
    root_to_move: usize,
    max_depth_limit: Option<usize>,
) -> u32
where
    Env: Environment,
    Ev: Evaluator<Env::State>,
{
    let mut parent = ROOT;
    let mut action = 0usize;
    let mut depth = 0u32;

    let stop = loop {
        let legal = env.legal_action_mask(arena.embedding(parent));
        action = selector.select_action(arena, parent, &legal);

        if !arena.is_edge(parent, action) {
            break Stop::Expand { parent, action };
        }

        let child = arena.child(parent, action);
        if arena.is_terminal(child) {
            break Stop::Terminal(child);
        }

        if let Some(limit) = max_depth_limit {
            if depth as usize + 1 >= limit {
                break Stop::Expand { parent, action };
            }
        }

        parent = child;
        depth += 1;
    };

    match stop {
        Stop::Terminal(node) => {
            // `node`'s own mean is already its own local value (unflipped,
            // from its own to-move player's perspective — set when it was
            // first created below). Re-credit that same value to `node`
            // itself, then ascend from its parent, flipping the sign once
            // per hop away from `node`.
            let local_value = arena.at(node).value();
            arena.increment_and_add(node, local_value);
            backprop.backpropagate(arena, node, local_value);
            depth
        }
        Stop::Expand { parent, action } => {
            let node_exists = arena.is_edge(parent, action);
            let child_slot = if node_exists { arena.child(parent, action) } else { NULL };

            let state = arena.embedding(parent).clone();
            let concrete_action = env.action_from_id(action);
            let (new_state, reward, mut terminated) = env.step(&state, &concrete_action);
            let legal2 = env.legal_action_mask(&new_state);
            let all_illegal = legal2.iter().all(|&l| !l);
            if all_illegal {
                terminated = true;
            }

            let num_actions = arena.num_actions();
            let (policy, local_value): (Vec<f32>, f64) = if terminated {
                // The environment's reward is reported from the root's
                // to-move player's perspective, the same number regardless
                // of how deep this leaf sits. Converting it to *this* leaf's
                // own perspective needs one flip per ply from the root —
                // the only place this crate reasons in root-relative terms
                // rather than leaf-relative ones, because it is the only
                // place a single fixed reference value is available before
                // any node exists to anchor it to.
                let leaf_depth = depth + 1;
                (vec![0.0; num_actions], reward[root_to_move] * backprop.sign_at_hop(leaf_depth))
            } else {
                // The evaluator already returns its value from the state's
                // own to-move player's perspective, so it needs no sign
                // conversion before being stored as this leaf's own mean.
                let (logits, val) = evaluator.evaluate(&new_state);
                let masked = mask_illegal(&logits, &legal2);
                (softmax(&masked), val as f64)
            };

            if node_exists {
                arena.refresh(child_slot, local_value, &policy, terminated, new_state);
                backprop.backpropagate(arena, child_slot, local_value);
            } else {
                let slot = arena.add_child(
                    parent,
                    action,
                    Node { n: 1, w: local_value, p: policy, terminal: terminated, embedding: new_state },
                );
                if slot != NULL {
                    backprop.backpropagate(arena, slot, local_value);
                } else {
                    // Arena full: no new node to anchor on, but the path up
                    // to the root is still credited, starting one hop away
                    // from the leaf that would have been `slot`.
                    backprop.backpropagate_from(arena, parent, 1, local_value);
                }
            }

            depth + 1
        }
    }
}
