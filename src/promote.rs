//! Subtree promoter: after a move is committed, discard everything
//! except the committed action's subtree and relabel it so the child
//! becomes the new [`ROOT`].
//!
//! This is a fixed-trip-count label propagation: a breadth-first sweep
//! bounded by the arena's capacity (so it terminates even if the arena
//! were ever misused in a way that defeats the tree invariant) assigns
//! every retained slot a new, densely-packed index, then a second pass
//! rewrites every per-slot array — including `parent` and `edge`, which
//! are themselves slot indices and need translating like any other
//! reference to a slot.

use crate::arena::{Arena, Slot, NULL, ROOT};

/// Promotes the subtree rooted at `(ROOT, action)` into the new root.
///
/// Returns `true` if a subtree was promoted, `false` if the action was
/// never expanded at the root (in which case the arena is simply reset —
/// the next [`crate::root::update_root`] call populates a fresh root from
/// scratch).
pub fn promote<S: Clone + Send + Sync>(arena: &mut Arena<S>, action: usize) -> bool {
    let old_child = arena.child(ROOT, action);
    if old_child == NULL {
        arena.reset();
        return false;
    }

    let capacity = arena.capacity();
    let num_actions = arena.num_actions();

    let mut translate = vec![NULL; capacity];
    let mut order = Vec::with_capacity(capacity);
    translate[old_child as usize] = ROOT;
    order.push(old_child);

    let mut frontier = vec![old_child];
    let mut next_new_slot = ROOT + 1;
    let mut trips = 0usize;
    while !frontier.is_empty() && trips <= capacity {
        trips += 1;
        let mut next_frontier = Vec::new();
        for &old_parent in &frontier {
            for a in 0..num_actions {
                if arena.is_edge(old_parent, a) {
                    let old_grandchild = arena.child(old_parent, a);
                    if translate[old_grandchild as usize] == NULL {
                        translate[old_grandchild as usize] = next_new_slot;
                        next_new_slot += 1;
                        order.push(old_grandchild);
                        next_frontier.push(old_grandchild);
                    }
                }
            }
        }
        frontier = next_frontier;
    }

    let mut new_n = vec![0u32; capacity];
    let mut new_w = vec![0.0f64; capacity];
    let mut new_p = vec![0.0f32; capacity * num_actions];
    let mut new_terminal = vec![false; capacity];
    let mut new_parent = vec![NULL; capacity];
    let mut new_embedding: Vec<Option<S>> = (0..capacity).map(|_| None).collect();
    let mut new_edge = vec![NULL; capacity * num_actions];

    for &old_slot in &order {
        let new_slot = translate[old_slot as usize];
        let view = arena.at(old_slot);

        new_n[new_slot as usize] = view.n;
        new_w[new_slot as usize] = view.w;
        new_terminal[new_slot as usize] = view.terminal;
        new_embedding[new_slot as usize] = Some(view.embedding.clone());

        let new_row = new_slot as usize * num_actions;
        new_p[new_row..new_row + num_actions].copy_from_slice(view.p);

        new_parent[new_slot as usize] = if old_slot == old_child {
            NULL
        } else {
            translate[view.parent as usize]
        };

        for a in 0..num_actions {
            if arena.is_edge(old_slot, a) {
                let old_grandchild = arena.child(old_slot, a);
                let new_grandchild = translate[old_grandchild as usize];
                new_edge[new_row + a] = new_grandchild;
            }
        }
    }

    let (n, w, p, terminal, parent, embedding, edge) = arena.raw_parts_mut();
    *n = new_n;
    *w = new_w;
    *p = new_p;
    *terminal = new_terminal;
    *parent = new_parent;
    *embedding = new_embedding;
    *edge = new_edge;

    arena.set_next_empty(next_new_slot);
    arena.reset_depth_tracking();

    let discarded = capacity as Slot - next_new_slot;
    log::debug!(
        "promoted subtree for action {}: {} nodes retained, {} discarded",
        action,
        order.len(),
        discarded.saturating_sub(1),
    );

    true
}
