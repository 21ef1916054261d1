//! Root manager: root-node (re)initialization, Dirichlet noise injection,
//! and action sampling at the end of a search.

use rand::Rng;

use crate::arena::{Arena, Node, ROOT};
use crate::config::MCTSConfig;
use crate::env::{Environment, Evaluator};
use crate::utils::{argmax_lowest_index, mask_illegal, sample_categorical, sample_dirichlet_noise};

/// Evaluates `root_embedding` and (re)writes slot [`ROOT`], injecting
/// Dirichlet noise into the prior. If the root was already populated by a
/// previous search (the common case after [`crate::mcts::MCTSEngine::commit`]
/// promotes a child into the root), its accumulated `n`/`w` are preserved
/// rather than reset, so visit statistics survive across moves. A freshly
/// reset root starts at `n = 1, w = v0` (the root counts as its own first
/// visit, matching the invariant that every allocated node has `n >= 1`).
pub fn update_root<Env, Ev, R: Rng>(
    arena: &mut Arena<Env::State>,
    env: &Env,
    evaluator: &Ev,
    config: &MCTSConfig,
    root_embedding: Env::State,
    rng: &mut R,
) where
    Env: Environment,
    Ev: Evaluator<Env::State>,
{
    let legal = env.legal_action_mask(&root_embedding);
    let (logits, value) = evaluator.evaluate(&root_embedding);
    let masked = mask_illegal(&logits, &legal);
    let mut policy = crate::utils::softmax(&masked);

    let noise = sample_dirichlet_noise(config.dirichlet_alpha, policy.len(), rng);
    let eps = config.dirichlet_epsilon as f32;
    for (p, n) in policy.iter_mut().zip(noise.iter()) {
        *p = (1.0 - eps) * *p + eps * *n;
    }

    let already_visited = arena.visits(ROOT) > 0;
    let (n, w) = if already_visited {
        (arena.visits(ROOT), arena.value_sum(ROOT))
    } else {
        (1, value as f64)
    };

    arena.write_root(Node { n, w, p: policy, terminal: false, embedding: root_embedding });
}

/// Samples an action from the root's visit-count distribution with
/// temperature `config.temperature`.
///
/// `temperature == 0.0` is argmax over visit counts, tie-broken by the
/// lowest action index; otherwise each legal action's weight is
/// `n_a^(1/temperature)`, sampled categorically.
pub fn sample_root_action<S: Clone + Send + Sync, R: Rng>(
    arena: &Arena<S>,
    legal: &[bool],
    temperature: f64,
    rng: &mut R,
) -> usize {
    let num_actions = arena.num_actions();
    let visits: Vec<f64> = (0..num_actions)
        .map(|a| {
            if !legal[a] || !arena.is_edge(ROOT, a) {
                return 0.0;
            }
            arena.visits(arena.child(ROOT, a)) as f64
        })
        .collect();

    if temperature <= 0.0 {
        return argmax_lowest_index(&visits);
    }

    let weights: Vec<f64> = visits.iter().map(|&n| n.powf(1.0 / temperature)).collect();
    if weights.iter().sum::<f64>() <= 0.0 {
        return argmax_lowest_index(&visits);
    }
    sample_categorical(&weights, rng)
}

/// The visit-count policy over the root's actions, normalized to sum to 1
/// (illegal or unexpanded actions are `0`). Exposed to callers as training
/// targets via [`crate::mcts::MCTSEngine::policy`].
pub fn root_policy<S: Clone + Send + Sync>(arena: &Arena<S>, legal: &[bool]) -> Vec<f64> {
    let num_actions = arena.num_actions();
    let visits: Vec<f64> = (0..num_actions)
        .map(|a| {
            if !legal[a] || !arena.is_edge(ROOT, a) {
                return 0.0;
            }
            arena.visits(arena.child(ROOT, a)) as f64
        })
        .collect();
    let total: f64 = visits.iter().sum();
    if total <= 0.0 {
        return vec![0.0; num_actions];
    }
    visits.into_iter().map(|v| v / total).collect()
}
