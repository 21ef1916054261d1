//! The top-level search engine: wires the arena, root manager, iteration
//! driver and subtree promoter into the public API.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::arena::{Arena, ROOT};
use crate::config::MCTSConfig;
use crate::driver::run_iteration;
use crate::env::{Environment, Evaluator};
use crate::policy::{BackpropagationPolicy, PUCTSelector, PerPlayerPolicy, SelectionPolicy, ZeroSumPolicy};
use crate::promote;
use crate::root::{root_policy, sample_root_action, update_root};
use crate::stats::SearchStatistics;
use crate::{MCTSError, Result};

/// The result of one [`MCTSEngine::search`] call.
#[derive(Debug, Clone)]
pub struct SearchOutput {
    /// Action index sampled from the root's visit distribution.
    pub sampled_action: usize,

    /// The root's mean value estimate after search, from the root's
    /// to-move player's perspective.
    pub root_value: f64,

    /// The root's visit-count distribution over all actions, normalized
    /// to sum to `1` (`0` for illegal or unexpanded actions). A training
    /// target, not necessarily equal to a one-hot at `sampled_action`.
    pub action_weights: Vec<f64>,
}

/// The batched PUCT/MCTS search engine.
///
/// Holds the fixed-capacity [`Arena`], the pluggable selection and
/// backpropagation policies, and the RNG used for Dirichlet noise and
/// action sampling. Borrows its [`Environment`] and [`Evaluator`]
/// collaborators for its whole lifetime rather than owning them, since
/// both are expected to be cheaply shared (e.g. a rules engine and a
/// neural network wrapper reused across many searches).
pub struct MCTSEngine<'a, Env, Ev>
where
    Env: Environment,
    Ev: Evaluator<Env::State>,
{
    env: &'a Env,
    evaluator: &'a Ev,
    config: MCTSConfig,
    arena: Arena<Env::State>,
    selector: Box<dyn SelectionPolicy<Env::State>>,
    backprop: Box<dyn BackpropagationPolicy<Env::State>>,
    rng: StdRng,
    stats: SearchStatistics,
    last_legal: Vec<bool>,
    last_action_weights: Vec<f64>,
}

impl<'a, Env, Ev> MCTSEngine<'a, Env, Ev>
where
    Env: Environment,
    Ev: Evaluator<Env::State>,
{
    /// Builds a new engine, validating `config` against `env.action_shape()`.
    ///
    /// Selects [`ZeroSumPolicy`] for two-player (or solitaire) games and
    /// [`PerPlayerPolicy`] for `env.num_players() > 2`: N-player credit
    /// assignment is a configuration extension point, not something this
    /// crate guesses a universal rule for.
    pub fn new(env: &'a Env, evaluator: &'a Ev, config: MCTSConfig) -> Result<Self> {
        config.validate(env.action_shape())?;

        let arena = Arena::new(config.max_nodes, env.action_shape());
        let selector = Box::new(PUCTSelector::new(config.puct_coeff));
        let backprop: Box<dyn BackpropagationPolicy<Env::State>> = if env.num_players() <= 2 {
            Box::new(ZeroSumPolicy::new(config.discount))
        } else {
            Box::new(PerPlayerPolicy::new(env.num_players()))
        };

        Ok(MCTSEngine {
            env,
            evaluator,
            config,
            arena,
            selector,
            backprop,
            rng: StdRng::seed_from_u64(0),
            stats: SearchStatistics::new(),
            last_legal: Vec::new(),
            last_action_weights: Vec::new(),
        })
    }

    /// Reseeds the RNG and clears the tree arena. Call before the first
    /// search of a fresh episode.
    pub fn reset(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.arena.reset();
        self.stats = SearchStatistics::new();
    }

    /// Runs `num_iterations` of select/expand/evaluate/backpropagate from
    /// `root_embedding` and samples an action from the resulting visit
    /// distribution.
    ///
    /// Returns [`MCTSError::NoLegalActions`] if `root_embedding` has no
    /// legal actions at all — callers are expected to detect terminal
    /// states themselves and not call `search` on them.
    pub fn search(&mut self, root_embedding: Env::State, num_iterations: usize) -> Result<SearchOutput> {
        let legal = self.env.legal_action_mask(&root_embedding);
        if legal.iter().all(|&l| !l) {
            return Err(MCTSError::NoLegalActions);
        }

        let root_to_move = self.env.current_player(&root_embedding);
        update_root(&mut self.arena, self.env, self.evaluator, &self.config, root_embedding, &mut self.rng);

        let start = Instant::now();
        let mut max_depth = 0u32;
        for _ in 0..num_iterations {
            let depth = run_iteration(
                &mut self.arena,
                self.env,
                self.evaluator,
                self.selector.as_ref(),
                self.backprop.as_ref(),
                root_to_move,
                self.config.max_depth,
            );
            max_depth = max_depth.max(depth);
        }
        self.arena.set_depth(max_depth);

        self.stats.iterations += num_iterations;
        self.stats.total_time += start.elapsed();
        self.stats.tree_size = self.arena.len();
        self.stats.max_depth = self.arena.max_depth();
        self.stats.arena_exhausted = self.arena.is_full();

        let sampled_action = sample_root_action(&self.arena, &legal, self.config.temperature, &mut self.rng);
        let root_value = self.arena.at(ROOT).value();
        let action_weights = root_policy(&self.arena, &legal);

        self.last_legal = legal;
        self.last_action_weights = action_weights.clone();

        Ok(SearchOutput { sampled_action, root_value, action_weights })
    }

    /// Commits to `action`, promoting its subtree into the new root so the
    /// next [`MCTSEngine::search`] starts warm.
    ///
    /// `terminated` should be `true` if the environment reports the state
    /// reached by `action` as terminal — in that case the subtree (which
    /// can never be searched again) is discarded outright rather than
    /// promoted. Fails with [`MCTSError::ActionNotFound`] if `action` was
    /// never expanded at the root during the last search.
    pub fn commit(&mut self, action: usize, terminated: bool) -> Result<()> {
        if !self.arena.is_edge(ROOT, action) {
            return Err(MCTSError::ActionNotFound(action));
        }

        if terminated {
            self.arena.reset();
        } else {
            promote::promote(&mut self.arena, action);
        }

        Ok(())
    }

    /// The root's visit-count policy from the most recent [`MCTSEngine::search`] call.
    pub fn policy(&self) -> &[f64] {
        &self.last_action_weights
    }

    /// Statistics from the most recent [`MCTSEngine::search`] call.
    pub fn stats(&self) -> &SearchStatistics {
        &self.stats
    }
}
