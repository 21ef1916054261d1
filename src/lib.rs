//! # puct-mcts
//!
//! A batched PUCT/MCTS engine for self-play reinforcement learning: a
//! fixed-capacity tree arena with subtree reuse, PUCT selection, Dirichlet
//! root noise, and a select/expand/evaluate/backpropagate iteration driver.
//!
//! This crate is the search core only. It does not implement a game
//! environment or a neural network evaluator — those are external
//! collaborators you provide by implementing [`Environment`] and
//! [`Evaluator`]. See `demos/tic_tac_toe.rs` for a worked example.
//!
//! ## Basic usage
//!
//! ```
//! use puct_mcts::{MCTSConfig, MCTSEngine};
//! # use puct_mcts::{Environment, Evaluator, Action};
//! # #[derive(Clone, Debug)]
//! # struct Move(usize);
//! # impl Action for Move { fn id(&self) -> usize { self.0 } }
//! # #[derive(Clone)]
//! # struct Coin(u8); // 0 = heads up, terminal after one flip
//! # struct CoinGame;
//! # impl Environment for CoinGame {
//! #     type State = Coin;
//! #     type Action = Move;
//! #     fn initial_state(&self, _seed: u64) -> Coin { Coin(0) }
//! #     fn step(&self, _s: &Coin, _a: &Move) -> (Coin, Vec<f64>, bool) { (Coin(1), vec![1.0, -1.0], true) }
//! #     fn legal_action_mask(&self, _s: &Coin) -> Vec<bool> { vec![true] }
//! #     fn num_players(&self) -> usize { 2 }
//! #     fn action_shape(&self) -> usize { 1 }
//! #     fn current_player(&self, _s: &Coin) -> usize { 0 }
//! #     fn action_from_id(&self, id: usize) -> Move { Move(id) }
//! # }
//! # struct Uniform;
//! # impl Evaluator<Coin> for Uniform {
//! #     fn evaluate(&self, _s: &Coin) -> (Vec<f32>, f32) { (vec![0.0], 0.0) }
//! # }
//!
//! let env = CoinGame;
//! let evaluator = Uniform;
//! let config = MCTSConfig::default().with_num_iterations(8);
//!
//! let mut engine = MCTSEngine::new(&env, &evaluator, config).unwrap();
//! engine.reset(42);
//! let root_embedding = env.initial_state(42);
//! let output = engine.search(root_embedding, 8).unwrap();
//! println!("sampled action: {:?}, root value: {}", output.sampled_action, output.root_value);
//! ```
//!
//! ## How it works
//!
//! Each call to [`MCTSEngine::search`] runs four phases per iteration:
//!
//! 1. **Selection** — from the root, descend via PUCT until an
//!    unexpanded edge or a terminal node is reached.
//! 2. **Expansion/Evaluation** — step the environment along the chosen
//!    action, invoke the leaf evaluator, and materialize (or refresh) the
//!    child node.
//! 3. **Backpropagation** — walk back to the root, incrementing visit
//!    counts and accumulating signed value.
//! 4. Repeat for `num_iterations`, then sample an action from the root's
//!    visit distribution.
//!
//! After the caller commits to a real move, [`MCTSEngine::commit`]
//! promotes that child's subtree into the new root and discards
//! everything else, so the next search starts warm.

pub mod arena;
pub mod config;
pub mod driver;
pub mod env;
pub mod mcts;
pub mod policy;
pub mod promote;
pub mod root;
pub mod stats;
pub mod utils;

pub use arena::{Arena, Node, NodeView};
pub use config::MCTSConfig;
pub use env::{Action, Environment, Evaluator};
pub use mcts::{MCTSEngine, SearchOutput};
pub use policy::{BackpropagationPolicy, SelectionPolicy};
pub use stats::SearchStatistics;

/// Error type for the MCTS engine's public API.
///
/// This only ever surfaces construction-time misconfiguration and
/// programming errors (e.g. committing an action the root never
/// explored). Arena exhaustion and non-finite evaluator output are
/// documented degradations, not errors — they never produce one of these
/// variants.
#[derive(thiserror::Error, Debug)]
pub enum MCTSError {
    /// The supplied configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The root has no legal actions to search or sample from.
    #[error("no legal actions available from the root state")]
    NoLegalActions,

    /// [`MCTSEngine::commit`] was called with an action never explored at the root.
    #[error("action {0} was never expanded at the root")]
    ActionNotFound(usize),
}

/// Result type for MCTS operations.
pub type Result<T> = std::result::Result<T, MCTSError>;
