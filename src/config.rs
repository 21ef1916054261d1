//! Configuration options for the MCTS algorithm
//!
//! This module defines the configuration parameters that control the
//! behavior of the search, along with construction-time validation so a
//! misconfigured engine fails fast rather than producing garbage searches.

use crate::MCTSError;

/// Configuration for the MCTS algorithm.
///
/// Use the builder methods to create a customized configuration, then
/// pass it to [`crate::MCTSEngine::new`], which validates it.
///
/// # Example
///
/// ```
/// use puct_mcts::MCTSConfig;
///
/// let config = MCTSConfig::default()
///     .with_puct_coeff(1.5)
///     .with_num_iterations(400)
///     .with_dirichlet(0.3, 0.25)
///     .with_temperature(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Fixed node capacity of the tree arena (`MAX_NODES`).
    pub max_nodes: usize,

    /// PUCT exploration coefficient `c`.
    pub puct_coeff: f64,

    /// Dirichlet concentration parameter `alpha` for root noise.
    pub dirichlet_alpha: f64,

    /// Fraction of root-prior mass replaced by Dirichlet noise, `epsilon ∈ [0, 1]`.
    pub dirichlet_epsilon: f64,

    /// Number of iterations to run per `search()` call.
    pub num_iterations: usize,

    /// Temperature for action sampling from visit counts. `0` means argmax.
    pub temperature: f64,

    /// Backpropagation discount/sign. `-1.0` for two-player zero-sum
    /// (the default), `+1.0` for cooperative games.
    pub discount: f64,

    /// Optional cap on traversal depth per iteration.
    pub max_depth: Option<usize>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            max_nodes: 1_024,
            puct_coeff: 1.414,
            dirichlet_alpha: 0.3,
            dirichlet_epsilon: 0.25,
            num_iterations: 800,
            temperature: 1.0,
            discount: -1.0,
            max_depth: None,
        }
    }
}

impl MCTSConfig {
    /// Sets the tree arena's fixed node capacity.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Sets the PUCT exploration coefficient.
    pub fn with_puct_coeff(mut self, c: f64) -> Self {
        self.puct_coeff = c;
        self
    }

    /// Sets the Dirichlet noise parameters (`alpha`, `epsilon`).
    pub fn with_dirichlet(mut self, alpha: f64, epsilon: f64) -> Self {
        self.dirichlet_alpha = alpha;
        self.dirichlet_epsilon = epsilon;
        self
    }

    /// Sets the number of iterations run per search.
    pub fn with_num_iterations(mut self, iterations: usize) -> Self {
        self.num_iterations = iterations;
        self
    }

    /// Sets the action-sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the backpropagation discount (`-1.0` zero-sum, `+1.0` cooperative).
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Sets a maximum traversal depth per iteration.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Validates the configuration against an action count: construction
    /// fails if `max_nodes < 2`, `num_actions < 1`, `epsilon ∉ [0, 1]`,
    /// `alpha <= 0`, or `c < 0`.
    pub fn validate(&self, num_actions: usize) -> Result<(), MCTSError> {
        if self.max_nodes < 2 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "max_nodes must be >= 2, got {}",
                self.max_nodes
            )));
        }
        if num_actions < 1 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "action count must be >= 1, got {num_actions}"
            )));
        }
        if !(0.0..=1.0).contains(&self.dirichlet_epsilon) {
            return Err(MCTSError::InvalidConfiguration(format!(
                "dirichlet_epsilon must be in [0, 1], got {}",
                self.dirichlet_epsilon
            )));
        }
        if self.dirichlet_alpha <= 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "dirichlet_alpha must be > 0, got {}",
                self.dirichlet_alpha
            )));
        }
        if self.puct_coeff < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "puct_coeff must be >= 0, got {}",
                self.puct_coeff
            )));
        }
        Ok(())
    }
}
