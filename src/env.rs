//! External collaborator traits: the game environment and the leaf evaluator.
//!
//! These are the two contracts a caller is responsible for implementing.
//! The engine never implements either — it only drives them.

use std::fmt::Debug;

/// A move in the environment.
///
/// The arena and selector only ever need an action's index into the
/// fixed-width prior/edge rows; `id()` is that index.
pub trait Action: Clone + Debug + Send + Sync {
    /// Index of this action in `0..num_actions`.
    fn id(&self) -> usize;
}

/// The game environment collaborator.
///
/// Must be pure: `step` is a deterministic function of `(state, action)`,
/// and `legal_action_mask`/`current_player` are deterministic functions
/// of `state` alone. The engine calls these freely while traversing and
/// never mutates a `State` in place.
pub trait Environment: Send + Sync {
    type State: Clone + Send + Sync;
    type Action: Action;

    /// Produces the initial state for a fresh search, seeded for
    /// reproducibility where the environment has any randomness of its own
    /// (e.g. a random starting position).
    fn initial_state(&self, seed: u64) -> Self::State;

    /// Applies `action` to `state`, returning the successor state, the
    /// per-player reward vector (length [`Environment::num_players`]), and
    /// whether the successor is terminal.
    fn step(&self, state: &Self::State, action: &Self::Action) -> (Self::State, Vec<f64>, bool);

    /// Legal-action mask of length [`Environment::action_shape`].
    fn legal_action_mask(&self, state: &Self::State) -> Vec<bool>;

    /// Number of players in the game (2 for the classic zero-sum case).
    fn num_players(&self) -> usize;

    /// Width of the (flattened) action space, `A`.
    fn action_shape(&self) -> usize;

    /// Index (`0..num_players`) of the player to move in `state`.
    fn current_player(&self, state: &Self::State) -> usize;

    /// Inverse of [`Action::id`]: reconstructs the concrete action for a
    /// given index so the driver can call [`Environment::step`] after the
    /// selector has chosen an index.
    fn action_from_id(&self, id: usize) -> Self::Action;
}

/// The leaf evaluator collaborator.
///
/// Must be pure given its parameters: `evaluate` is a deterministic
/// function of the observation alone.
pub trait Evaluator<State>: Send + Sync {
    /// Returns `(policy_logits, value_estimate)`: unnormalized logits of
    /// length `A` and a scalar value in `[-1, 1]` from the perspective of
    /// the player to move in `state`.
    fn evaluate(&self, state: &State) -> (Vec<f32>, f32);
}
