//! Policies for different phases of the MCTS algorithm
//!
//! This module contains the pluggable policies used by the iteration
//! driver:
//! - Selection policies: how to choose an action to descend through during traversal
//! - Backpropagation policies: how to update node statistics on the way back to the root

pub mod backpropagation;
pub mod selection;

pub use backpropagation::{BackpropagationPolicy, PerPlayerPolicy, ZeroSumPolicy};
pub use selection::{PUCTSelector, SelectionPolicy};
