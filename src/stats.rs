//! Statistics collection for MCTS searches
//!
//! This module provides a structure for reporting statistics about a
//! completed search: how many iterations ran, how much of the arena they
//! used, and how deep the tree grew.

use std::time::Duration;

/// Statistics collected during an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of iterations performed.
    pub iterations: usize,

    /// Total time spent searching.
    pub total_time: Duration,

    /// Number of node slots allocated in the arena (including the root).
    pub tree_size: usize,

    /// Maximum depth reached during traversal.
    pub max_depth: u32,

    /// Whether the arena ran out of node slots during this search.
    pub arena_exhausted: bool,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object.
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1,
            max_depth: 0,
            arena_exhausted: false,
        }
    }

    /// Average time per iteration, in microseconds.
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Iterations per second.
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// A human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "MCTS Search Statistics:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Avg time per iteration: {:.3} µs\n\
             - Iterations per second: {:.1}\n\
             - Arena exhausted: {}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
            self.arena_exhausted,
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
