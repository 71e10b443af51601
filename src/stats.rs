//! Statistics collection for MCTS searches
//!
//! This module provides structures for collecting and reporting statistics
//! about a stepped search.

use std::time::Duration;

/// Statistics collected during a search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    /// Number of completed iterations
    pub iterations: usize,

    /// Number of steps handed out so far
    pub steps: usize,

    /// Total number of nodes in the tree
    pub tree_size: usize,

    /// Maximum depth reached in the tree
    pub max_depth: usize,

    /// Iterations whose selection ended on a terminal node
    pub terminal_selections: usize,

    /// Time spent inside the search, excluding time the caller held a step
    pub total_time: Duration,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            steps: 0,
            tree_size: 1, // Start with root node
            max_depth: 0,
            terminal_selections: 0,
            total_time: Duration::from_secs(0),
        }
    }

    /// Returns the number of iterations per second
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "MCTS Search Statistics:\n\
             - Iterations: {}\n\
             - Steps: {}\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Terminal selections: {}\n\
             - Total time: {:.3} seconds\n\
             - Iterations per second: {:.1}",
            self.iterations,
            self.steps,
            self.tree_size,
            self.max_depth,
            self.terminal_selections,
            self.total_time.as_secs_f64(),
            self.iterations_per_second(),
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
