//! # stepwise-mcts
//!
//! A Monte Carlo Tree Search (MCTS) over 3x3 tic-tac-toe that exposes its
//! progress as a sequence of discrete, inspectable steps instead of a single
//! final answer.
//!
//! Every phase boundary of every iteration produces a [`StepResult`]: the
//! phase that just finished, the iteration number and a frozen
//! [`TreeSnapshot`] of the whole search tree annotated with freshly computed
//! UCT and mean values. The caller pulls steps one at a time, so a viewer can
//! walk through the search at its own pace.
//!
//! ## Basic Usage
//!
//! ```
//! use stepwise_mcts::{MCTSConfig, Phase, MCTS};
//!
//! fn main() -> Result<(), stepwise_mcts::MCTSError> {
//!     let config = MCTSConfig::default()
//!         .with_iterations(1)
//!         .with_seed(7);
//!
//!     let mut mcts = MCTS::new(config)?;
//!
//!     let mut phases = Vec::new();
//!     while let Some(step) = mcts.step()? {
//!         phases.push(step.phase);
//!     }
//!
//!     assert_eq!(
//!         phases,
//!         vec![
//!             Phase::Start,
//!             Phase::Selection,
//!             Phase::Expansion,
//!             Phase::Simulation,
//!             Phase::Backpropagation,
//!             Phase::Done,
//!         ]
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Each iteration runs the four classic MCTS phases:
//!
//! 1. **Selection**: starting at the root, descend to a leaf by always taking
//!    the child with the highest UCT score.
//!
//! 2. **Expansion**: if the leaf is not terminal, create one child per legal
//!    move and pick one of them at random.
//!
//! 3. **Simulation**: play uniformly random moves from that node until the game
//!    ends. The end position is shown as a temporary child in the snapshot.
//!
//! 4. **Backpropagation**: walk back to the root, counting a visit on every
//!    node and crediting each non-root node with the reward of the player who
//!    was to move at its parent.
//!
//! Running the whole search in one go is also possible:
//!
//! ```
//! use stepwise_mcts::{MCTSConfig, MCTS};
//!
//! # fn main() -> Result<(), stepwise_mcts::MCTSError> {
//! let mut mcts = MCTS::new(MCTSConfig::default().with_iterations(200))?;
//! let done = mcts.run()?;
//!
//! assert_eq!(done.tree.root().visits, 200);
//! println!("{}", done.tree.visualize());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod game_state;
pub mod mcts;
pub mod policy;
pub mod presentation;
pub mod snapshot;
pub mod stats;
pub mod tictactoe;
pub mod tree;
pub mod utils;

pub use config::MCTSConfig;
pub use game_state::{Board, GameRules, Mark, Outcome, Player};
pub use mcts::{Phase, StepResult, MCTS};
pub use presentation::{Annotations, NodeFlags};
pub use snapshot::{SnapshotNode, TreeSnapshot};
pub use stats::SearchStatistics;
pub use tictactoe::TicTacToe;
pub use tree::{MCTSNode, NodeId, NodePath, SearchTree};

/// Error types for the MCTS algorithm
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MCTSError {
    /// A best child was requested from a node without children
    #[error("Node {node} has no children to select from")]
    NoChildren {
        /// Index of the offending node
        node: usize,
    },

    /// The rules reported a non-terminal state without any legal moves
    #[error("No legal moves from non-terminal state {state}")]
    NoLegalMoves {
        /// Text form of the offending board
        state: String,
    },

    /// Search was stopped before completion
    #[error("Search stopped: {0}")]
    SearchStopped(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A board could not be parsed from its text form
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// A path does not lead to a node of the snapshot
    #[error("No node at {0}")]
    InvalidPath(NodePath),
}

/// Result type for MCTS operations
pub type Result<T> = std::result::Result<T, MCTSError>;
