//! Selection policy for the MCTS algorithm
//!
//! Selection descends from the root to a leaf, always taking the child with
//! the highest UCT score.

use crate::{
    tree::{NodeId, SearchTree},
    utils, MCTSError, Result,
};

/// Upper Confidence bound applied to Trees (UCT)
///
/// ```text
/// UCT = value / visits + exploration_constant * sqrt(ln(parent_visits) / visits)
/// ```
///
/// Where:
/// - `value / visits` is the mean reward credited to this node
/// - `exploration_constant` controls the balance between exploration and exploitation
/// - `parent_visits` is the number of visits to the parent node
/// - `visits` is the number of visits to this node
///
/// The root has no parent and scores 0; unvisited nodes score infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UctPolicy {
    /// Exploration constant, fixed for the whole search
    pub exploration_constant: f64,
}

impl UctPolicy {
    /// Creates a new UCT policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UctPolicy {
            exploration_constant,
        }
    }

    /// Calculates the UCT value of a node of the tree
    pub fn uct_value(&self, tree: &SearchTree, id: NodeId) -> f64 {
        let node = tree.get(id);
        match node.parent {
            None => 0.0,
            Some(parent) => utils::uct_score(
                node.value,
                node.visits,
                tree.get(parent).visits,
                self.exploration_constant,
            ),
        }
    }

    /// Returns the child with the strictly greatest UCT value
    ///
    /// On ties the first child wins.
    pub fn best_child(&self, tree: &SearchTree, id: NodeId) -> Result<NodeId> {
        let mut best = None;
        let mut best_uct = f64::NEG_INFINITY;

        for &child in &tree.get(id).children {
            let uct = self.uct_value(tree, child);
            if uct > best_uct {
                best_uct = uct;
                best = Some(child);
            }
        }

        best.ok_or(MCTSError::NoChildren { node: id.index() })
    }

    /// Descends from the root to a leaf
    ///
    /// Returns the visited nodes, root first and leaf last.
    pub fn select(&self, tree: &SearchTree) -> Result<Vec<NodeId>> {
        let mut path = vec![tree.root()];
        let mut current = tree.root();

        while !tree.get(current).is_leaf() {
            current = self.best_child(tree, current)?;
            path.push(current);
        }

        Ok(path)
    }
}

impl Default for UctPolicy {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}
