//! Backpropagation policy for the MCTS algorithm
//!
//! Backpropagation carries the result of a rollout from the node it started
//! at back up to the root.

use crate::{
    game_state::{GameRules, Outcome},
    tree::{NodeId, SearchTree},
};

/// Standard backpropagation policy
///
/// Every node on the way up gains one visit. Every node except the root also
/// gains the reward of the player who was to move at its parent, since that
/// player chose to move into it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }

    /// Updates the statistics from `from` up to the root
    ///
    /// Returns the updated nodes, `from` first and the root last.
    pub fn backpropagate<R: GameRules>(
        &self,
        tree: &mut SearchTree,
        rules: &R,
        from: NodeId,
        outcome: &Outcome,
    ) -> Vec<NodeId> {
        let path: Vec<NodeId> = tree.ancestors(from).collect();

        for &id in &path {
            let reward = tree
                .get(id)
                .parent
                .map(|parent| outcome.reward(rules.current_player(&tree.get(parent).state)));

            let node = tree.get_mut(id);
            node.visits += 1;
            if let Some(reward) = reward {
                node.value += reward;
            }
        }

        path
    }
}
