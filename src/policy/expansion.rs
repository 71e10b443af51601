//! Expansion policy: grow a selected leaf by all of its legal moves.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    game_state::GameRules,
    tree::{NodeId, SearchTree},
    MCTSError, Result,
};

/// Expands a leaf with one child per legal move
///
/// Children are appended in the order the rules list the successor boards,
/// each starting with zero visits and zero value.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullExpansionPolicy;

impl FullExpansionPolicy {
    /// Creates a new full expansion policy
    pub fn new() -> Self {
        FullExpansionPolicy
    }

    /// Adds the children of `leaf` and returns their ids
    ///
    /// Terminal leaves are left untouched and yield no children.
    pub fn expand<R: GameRules>(
        &self,
        tree: &mut SearchTree,
        rules: &R,
        leaf: NodeId,
    ) -> Result<Vec<NodeId>> {
        let state = tree.get(leaf).state;
        if rules.is_terminal(&state) {
            return Ok(Vec::new());
        }

        let next_states = rules.legal_next_states(&state);
        if next_states.is_empty() {
            return Err(MCTSError::NoLegalMoves {
                state: state.to_string(),
            });
        }

        Ok(next_states
            .into_iter()
            .map(|next| tree.add_child(leaf, next, rules.current_player(&next)))
            .collect())
    }

    /// Picks the node to simulate from, uniformly among the new children
    pub fn choose<G: Rng + ?Sized>(&self, children: &[NodeId], rng: &mut G) -> Option<NodeId> {
        children.choose(rng).copied()
    }
}
