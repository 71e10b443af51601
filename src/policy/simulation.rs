//! Simulation policy for the MCTS algorithm
//!
//! A simulation plays a game out from a board to estimate how good that board
//! is. Only uniformly random play-outs are supported.

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    game_state::{Board, GameRules},
    MCTSError, Result,
};

/// Random simulation policy
///
/// This policy plays random legal moves until the game ends and returns the
/// final board.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }

    /// Plays uniformly random moves from `state` until the game is over
    ///
    /// A terminal `state` is returned as is.
    pub fn simulate<R, G>(&self, rules: &R, state: &Board, rng: &mut G) -> Result<Board>
    where
        R: GameRules,
        G: Rng + ?Sized,
    {
        let mut current = *state;
        let mut plies = 0usize;

        while !rules.is_terminal(&current) {
            let next_states = rules.legal_next_states(&current);
            current = *next_states
                .choose(rng)
                .ok_or_else(|| MCTSError::NoLegalMoves {
                    state: current.to_string(),
                })?;
            plies += 1;
        }

        trace!("Rollout from {} ended at {} after {} plies", state, current, plies);
        Ok(current)
    }
}
