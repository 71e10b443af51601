//! Tic-tac-toe rules

use crate::game_state::{Board, GameRules, Mark, Outcome, Player};

/// The eight lines that win the game: rows, columns, diagonals
const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Standard 3x3 tic-tac-toe
///
/// The player to move is inferred from the marks on the board: X moves
/// whenever it has not placed more marks than O.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Creates the rules
    pub fn new() -> Self {
        TicTacToe
    }

    /// Returns the owners of all completed lines, one entry per line
    fn completed_lines(state: &Board) -> impl Iterator<Item = Player> + '_ {
        WINNING_LINES.iter().filter_map(move |&[a, b, c]| {
            let mark = state.get(a);
            if mark != Mark::Empty && mark == state.get(b) && mark == state.get(c) {
                mark.player()
            } else {
                None
            }
        })
    }

    /// Returns the player owning the first completed line, if any
    pub fn winner(&self, state: &Board) -> Option<Player> {
        Self::completed_lines(state).next()
    }
}

impl GameRules for TicTacToe {
    fn current_player(&self, state: &Board) -> Player {
        if state.count(Mark::X) <= state.count(Mark::O) {
            Player::X
        } else {
            Player::O
        }
    }

    fn legal_next_states(&self, state: &Board) -> Vec<Board> {
        let mark = self.current_player(state).mark();
        state
            .empty_cells()
            .map(|index| state.with_mark(index, mark))
            .collect()
    }

    fn is_terminal(&self, state: &Board) -> bool {
        self.winner(state).is_some() || state.is_full()
    }

    fn outcome(&self, state: &Board) -> Outcome {
        let mut outcome = Outcome::default();
        // The loser is pinned at -1 while the winner gains one per line.
        for winner in Self::completed_lines(state) {
            *outcome.reward_mut(winner) += 1.0;
            *outcome.reward_mut(winner.opponent()) = -1.0;
        }
        outcome
    }
}
