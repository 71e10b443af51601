//! Board encoding and the rules contract used by the search.
//!
//! The search never looks inside a [`Board`] itself. Everything it needs to
//! know about the game comes through the [`GameRules`] trait, which keeps the
//! tic-tac-toe rules a narrow, replaceable collaborator.

use std::fmt;
use std::str::FromStr;

use crate::MCTSError;

/// Number of cells on the board
pub const CELLS: usize = 9;

/// The two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Player A, moves first on an empty board
    X,
    /// Player B
    O,
}

impl Player {
    /// Returns the other player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the mark this player puts on the board
    pub fn mark(self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark())
    }
}

/// Content of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    /// Nobody has played here yet
    #[default]
    Empty,
    /// Marked by player X
    X,
    /// Marked by player O
    O,
}

impl Mark {
    /// Returns the player owning this mark, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Mark::Empty => None,
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
        }
    }

    fn symbol(self) -> char {
        match self {
            Mark::Empty => '-',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A 3x3 board, cells stored row by row
///
/// The text form is nine characters out of `-`, `X` and `O`, for example
/// `"XX-O-O---"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; CELLS],
}

impl Board {
    /// Creates an empty board
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a board from its cells
    pub fn from_cells(cells: [Mark; CELLS]) -> Self {
        Board { cells }
    }

    /// Returns all cells in index order
    pub fn cells(&self) -> &[Mark; CELLS] {
        &self.cells
    }

    /// Returns the mark at the given cell
    ///
    /// # Panics
    ///
    /// Panics if `index >= 9`.
    pub fn get(&self, index: usize) -> Mark {
        self.cells[index]
    }

    /// Returns a copy of this board with one cell replaced
    pub fn with_mark(&self, index: usize, mark: Mark) -> Board {
        let mut next = *self;
        next.cells[index] = mark;
        next
    }

    /// Counts the cells holding the given mark
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    /// Returns the indices of all empty cells in ascending order
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(index, _)| index)
    }

    /// Returns true if no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Mark::Empty)
    }
}

impl FromStr for Board {
    type Err = MCTSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.trim().chars().collect();
        if symbols.len() != CELLS {
            return Err(MCTSError::InvalidBoard(format!(
                "expected {} cells, got {} in {:?}",
                CELLS,
                symbols.len(),
                s
            )));
        }

        let mut cells = [Mark::Empty; CELLS];
        for (cell, symbol) in cells.iter_mut().zip(symbols) {
            *cell = match symbol {
                '-' => Mark::Empty,
                'X' => Mark::X,
                'O' => Mark::O,
                other => {
                    return Err(MCTSError::InvalidBoard(format!(
                        "unexpected character {:?} in {:?}",
                        other, s
                    )))
                }
            };
        }

        Ok(Board { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

/// Reward of each player for a board position
///
/// Positive values are good for the player, negative values bad. Ongoing and
/// drawn positions give zero to both players.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Outcome {
    /// Reward for player X
    pub x: f64,
    /// Reward for player O
    pub o: f64,
}

impl Outcome {
    /// Returns the reward for the given player
    pub fn reward(&self, player: Player) -> f64 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Returns a mutable reference to the reward of the given player
    pub fn reward_mut(&mut self, player: Player) -> &mut f64 {
        match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }
}

/// Rules of the game, as needed by the search
///
/// All methods must be pure functions of the board.
pub trait GameRules {
    /// Returns the player to move on this board
    fn current_player(&self, state: &Board) -> Player;

    /// Returns one successor board per legal move
    ///
    /// The order of this list defines the order of the children created
    /// during expansion, so it must be deterministic.
    fn legal_next_states(&self, state: &Board) -> Vec<Board>;

    /// Returns true if the game is over on this board
    fn is_terminal(&self, state: &Board) -> bool;

    /// Returns the reward of both players for this board
    fn outcome(&self, state: &Board) -> Outcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_text_form() {
        let board: Board = "XX-O-O---".parse().unwrap();
        assert_eq!(board.get(0), Mark::X);
        assert_eq!(board.get(3), Mark::O);
        assert_eq!(board.get(8), Mark::Empty);
        assert_eq!(board.to_string(), "XX-O-O---");
    }

    #[test]
    fn test_board_rejects_bad_input() {
        assert!(matches!(
            "XX--".parse::<Board>(),
            Err(MCTSError::InvalidBoard(_))
        ));
        assert!(matches!(
            "XX-----Z-".parse::<Board>(),
            Err(MCTSError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_empty_cells_in_index_order() {
        let board: Board = "X-O-X-O--".parse().unwrap();
        let empty: Vec<usize> = board.empty_cells().collect();
        assert_eq!(empty, vec![1, 3, 5, 7, 8]);
        assert_eq!(board.count(Mark::X), 2);
        assert!(!board.is_full());
    }

    #[test]
    fn test_outcome_lookup() {
        let mut outcome = Outcome::default();
        *outcome.reward_mut(Player::O) = -1.0;
        assert_eq!(outcome.reward(Player::X), 0.0);
        assert_eq!(outcome.reward(Player::O), -1.0);
        assert_eq!(Player::X.opponent(), Player::O);
    }
}
