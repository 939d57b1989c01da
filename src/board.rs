//! Core board types for tic-tac-toe.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The eight winning lines as index triples, in canonical order:
/// three rows, three columns, two diagonals.
///
/// The declaration order matters: win detection always reports the
/// first matching line in this order.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Index of the center square.
pub const CENTER: usize = 4;

/// Corner square indices, lowest first.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Edge square indices, lowest first.
pub const EDGES: [usize; 4] = [1, 3, 5, 7];

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// Player X.
    #[display("X")]
    X,
    /// Player O.
    #[display("O")]
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// Errors from placing a mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, derive_more::Error)]
pub enum PlaceError {
    /// Position is outside the 0-8 range.
    #[display("position out of bounds (must be 0-8)")]
    OutOfBounds,
    /// Square is already occupied.
    #[display("square is already occupied")]
    Occupied,
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Places `player`'s mark at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::OutOfBounds`] for positions past 8 and
    /// [`PlaceError::Occupied`] when the square is taken.
    pub fn place(&mut self, pos: usize, player: Player) -> Result<(), PlaceError> {
        if pos >= 9 {
            return Err(PlaceError::OutOfBounds);
        }
        if self.squares[pos] != Square::Empty {
            return Err(PlaceError::Occupied);
        }
        self.squares[pos] = Square::Occupied(player);
        Ok(())
    }

    /// Returns a copy of the board with `player`'s mark at `pos`.
    ///
    /// The adversarial search branches on board copies rather than
    /// mutate-and-undo; at nine cells a copy is cheaper than the
    /// bookkeeping.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Board::place`].
    pub fn with_move(&self, pos: usize, player: Player) -> Result<Board, PlaceError> {
        let mut next = self.clone();
        next.place(pos, player)?;
        Ok(next)
    }

    /// Returns the empty positions in ascending index order.
    pub fn available_moves(&self) -> Vec<usize> {
        (0..9).filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Returns the first winning line fully owned by `player`, if any,
    /// in [`WINNING_LINES`] declaration order.
    pub fn winning_line(&self, player: Player) -> Option<[usize; 3]> {
        WINNING_LINES
            .into_iter()
            .find(|line| {
                line.iter()
                    .all(|&pos| self.squares[pos] == Square::Occupied(player))
            })
    }

    /// Checks whether `player` owns a complete line.
    pub fn has_won(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
