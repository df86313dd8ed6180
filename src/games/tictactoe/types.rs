//! Core domain types for the 3×3 grid game.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A player's mark. X moves first; the service plays O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// First player (the minimizing side in the solver).
    X,
    /// Second player (the maximizing side in the solver).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// One cell of the board.
///
/// The wire encoding matches the board clients send: `""` for an empty
/// cell, `"X"` or `"O"` for an occupied one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Unoccupied cell.
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_str(""),
            Cell::Occupied(Mark::X) => serializer.serialize_str("X"),
            Cell::Occupied(Mark::O) => serializer.serialize_str("O"),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "" => Ok(Cell::Empty),
            "X" => Ok(Cell::Occupied(Mark::X)),
            "O" => Ok(Cell::Occupied(Mark::O)),
            other => Err(de::Error::custom(format!(
                "invalid cell '{other}', expected \"\", \"X\" or \"O\""
            ))),
        }
    }
}

/// Error returned when a caller-supplied board is not exactly 9 cells.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("board must have exactly 9 cells, got {len}")]
pub struct BoardShapeError {
    /// Number of cells the caller supplied.
    pub len: usize,
}

/// Terminal classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStatus {
    /// At least one empty cell and no completed line.
    InProgress,
    /// Three equal marks on a line.
    Won(Mark),
    /// No empty cell and no completed line.
    Draw,
}

/// The three rows, three columns and two diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3×3 board in row-major order.
///
/// `Copy` on purpose: the solver works on throwaway stack copies, so a
/// caller-supplied board is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from caller-supplied cells, validating the shape.
    ///
    /// # Errors
    ///
    /// Returns [`BoardShapeError`] unless exactly 9 cells are supplied.
    pub fn from_cells(cells: &[Cell]) -> Result<Self, BoardShapeError> {
        let cells: [Cell; 9] = cells
            .try_into()
            .map_err(|_| BoardShapeError { len: cells.len() })?;
        Ok(Self { cells })
    }

    /// Gets the cell at `pos` (0-8).
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Sets the cell at `pos`. Positions past the board are ignored.
    pub(crate) fn set(&mut self, pos: usize, cell: Cell) {
        if pos < 9 {
            self.cells[pos] = cell;
        }
    }

    /// Checks whether the cell at `pos` is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    /// Iterates the indices of all empty cells, ascending.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
    }

    /// Returns the mark completing a line, if any.
    pub fn winner(&self) -> Option<Mark> {
        for [a, b, c] in LINES {
            if let Cell::Occupied(mark) = self.cells[a] {
                if self.cells[b] == Cell::Occupied(mark) && self.cells[c] == Cell::Occupied(mark) {
                    return Some(mark);
                }
            }
        }
        None
    }

    /// Checks whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Classifies the board as in progress, won or drawn.
    pub fn status(&self) -> GridStatus {
        if let Some(mark) = self.winner() {
            GridStatus::Won(mark)
        } else if self.is_full() {
            GridStatus::Draw
        } else {
            GridStatus::InProgress
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
