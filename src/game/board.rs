use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MoveError;

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Numeric encoding used by the run-sum win scan.
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => -1,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'x',
            Cell::O => 'o',
        }
    }
}

/// Deterministic key for the full contents of a board.
///
/// One character per cell, row-major starting at the bottom row, so two
/// boards share a fingerprint exactly when every cell matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The 6x7 grid. Row 0 is the bottom row; pieces stack upward from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full (or does not exist)
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[ROWS - 1][col] != Cell::Empty
    }

    /// Columns whose top cell is still empty, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Lowest empty row in a column, `None` if the column is full.
    pub fn drop_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn apply_move(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.drop_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = player.to_cell();
        Ok(row)
    }

    /// Copy of this board with one extra move applied.
    pub fn with_move(&self, col: usize, player: Player) -> Result<Board, MoveError> {
        let mut next = *self;
        next.apply_move(col, player)?;
        Ok(next)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let key = self
            .cells
            .iter()
            .flat_map(|row| row.iter().map(|cell| cell.symbol()))
            .collect();
        Fingerprint(key)
    }

    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; COLS]; ROWS];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Text rendering with the top row first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(4 * COLS + 1);
        for row in (0..ROWS).rev() {
            writeln!(f, "{rule}")?;
            write!(f, "|")?;
            for col in 0..COLS {
                let token = match self.cells[row][col] {
                    Cell::Empty => ' ',
                    cell => cell.symbol(),
                };
                write!(f, " {token} |")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{rule}")?;
        write!(f, " ")?;
        for col in 0..COLS {
            write!(f, " {col}  ")?;
        }
        writeln!(f)
    }
}
