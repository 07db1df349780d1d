//! Board module - manages the game grid
//!
//! The board is a square grid of side 4, 5 or 6. Each cell holds a tile value,
//! with 0 meaning empty and every other value a power of two.
//! Cells live in a fixed-capacity flat array (sized for the 6x6 board) so a
//! board is a plain `Copy` value and moves never allocate.
//! Coordinates: (row, col), row 0 is the top edge, col 0 the left edge.

use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{is_supported_side, is_valid_tile, Difficulty, MAX_BOARD_SIDE, MAX_CELLS};

/// Errors raised when building a board from external data
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("unsupported board side {0} (expected 4, 5 or 6)")]
    UnsupportedSide(usize),
    #[error("row {row} has {len} cells, expected {side}")]
    RaggedRow { row: usize, len: usize, side: usize },
    #[error("cell ({row}, {col}) holds {value}, which is not a tile")]
    InvalidTile { row: usize, col: usize, value: u64 },
    #[error("expected {expected} cells, got {len}")]
    CellCount { len: usize, expected: usize },
    #[error("cell {index} lies outside a {side}x{side} board but holds {value}")]
    StrayCell { index: usize, side: usize, value: u64 },
}

/// Row-major indices of empty cells
pub type EmptyCells = ArrayVec<usize, MAX_CELLS>;

/// The game board - square grid using flat array storage
///
/// Deserialization goes through [`BoardRepr`] and applies the same checks as
/// [`Board::from_rows`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    side: usize,
    /// Flat array of cells, row-major order (row * side + col).
    /// Only the first `side * side` entries are in use; the rest stay 0.
    #[serde(serialize_with = "serialize_cells")]
    cells: [u64; MAX_CELLS],
}

/// Unchecked wire form of a [`Board`]
#[derive(Debug, Clone, Deserialize)]
pub struct BoardRepr {
    pub side: usize,
    pub cells: Vec<u64>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let mut board = Self::new(repr.side)?;
        if repr.cells.len() != MAX_CELLS {
            return Err(BoardError::CellCount {
                len: repr.cells.len(),
                expected: MAX_CELLS,
            });
        }
        let side = board.side;
        for (index, &value) in repr.cells.iter().enumerate() {
            if index >= side * side {
                if value != 0 {
                    return Err(BoardError::StrayCell { index, side, value });
                }
                continue;
            }
            if !is_valid_tile(value) {
                return Err(BoardError::InvalidTile {
                    row: index / side,
                    col: index % side,
                    value,
                });
            }
            board.cells[index] = value;
        }
        Ok(board)
    }
}

fn serialize_cells<S: serde::Serializer>(cells: &[u64; MAX_CELLS], s: S) -> Result<S::Ok, S::Error> {
    // serde only derives arrays up to 32 elements.
    s.collect_seq(cells.iter())
}

impl Board {
    /// Create a new empty board
    pub fn new(side: usize) -> Result<Self, BoardError> {
        if !is_supported_side(side) {
            return Err(BoardError::UnsupportedSide(side));
        }
        Ok(Self {
            side,
            cells: [0; MAX_CELLS],
        })
    }

    /// Create an empty board sized for a difficulty
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            side: difficulty.board_side(),
            cells: [0; MAX_CELLS],
        }
    }

    /// Build a board from rows, validating shape and tile values
    pub fn from_rows<R: AsRef<[u64]>>(rows: &[R]) -> Result<Self, BoardError> {
        let side = rows.len();
        let mut board = Self::new(side)?;
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != side {
                return Err(BoardError::RaggedRow {
                    row,
                    len: cells.len(),
                    side,
                });
            }
            for (col, &value) in cells.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTile { row, col, value });
                }
                board.cells[row * side + col] = value;
            }
        }
        Ok(board)
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.side || col >= self.side {
            return None;
        }
        Some(row * self.side + col)
    }

    /// Side length of the board
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of cells on the board
    pub fn len(&self) -> usize {
        self.side * self.side
    }

    /// Always false; a board has at least 16 cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u64> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds or `value` is not a valid tile
    pub fn set(&mut self, row: usize, col: usize, value: u64) -> bool {
        match self.index(row, col) {
            Some(idx) if is_valid_tile(value) => {
                self.cells[idx] = value;
                true
            }
            _ => false,
        }
    }

    /// The cells in use, row-major
    pub fn cells(&self) -> &[u64] {
        &self.cells[..self.len()]
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u64] {
        let len = self.len();
        &mut self.cells[..len]
    }

    /// One row of the board
    pub fn row(&self, row: usize) -> &[u64] {
        let start = row * self.side;
        &self.cells[start..start + self.side]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [u64] {
        let start = row * self.side;
        let side = self.side;
        &mut self.cells[start..start + side]
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        self.cells().chunks_exact(self.side)
    }

    /// Row-major indices of all empty cells
    pub fn empty_cells(&self) -> EmptyCells {
        self.cells()
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Count empty cells
    pub fn count_empty(&self) -> usize {
        self.cells().iter().filter(|&&v| v == 0).count()
    }

    /// Count nonzero cells
    pub fn count_tiles(&self) -> usize {
        self.len() - self.count_empty()
    }

    /// Check if every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.cells().iter().all(|&v| v != 0)
    }

    /// Highest tile value (0 on an empty board)
    pub fn highest_tile(&self) -> u64 {
        self.cells().iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn tile_sum(&self) -> u64 {
        self.cells().iter().sum()
    }

    /// Copy the board into a fixed 6x6 grid (unused cells stay 0)
    pub fn write_grid(&self, out: &mut [[u64; MAX_BOARD_SIDE]; MAX_BOARD_SIDE]) {
        *out = [[0; MAX_BOARD_SIDE]; MAX_BOARD_SIDE];
        for (r, row) in self.rows().enumerate() {
            out[r][..self.side].copy_from_slice(row);
        }
    }

    /// Convert to nested rows for display or serialization
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [0; MAX_CELLS];
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("side", &self.side)
            .field("rows", &self.to_rows())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (i, &v) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, "|")?;
                }
                if v == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", v)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}
