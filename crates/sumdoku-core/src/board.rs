use serde::{Deserialize, Serialize};

/// One cell of the working grid. Givens come from the puzzle mask and stay
/// locked for the whole session; user input can always be overwritten or
/// cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Given(u8),
    UserInput(u8),
    Empty,
}

impl Cell {
    pub fn value(&self) -> Option<u8> {
        match self {
            Cell::Given(v) | Cell::UserInput(v) => Some(*v),
            Cell::Empty => None,
        }
    }

    pub fn is_given(&self) -> bool {
        matches!(self, Cell::Given(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

pub type Board = [[Cell; 9]; 9];

/// Full solution grid, every unit a permutation of 1-9.
pub type SolutionGrid = [[u8; 9]; 9];

/// Masked solution; 0 marks a blank cell.
pub type PuzzleGrid = [[u8; 9]; 9];

/// Block number 0-8 for (row, col), numbered row-major.
pub fn block_index(row: usize, col: usize) -> usize {
    (row / 3) * 3 + col / 3
}

/// Top-left corner of the 3×3 block containing (row, col).
pub fn block_origin(row: usize, col: usize) -> (usize, usize) {
    ((row / 3) * 3, (col / 3) * 3)
}
