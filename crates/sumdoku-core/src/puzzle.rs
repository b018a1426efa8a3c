use rand::rng;
use rand::seq::SliceRandom;

use crate::board::{Board, Cell, PuzzleGrid, SolutionGrid};

/// Mask a full solution down to `clue_count` givens.
///
/// All 81 positions are shuffled and the first `clue_count` keep their
/// solution digit; the rest become blanks. The result is always consistent
/// with the solution. Nothing is promised about uniqueness of completion.
pub fn derive_puzzle(solution: &SolutionGrid, clue_count: usize) -> PuzzleGrid {
    let mut rng = rng();

    let mut positions: Vec<(usize, usize)> = Vec::with_capacity(81);
    for r in 0..9 {
        for c in 0..9 {
            positions.push((r, c));
        }
    }
    positions.shuffle(&mut rng);

    let mut puzzle = [[0u8; 9]; 9];
    for &(r, c) in positions.iter().take(clue_count) {
        puzzle[r][c] = solution[r][c];
    }
    puzzle
}

/// Build a fresh working board from a masked puzzle: nonzero cells become
/// locked givens, blanks start empty and editable.
pub fn load_board(puzzle: &PuzzleGrid) -> Board {
    let mut board = [[Cell::Empty; 9]; 9];
    for r in 0..9 {
        for c in 0..9 {
            if puzzle[r][c] != 0 {
                board[r][c] = Cell::Given(puzzle[r][c]);
            }
        }
    }
    board
}
