use crate::board::{Board, block_index};
use crate::cage::CageSet;

/// Outcome of one validation sweep: the violating cells plus, in Killer
/// mode, the cells of every fully-and-correctly completed cage. The
/// completed set is a visual signal only, never a correctness gate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    pub violations: Vec<(usize, usize)>,
    pub completed: Vec<(usize, usize)>,
}

impl Validation {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Variant-specific validator, chosen once when the session starts and
/// invoked uniformly after every mutation.
#[derive(Clone, Debug)]
pub enum VariantValidator {
    Classic,
    Killer(CageSet),
}

impl VariantValidator {
    pub fn refresh(&self, board: &Board) -> Validation {
        match self {
            VariantValidator::Classic => Validation {
                violations: find_violations(board),
                completed: Vec::new(),
            },
            VariantValidator::Killer(cages) => find_violations_killer(board, cages),
        }
    }

    pub fn cages(&self) -> Option<&CageSet> {
        match self {
            VariantValidator::Classic => None,
            VariantValidator::Killer(cages) => Some(cages),
        }
    }
}

/// Digit tallies for the nine rows, columns and blocks. Index 0 is unused.
struct UnitCounts {
    rows: [[u8; 10]; 9],
    cols: [[u8; 10]; 9],
    blocks: [[u8; 10]; 9],
}

impl UnitCounts {
    fn tally(board: &Board) -> UnitCounts {
        let mut counts = UnitCounts {
            rows: [[0; 10]; 9],
            cols: [[0; 10]; 9],
            blocks: [[0; 10]; 9],
        };
        for r in 0..9 {
            for c in 0..9 {
                if let Some(v) = board[r][c].value() {
                    let v = v as usize;
                    counts.rows[r][v] += 1;
                    counts.cols[c][v] += 1;
                    counts.blocks[block_index(r, c)][v] += 1;
                }
            }
        }
        counts
    }

    fn duplicated(&self, row: usize, col: usize, value: u8) -> bool {
        let v = value as usize;
        self.rows[row][v] > 1 || self.cols[col][v] > 1 || self.blocks[block_index(row, col)][v] > 1
    }
}

/// All cells currently breaking a row, column or block rule. One tally pass,
/// one flag pass; recomputed from scratch every time.
pub fn find_violations(board: &Board) -> Vec<(usize, usize)> {
    let counts = UnitCounts::tally(board);

    let mut violations = Vec::new();
    for r in 0..9 {
        for c in 0..9 {
            if let Some(v) = board[r][c].value() {
                if counts.duplicated(r, c, v) {
                    violations.push((r, c));
                }
            }
        }
    }
    violations
}

/// Per-cage bookkeeping for one sweep.
struct CageStats {
    counts: [u8; 10],
    sum: u32,
    filled: usize,
}

/// Killer validation: classic rules plus cage uniqueness and sum targets.
/// A placed cell violates its cage iff its digit repeats within the cage,
/// the cage's running sum already exceeds the target (checked eagerly, not
/// only at completion), or the cage is full with the wrong sum.
pub fn find_violations_killer(board: &Board, cages: &CageSet) -> Validation {
    let counts = UnitCounts::tally(board);

    let mut stats: Vec<CageStats> = cages
        .cages()
        .iter()
        .map(|_| CageStats {
            counts: [0; 10],
            sum: 0,
            filled: 0,
        })
        .collect();
    for r in 0..9 {
        for c in 0..9 {
            if let Some(v) = board[r][c].value() {
                let s = &mut stats[cages.cage_of(r, c)];
                s.counts[v as usize] += 1;
                s.sum += v as u32;
                s.filled += 1;
            }
        }
    }

    let mut violations = Vec::new();
    for r in 0..9 {
        for c in 0..9 {
            let Some(v) = board[r][c].value() else {
                continue;
            };
            if counts.duplicated(r, c, v) {
                violations.push((r, c));
                continue;
            }
            let ci = cages.cage_of(r, c);
            let cage = &cages.cages()[ci];
            let s = &stats[ci];
            if s.counts[v as usize] > 1
                || s.sum > cage.target
                || (s.filled == cage.cells.len() && s.sum != cage.target)
            {
                violations.push((r, c));
            }
        }
    }

    let mut completed = Vec::new();
    for (ci, cage) in cages.cages().iter().enumerate() {
        let s = &stats[ci];
        if s.filled == cage.cells.len() && s.sum == cage.target {
            completed.extend(cage.cells.iter().copied());
        }
    }

    Validation {
        violations,
        completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn empty_board() -> Board {
        [[Cell::Empty; 9]; 9]
    }

    fn sample_solution() -> crate::board::SolutionGrid {
        let mut grid = [[0u8; 9]; 9];
        let shifts = [0, 3, 6, 1, 4, 7, 2, 5, 8];
        for r in 0..9 {
            for c in 0..9 {
                grid[r][c] = (((shifts[r] + c) % 9) + 1) as u8;
            }
        }
        grid
    }

    #[test]
    fn clean_board_has_no_violations() {
        let mut board = empty_board();
        board[0][0] = Cell::Given(1);
        board[0][4] = Cell::UserInput(2);
        board[5][0] = Cell::UserInput(3);
        assert_eq!(find_violations(&board), Vec::new());
    }

    #[test]
    fn row_duplicate_flags_both_cells() {
        let mut board = empty_board();
        board[2][1] = Cell::UserInput(7);
        board[2][8] = Cell::Given(7);
        let violations = find_violations(&board);
        assert!(violations.contains(&(2, 1)));
        assert!(violations.contains(&(2, 8)));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn column_and_block_duplicates_are_flagged() {
        let mut board = empty_board();
        board[0][3] = Cell::UserInput(4);
        board[8][3] = Cell::UserInput(4);
        assert_eq!(find_violations(&board).len(), 2);

        let mut board = empty_board();
        board[3][0] = Cell::UserInput(9);
        board[5][2] = Cell::UserInput(9);
        assert_eq!(find_violations(&board).len(), 2);
    }

    #[test]
    fn distinct_digits_in_one_unit_are_fine() {
        let mut board = empty_board();
        for c in 0..9 {
            board[4][c] = Cell::UserInput(c as u8 + 1);
        }
        assert_eq!(find_violations(&board), Vec::new());
    }

    #[test]
    fn cage_duplicate_flags_before_cage_is_full() {
        let cages = CageSet::for_solution(&sample_solution());
        // Cage {(0,4),(0,5),(1,5),(2,5),(3,5)}: place the same digit twice,
        // far enough apart to avoid row/col/block conflicts.
        let mut board = empty_board();
        board[0][4] = Cell::UserInput(5);
        board[3][5] = Cell::UserInput(5);

        let result = find_violations_killer(&board, &cages);
        assert!(result.violations.contains(&(0, 4)));
        assert!(result.violations.contains(&(3, 5)));
    }

    #[test]
    fn cage_over_target_flags_eagerly() {
        let solution = sample_solution();
        let cages = CageSet::for_solution(&solution);
        // Two-cell cage {(0,0),(0,1)} with target 1+2=3: a single 9 is
        // already over the target even though the cage is not full.
        assert_eq!(cages.cages()[0].target, 3);
        let mut board = empty_board();
        board[0][0] = Cell::UserInput(9);

        let result = find_violations_killer(&board, &cages);
        assert_eq!(result.violations, vec![(0, 0)]);
    }

    #[test]
    fn full_cage_with_wrong_sum_is_flagged() {
        let solution = sample_solution();
        let cages = CageSet::for_solution(&solution);
        // Cage {(1,1),(1,2),(2,2)} sums to 20 in the sample solution. Fill
        // it with 1+2+3: full, under target, no duplicates anywhere.
        let ci = cages.cage_of(1, 1);
        assert_eq!(cages.cages()[ci].target, 20);
        let mut board = empty_board();
        board[1][1] = Cell::UserInput(1);
        board[1][2] = Cell::UserInput(2);
        board[2][2] = Cell::UserInput(3);

        let result = find_violations_killer(&board, &cages);
        assert!(result.violations.contains(&(1, 1)));
        assert!(result.violations.contains(&(1, 2)));
        assert!(result.violations.contains(&(2, 2)));
        assert!(result.completed.is_empty());
    }

    #[test]
    fn completed_cage_reports_its_cells() {
        let solution = sample_solution();
        let cages = CageSet::for_solution(&solution);
        // Fill the first cage with its solution digits: complete and clean.
        let mut board = empty_board();
        board[0][0] = Cell::UserInput(solution[0][0]);
        board[0][1] = Cell::UserInput(solution[0][1]);

        let result = find_violations_killer(&board, &cages);
        assert_eq!(result.violations, Vec::new());
        assert!(result.completed.contains(&(0, 0)));
        assert!(result.completed.contains(&(0, 1)));
    }

    #[test]
    fn validator_refresh_matches_variant() {
        let mut board = empty_board();
        board[0][0] = Cell::UserInput(9);

        let classic = VariantValidator::Classic;
        assert!(classic.refresh(&board).is_clean());
        assert!(classic.cages().is_none());

        let killer = VariantValidator::Killer(CageSet::for_solution(&sample_solution()));
        // 9 overshoots the two-cell cage's target of 3.
        assert_eq!(killer.refresh(&board).violations, vec![(0, 0)]);
        assert!(killer.cages().is_some());
    }
}
