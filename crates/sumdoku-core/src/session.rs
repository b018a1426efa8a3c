use serde::{Deserialize, Serialize};

use crate::assist::{self, Scope};
use crate::board::{Board, Cell, SolutionGrid};
use crate::cage::CageSet;
use crate::catalogue::CatalogueEntry;
use crate::error::EngineError;
use crate::puzzle::{derive_puzzle, load_board};
use crate::validation::{Validation, VariantValidator};

/// Which rule set the session plays under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    Classic,
    Killer,
}

impl Variant {
    pub fn label(&self) -> &str {
        match self {
            Variant::Classic => "Classic",
            Variant::Killer => "Killer",
        }
    }

    pub fn toggle(&self) -> Variant {
        match self {
            Variant::Classic => Variant::Killer,
            Variant::Killer => Variant::Classic,
        }
    }
}

/// Verdict of the check action. Incomplete boards get no correctness
/// verdict, and neither verdict discloses positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Incomplete,
    Correct,
    Errors,
}

/// One loaded puzzle: the working board, its parsed solution, the validator
/// picked for the variant, and the current validation state. A session is
/// replaced wholesale on the next puzzle load; nothing carries over.
pub struct Session {
    variant: Variant,
    board: Board,
    solution: SolutionGrid,
    validator: VariantValidator,
    selected: Option<(usize, usize)>,
    validation: Validation,
}

impl Session {
    /// Load a catalogue entry, masking its solution down to `clue_count`
    /// givens.
    pub fn load(
        variant: Variant,
        entry: &CatalogueEntry,
        clue_count: usize,
    ) -> Result<Session, EngineError> {
        let solution = entry.solution_grid()?;
        let puzzle = derive_puzzle(&solution, clue_count);
        let board = load_board(&puzzle);
        let validator = match variant {
            Variant::Classic => VariantValidator::Classic,
            Variant::Killer => VariantValidator::Killer(CageSet::for_solution(&solution)),
        };

        let mut session = Session {
            variant,
            board,
            solution,
            validator,
            selected: None,
            validation: Validation::default(),
        };
        session.refresh();
        Ok(session)
    }

    fn refresh(&mut self) {
        self.validation = self.validator.refresh(&self.board);
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cages(&self) -> Option<&CageSet> {
        self.validator.cages()
    }

    pub fn violations(&self) -> &[(usize, usize)] {
        &self.validation.violations
    }

    /// Cells of fully-and-correctly completed cages (Killer only, visual
    /// signal).
    pub fn completed_cells(&self) -> &[(usize, usize)] {
        &self.validation.completed
    }

    pub fn select(&mut self, row: usize, col: usize) {
        self.selected = Some((row, col));
    }

    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    /// Place a digit in an editable cell. Returns false for givens. The
    /// board is fully re-validated before returning.
    pub fn set_cell(&mut self, row: usize, col: usize, value: u8) -> bool {
        if self.board[row][col].is_given() {
            return false;
        }
        self.board[row][col] = Cell::UserInput(value);
        self.refresh();
        true
    }

    /// Empty an editable cell. Returns false for givens.
    pub fn clear_cell(&mut self, row: usize, col: usize) -> bool {
        if self.board[row][col].is_given() {
            return false;
        }
        self.board[row][col] = Cell::Empty;
        self.refresh();
        true
    }

    /// Solve-assist anchored at the selected cell. Without a selection
    /// nothing is mutated.
    pub fn solve_scope(&mut self, scope: Scope) -> Result<(), EngineError> {
        let anchor = self.selected.ok_or(EngineError::NoSelection)?;
        assist::solve_scope(
            &mut self.board,
            &self.solution,
            self.validator.cages(),
            scope,
            anchor,
        );
        self.refresh();
        Ok(())
    }

    /// Compare the filled board against the solution. Any empty cell yields
    /// `Incomplete` without a verdict.
    pub fn check(&self) -> CheckOutcome {
        let mut all_match = true;
        for r in 0..9 {
            for c in 0..9 {
                match self.board[r][c].value() {
                    None => return CheckOutcome::Incomplete,
                    Some(v) => {
                        if v != self.solution[r][c] {
                            all_match = false;
                        }
                    }
                }
            }
        }
        if all_match {
            CheckOutcome::Correct
        } else {
            CheckOutcome::Errors
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Catalogue;

    fn load_session(variant: Variant, clue_count: usize) -> Session {
        let catalogue = Catalogue::builtin();
        Session::load(variant, catalogue.entry(0).unwrap(), clue_count).unwrap()
    }

    #[test]
    fn load_marks_givens_and_validates_clean() {
        let session = load_session(Variant::Classic, 30);
        let givens = session
            .board()
            .iter()
            .flatten()
            .filter(|c| c.is_given())
            .count();
        assert_eq!(givens, 30);
        assert!(session.violations().is_empty());
    }

    #[test]
    fn set_cell_refuses_givens() {
        let mut session = load_session(Variant::Classic, 81);
        assert!(!session.set_cell(0, 0, 5));
        assert!(!session.clear_cell(0, 0));
    }

    #[test]
    fn solve_without_selection_is_rejected() {
        let mut session = load_session(Variant::Classic, 0);
        assert_eq!(
            session.solve_scope(Scope::Row),
            Err(EngineError::NoSelection)
        );
        assert!(session.board().iter().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn check_incomplete_then_correct() {
        let mut session = load_session(Variant::Classic, 0);
        let solution = Catalogue::builtin().entry(0).unwrap().solution_grid().unwrap();

        for r in 0..9 {
            for c in 0..9 {
                if (r, c) != (8, 8) {
                    session.set_cell(r, c, solution[r][c]);
                }
            }
        }
        assert_eq!(session.check(), CheckOutcome::Incomplete);

        session.set_cell(8, 8, solution[8][8]);
        assert_eq!(session.check(), CheckOutcome::Correct);
    }

    #[test]
    fn check_reports_errors_without_positions() {
        let mut session = load_session(Variant::Classic, 0);
        let solution = Catalogue::builtin().entry(0).unwrap().solution_grid().unwrap();

        for r in 0..9 {
            for c in 0..9 {
                session.set_cell(r, c, solution[r][c]);
            }
        }
        let wrong = if solution[4][4] == 9 { 1 } else { 9 };
        session.set_cell(4, 4, wrong);
        assert_eq!(session.check(), CheckOutcome::Errors);
    }

    #[test]
    fn killer_session_exposes_cages() {
        let session = load_session(Variant::Killer, 24);
        assert!(session.cages().is_some());
        assert!(load_session(Variant::Classic, 24).cages().is_none());
    }
}
