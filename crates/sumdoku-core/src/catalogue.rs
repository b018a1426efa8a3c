use std::fmt;

use rand::RngExt;
use rand::rng;
use serde::{Deserialize, Serialize};

use crate::board::SolutionGrid;
use crate::difficulty::Difficulty;
use crate::error::EngineError;

/// One catalogue record: a full 81-digit solution and its difficulty label.
/// An entry may also carry a pre-masked puzzle string, in which case every
/// nonzero puzzle cell must agree with the solution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub solution: String,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puzzle: Option<String>,
}

impl CatalogueEntry {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_label(&self.level)
    }

    /// Parse the solution string into a grid. The parsed grid is cached by
    /// the session that loads it, never written back onto the entry.
    pub fn solution_grid(&self) -> Result<SolutionGrid, EngineError> {
        parse_grid(&self.solution)
    }
}

/// Parse an 81-character string of digits 1-9 into a 9×9 grid.
pub fn parse_grid(text: &str) -> Result<SolutionGrid, EngineError> {
    if text.chars().count() != 81 {
        return Err(EngineError::MalformedSolution {
            len: text.chars().count(),
        });
    }
    let mut grid = [[0u8; 9]; 9];
    for (i, ch) in text.chars().enumerate() {
        match ch.to_digit(10) {
            Some(d) if d >= 1 => grid[i / 9][i % 9] = d as u8,
            _ => return Err(EngineError::BadDigit { cell: i, ch }),
        }
    }
    Ok(grid)
}

/// Static, read-only collection of full solutions tagged with difficulty.
#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    /// The catalogue shipped with the crate. A broken embedded document is
    /// reported and yields an empty catalogue rather than aborting startup.
    pub fn builtin() -> Catalogue {
        match serde_json::from_str(include_str!("../catalogue.json")) {
            Ok(entries) => Catalogue { entries },
            Err(e) => {
                log::error!("built-in catalogue failed to parse: {e}");
                Catalogue::default()
            }
        }
    }

    pub fn from_entries(entries: Vec<CatalogueEntry>) -> Catalogue {
        Catalogue { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&CatalogueEntry> {
        self.entries.get(index)
    }

    /// Random entry index of the requested difficulty. Falls back to the
    /// first entry when no entry matches; `None` only when the catalogue is
    /// empty.
    pub fn random_index_for(&self, difficulty: Difficulty) -> Option<usize> {
        let matching: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.difficulty() == difficulty)
            .map(|(i, _)| i)
            .collect();

        if matching.is_empty() {
            if self.entries.is_empty() {
                None
            } else {
                Some(0)
            }
        } else {
            let mut rng = rng();
            Some(matching[rng.random_range(0..matching.len())])
        }
    }

    /// Diagnostic sweep over every entry: malformed solutions, duplicate
    /// digits within a unit, clue/solution mismatches. Issues are logged and
    /// returned; entries are never rejected and the sweep never aborts early.
    pub fn validate(&self) -> Vec<CatalogueIssue> {
        let mut issues = Vec::new();

        for (idx, entry) in self.entries.iter().enumerate() {
            let grid = match entry.solution_grid() {
                Ok(grid) => grid,
                Err(_) => {
                    issues.push(CatalogueIssue::Malformed { entry: idx });
                    continue;
                }
            };

            'units: for i in 0..9 {
                let row: Vec<u8> = (0..9).map(|c| grid[i][c]).collect();
                let col: Vec<u8> = (0..9).map(|r| grid[r][i]).collect();
                let base_r = (i / 3) * 3;
                let base_c = (i % 3) * 3;
                let block: Vec<u8> = (0..3)
                    .flat_map(|r| (0..3).map(move |c| (base_r + r, base_c + c)))
                    .map(|(r, c)| grid[r][c])
                    .collect();

                for unit in [&row, &col, &block] {
                    if has_duplicate(unit) {
                        issues.push(CatalogueIssue::DuplicateDigits { entry: idx });
                        break 'units;
                    }
                }
            }

            if let Some(puzzle) = &entry.puzzle {
                for (k, ch) in puzzle.chars().take(81).enumerate() {
                    let d = ch.to_digit(10).unwrap_or(0) as u8;
                    if d != 0 && d != grid[k / 9][k % 9] {
                        issues.push(CatalogueIssue::ClueMismatch { entry: idx, cell: k });
                        break;
                    }
                }
            }
        }

        for issue in &issues {
            log::warn!("catalogue: {issue}");
        }
        issues
    }
}

fn has_duplicate(unit: &[u8]) -> bool {
    let mut seen = [false; 10];
    for &v in unit {
        if v != 0 {
            if seen[v as usize] {
                return true;
            }
            seen[v as usize] = true;
        }
    }
    false
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogueIssue {
    Malformed { entry: usize },
    DuplicateDigits { entry: usize },
    ClueMismatch { entry: usize, cell: usize },
}

impl fmt::Display for CatalogueIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogueIssue::Malformed { entry } => {
                write!(f, "entry {entry}: solution malformed")
            }
            CatalogueIssue::DuplicateDigits { entry } => {
                write!(f, "entry {entry}: duplicate digits in row/col/block")
            }
            CatalogueIssue::ClueMismatch { entry, cell } => {
                write!(f, "entry {entry}: clue mismatch at cell {cell}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(solution: &str, level: &str) -> CatalogueEntry {
        CatalogueEntry {
            solution: solution.to_string(),
            level: level.to_string(),
            puzzle: None,
        }
    }

    #[test]
    fn builtin_catalogue_is_clean() {
        let catalogue = Catalogue::builtin();
        assert!(!catalogue.is_empty());
        assert_eq!(catalogue.validate(), Vec::new());
    }

    #[test]
    fn random_index_respects_level() {
        let catalogue = Catalogue::builtin();
        for _ in 0..10 {
            let idx = catalogue.random_index_for(Difficulty::Hard).unwrap();
            assert_eq!(
                catalogue.entry(idx).unwrap().difficulty(),
                Difficulty::Hard
            );
        }
    }

    #[test]
    fn random_index_falls_back_to_first_entry() {
        let catalogue = Catalogue::from_entries(vec![entry(
            &"123456789".repeat(9),
            "easy",
        )]);
        assert_eq!(catalogue.random_index_for(Difficulty::Hard), Some(0));
        assert_eq!(Catalogue::default().random_index_for(Difficulty::Easy), None);
    }

    #[test]
    fn validate_flags_short_solution() {
        let catalogue = Catalogue::from_entries(vec![entry("12345", "easy")]);
        assert_eq!(
            catalogue.validate(),
            vec![CatalogueIssue::Malformed { entry: 0 }]
        );
    }

    #[test]
    fn validate_flags_row_duplicate_and_continues() {
        // First entry repeats 1 within its first row; second entry is fine.
        let good = Catalogue::builtin().entry(0).unwrap().solution.clone();
        let mut bad = good.clone();
        bad.replace_range(1..2, &good[0..1]);
        let catalogue = Catalogue::from_entries(vec![entry(&bad, "easy"), entry(&good, "easy")]);

        let issues = catalogue.validate();
        assert_eq!(issues, vec![CatalogueIssue::DuplicateDigits { entry: 0 }]);
    }

    #[test]
    fn validate_flags_clue_mismatch() {
        let solution = Catalogue::builtin().entry(0).unwrap().solution.clone();
        let mut puzzle: String = "0".repeat(81);
        let wrong = if &solution[4..5] == "9" { "1" } else { "9" };
        puzzle.replace_range(4..5, wrong);

        let catalogue = Catalogue::from_entries(vec![CatalogueEntry {
            solution,
            level: "easy".to_string(),
            puzzle: Some(puzzle),
        }]);
        assert_eq!(
            catalogue.validate(),
            vec![CatalogueIssue::ClueMismatch { entry: 0, cell: 4 }]
        );
    }
}
