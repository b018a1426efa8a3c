use sumdoku_core::catalogue::Catalogue;
use sumdoku_core::{CheckOutcome, Scope, Session, Variant};

fn load(variant: Variant, clue_count: usize) -> Session {
    let catalogue = Catalogue::builtin();
    let entry = catalogue.entry(0).unwrap();
    Session::load(variant, entry, clue_count).unwrap()
}

fn solution() -> [[u8; 9]; 9] {
    Catalogue::builtin()
        .entry(0)
        .unwrap()
        .solution_grid()
        .unwrap()
}

#[test]
fn solve_row_reveals_and_cleans_up() {
    let sol = solution();
    let mut session = load(Variant::Classic, 0);

    // Plant a stale digit that the row reveal will duplicate in its column.
    session.set_cell(6, 2, sol[2][2]);
    session.select(2, 7);
    session.solve_scope(Scope::Row).unwrap();

    for c in 0..9 {
        assert_eq!(session.board()[2][c].value(), Some(sol[2][c]));
    }
    assert!(session.board()[6][2].is_empty());
    assert!(session.violations().is_empty());
}

#[test]
fn solving_all_blocks_completes_the_board() {
    let mut session = load(Variant::Classic, 24);
    for band in 0..3 {
        for stack in 0..3 {
            session.select(band * 3, stack * 3);
            session.solve_scope(Scope::Block).unwrap();
        }
    }
    assert_eq!(session.check(), CheckOutcome::Correct);
    assert!(session.violations().is_empty());
}

#[test]
fn killer_assist_clears_cage_duplicates() {
    let sol = solution();
    let mut session = load(Variant::Killer, 0);

    // (0,4) and (3,5) share a cage in the static layout.
    session.set_cell(3, 5, sol[0][4]);
    session.select(0, 0);
    session.solve_scope(Scope::Row).unwrap();

    assert!(session.board()[3][5].is_empty());
    assert!(session.violations().is_empty());
}

#[test]
fn killer_cage_duplicate_flags_both_cells_before_cage_is_full() {
    let mut session = load(Variant::Killer, 0);

    // Same cage, no shared row/column/block.
    session.set_cell(0, 4, 5);
    session.set_cell(3, 5, 5);

    assert!(session.violations().contains(&(0, 4)));
    assert!(session.violations().contains(&(3, 5)));
}

#[test]
fn killer_completed_cage_signals_without_violations() {
    let sol = solution();
    let mut session = load(Variant::Killer, 0);
    let cages = session.cages().unwrap();
    let cage_cells = cages.cages()[0].cells.clone();

    for &(r, c) in &cage_cells {
        session.set_cell(r, c, sol[r][c]);
    }

    assert!(session.violations().is_empty());
    for cell in &cage_cells {
        assert!(session.completed_cells().contains(cell));
    }
}

#[test]
fn check_stays_defined_in_killer_mode() {
    let sol = solution();
    let mut session = load(Variant::Killer, 0);
    assert_eq!(session.check(), CheckOutcome::Incomplete);

    for r in 0..9 {
        for c in 0..9 {
            session.set_cell(r, c, sol[r][c]);
        }
    }
    assert_eq!(session.check(), CheckOutcome::Correct);
}
