use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};

use crate::game::{Game, GameState, MenuField};
use sumdoku_core::{CageSet, Cell, Difficulty, Session, Variant};

// ── Constants ────────────────────────────────────────────────────────────────

// 9 cells of 7×3 characters plus 10 border lines in each direction.
const GRID_WIDTH: u16 = 73;
const GRID_HEIGHT: u16 = 37;

// ── Public entry point ───────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, game: &Game) {
    match game.state {
        GameState::Menu => draw_menu(f, game),
        GameState::Playing => draw_playing(f, game),
        GameState::Paused => draw_paused(f, game),
        GameState::Won => draw_won(f, game),
    }

    if game.show_quit_confirm {
        draw_quit_confirm(f);
    }
}

// ── Menu screen ──────────────────────────────────────────────────────────────

fn draw_menu(f: &mut Frame, game: &Game) {
    let area = f.area();

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Min(0),
    ])
    .split(center_rect(56, 24, area));

    let title = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "S U M D O K U",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Classic & Killer Sudoku",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, chunks[1]);

    let selector = Paragraph::new(vec![
        selector_line(
            "Variant",
            game.variant.label(),
            variant_color(game.variant),
            game.menu_field == MenuField::Variant,
        ),
        Line::from(""),
        selector_line(
            "Difficulty",
            game.difficulty.label(),
            difficulty_color(game.difficulty),
            game.menu_field == MenuField::Difficulty,
        ),
    ])
    .alignment(Alignment::Center);
    f.render_widget(selector, chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(Span::styled(
            "Controls",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        control_line("↑/↓", "Switch selector"),
        control_line("←/→", "Change value"),
        control_line("Enter", "Start game"),
        control_line("q", "Quit"),
    ])
    .alignment(Alignment::Center);
    f.render_widget(controls, chunks[5]);

    if let Some(status) = &game.status {
        let msg = Paragraph::new(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Red),
        )))
        .alignment(Alignment::Center);
        f.render_widget(msg, chunks[6]);
    }
}

fn selector_line(label: &str, value: &str, color: Color, focused: bool) -> Line<'static> {
    let arrow_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(Color::White)),
        Span::styled("◄  ", arrow_style),
        Span::styled(
            format!("{value:^8}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ►", arrow_style),
    ])
}

fn control_line(key: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>6}"), Style::default().fg(Color::Yellow)),
        Span::styled(format!("  {action}"), Style::default().fg(Color::Gray)),
    ])
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

fn variant_color(variant: Variant) -> Color {
    match variant {
        Variant::Classic => Color::Cyan,
        Variant::Killer => Color::Magenta,
    }
}

// ── Playing screen ───────────────────────────────────────────────────────────

fn draw_playing(f: &mut Frame, game: &Game) {
    let area = f.area();

    let outer = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    let main_area = outer[0];
    let bottom_area = outer[1];

    let h_chunks = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(GRID_WIDTH + 2),
        Constraint::Length(2),
        Constraint::Length(28),
        Constraint::Min(0),
    ])
    .split(main_area);

    let grid_v = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(GRID_HEIGHT + 2),
        Constraint::Min(0),
    ])
    .split(h_chunks[1]);

    draw_grid(f, game, grid_v[1]);

    let panel_v = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(14),
        Constraint::Min(0),
    ])
    .split(h_chunks[3]);

    draw_info_panel(f, game, panel_v[1]);

    if let Some(status) = &game.status {
        let msg = Paragraph::new(Line::from(Span::styled(
            format!(" {status}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        f.render_widget(msg, bottom_area);
    } else {
        draw_key_hints(f, bottom_area);
    }
}

fn draw_key_hints(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" 1-9", Style::default().fg(Color::Yellow)),
        Span::styled(" place  ", Style::default().fg(Color::DarkGray)),
        Span::styled("0/Del", Style::default().fg(Color::Yellow)),
        Span::styled(" erase  ", Style::default().fg(Color::DarkGray)),
        Span::styled("r/c/b", Style::default().fg(Color::Yellow)),
        Span::styled(" solve row/col/block  ", Style::default().fg(Color::DarkGray)),
        Span::styled("k", Style::default().fg(Color::Yellow)),
        Span::styled(" check  ", Style::default().fg(Color::DarkGray)),
        Span::styled("n", Style::default().fg(Color::Yellow)),
        Span::styled(" new  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Space", Style::default().fg(Color::Yellow)),
        Span::styled(" pause  ", Style::default().fg(Color::DarkGray)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(" quit", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(hints), area);
}

fn draw_info_panel(f: &mut Frame, game: &Game, area: Rect) {
    let block = Block::bordered()
        .title(" Game ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::White));

    let violation_count = game
        .session
        .as_ref()
        .map(|s| s.violations().len())
        .unwrap_or(0);
    let violation_style = if violation_count == 0 {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Variant     ", Style::default().fg(Color::Gray)),
            Span::styled(
                game.variant.label(),
                Style::default()
                    .fg(variant_color(game.variant))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Difficulty  ", Style::default().fg(Color::Gray)),
            Span::styled(
                game.difficulty.label(),
                Style::default()
                    .fg(difficulty_color(game.difficulty))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Time        ", Style::default().fg(Color::Gray)),
            Span::styled(game.format_time(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("  Conflicts   ", Style::default().fg(Color::Gray)),
            Span::styled(violation_count.to_string(), violation_style),
        ]),
    ];

    if game.variant == Variant::Killer {
        let completed_cages = game
            .session
            .as_ref()
            .and_then(|s| s.cages().map(|c| (s, c)))
            .map(|(s, cages)| {
                cages
                    .cages()
                    .iter()
                    .filter(|cage| s.completed_cells().contains(&cage.cells[0]))
                    .count()
            })
            .unwrap_or(0);
        let total = game
            .session
            .as_ref()
            .and_then(|s| s.cages())
            .map(|c| c.cages().len())
            .unwrap_or(0);
        lines.push(Line::from(vec![
            Span::styled("  Cages done  ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{completed_cages}/{total}"),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Conflicts highlight red;",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "  finished cages green.",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Grid ─────────────────────────────────────────────────────────────────────

enum RowKind {
    Border(usize),
    CellRow { grid_row: usize, sub_row: usize },
}

fn classify_row(visual_row: u16) -> RowKind {
    let v = visual_row as usize;
    if v % 4 == 0 {
        RowKind::Border(v / 4)
    } else {
        RowKind::CellRow {
            grid_row: v / 4,
            sub_row: v % 4 - 1,
        }
    }
}

fn is_thick(border_idx: usize) -> bool {
    border_idx % 3 == 0
}

fn draw_grid(f: &mut Frame, game: &Game, area: Rect) {
    let Some(session) = &game.session else {
        return;
    };
    let cages = session.cages();

    let mut lines: Vec<Line> = Vec::with_capacity(GRID_HEIGHT as usize);
    for visual_row in 0..GRID_HEIGHT {
        match classify_row(visual_row) {
            RowKind::Border(border_idx) => {
                lines.push(horizontal_border(border_idx, cages));
            }
            RowKind::CellRow { grid_row, sub_row } => {
                lines.push(cell_row(game, session, cages, grid_row, sub_row));
            }
        }
    }

    let title = match game.variant {
        Variant::Classic => " Sudoku ",
        Variant::Killer => " Killer Sudoku ",
    };
    let block = Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::White));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// One horizontal border line. In Killer mode the thin segments between
/// vertically adjacent same-cage cells are left open, so cages read as
/// connected regions; block borders always win.
fn horizontal_border(border_idx: usize, cages: Option<&CageSet>) -> Line<'static> {
    let thick_row = is_thick(border_idx);
    let mut spans: Vec<Span> = Vec::with_capacity(19);

    for seg in 0..19 {
        if seg % 2 == 0 {
            let border_col = seg / 2;
            let ch = junction(border_idx, border_col);
            let style = if thick_row || is_thick(border_col) {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(ch.to_string(), style));
        } else {
            let col = (seg - 1) / 2;
            if thick_row {
                spans.push(Span::styled(
                    "═══════",
                    Style::default().fg(Color::White),
                ));
            } else {
                let open = cages
                    .map(|cg| cg.same_cage((border_idx - 1, col), (border_idx, col)))
                    .unwrap_or(false);
                if open {
                    spans.push(Span::raw("       "));
                } else {
                    spans.push(Span::styled(
                        "───────",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
        }
    }
    Line::from(spans)
}

fn junction(border_row: usize, border_col: usize) -> char {
    let tr = is_thick(border_row);
    let tc = is_thick(border_col);
    match (border_row, border_col) {
        (0, 0) => '╔',
        (0, 9) => '╗',
        (9, 0) => '╚',
        (9, 9) => '╝',
        (0, _) if tc => '╦',
        (9, _) if tc => '╩',
        (0, _) => '╤',
        (9, _) => '╧',
        (_, 0) if tr => '╠',
        (_, 9) if tr => '╣',
        (_, 0) => '╟',
        (_, 9) => '╢',
        _ => match (tr, tc) {
            (true, true) => '╬',
            (true, false) => '╪',
            (false, true) => '╫',
            (false, false) => '┼',
        },
    }
}

fn cell_row(
    game: &Game,
    session: &Session,
    cages: Option<&CageSet>,
    grid_row: usize,
    sub_row: usize,
) -> Line<'static> {
    let selected_val = game.selected_value();
    let mut spans: Vec<Span> = Vec::with_capacity(19);

    for seg in 0..19 {
        if seg % 2 == 0 {
            let border_col = seg / 2;
            spans.push(vertical_border(grid_row, border_col, cages));
        } else {
            let col = (seg - 1) / 2;
            spans.push(render_cell(game, session, cages, grid_row, col, sub_row, selected_val));
        }
    }
    Line::from(spans)
}

fn vertical_border(grid_row: usize, border_col: usize, cages: Option<&CageSet>) -> Span<'static> {
    if is_thick(border_col) {
        return Span::styled("║", Style::default().fg(Color::White));
    }
    let open = cages
        .map(|cg| cg.same_cage((grid_row, border_col - 1), (grid_row, border_col)))
        .unwrap_or(false);
    if open {
        Span::raw(" ")
    } else {
        Span::styled("│", Style::default().fg(Color::DarkGray))
    }
}

fn render_cell(
    game: &Game,
    session: &Session,
    cages: Option<&CageSet>,
    row: usize,
    col: usize,
    sub_row: usize,
    selected_val: Option<u8>,
) -> Span<'static> {
    let cell = session.board()[row][col];
    let is_selected = row == game.cursor_row && col == game.cursor_col;
    let is_violation = session.violations().contains(&(row, col));
    let is_completed = session.completed_cells().contains(&(row, col));
    let is_same_number = selected_val.is_some() && cell.value() == selected_val && !is_selected;

    let bg = if is_selected {
        Color::Yellow
    } else if is_violation {
        Color::Red
    } else if is_completed {
        Color::Green
    } else if is_same_number {
        Color::DarkGray
    } else {
        Color::Reset
    };

    // Killer: the cage's first cell carries the sum label in its top corner.
    if sub_row == 0 {
        if let Some(cages) = cages {
            let cage = &cages.cages()[cages.cage_of(row, col)];
            if cage.label_cell() == (row, col) {
                let fg = if bg == Color::Reset {
                    Color::Cyan
                } else {
                    Color::Black
                };
                return Span::styled(
                    format!("{:<7}", cage.target),
                    Style::default().fg(fg).bg(bg),
                );
            }
        }
    }

    if sub_row != 1 {
        return Span::styled("       ", Style::default().bg(bg));
    }

    match cell {
        Cell::Given(v) => {
            let fg = match bg {
                Color::Reset => Color::White,
                Color::Red => Color::White,
                _ => Color::Black,
            };
            Span::styled(
                format!("   {}   ", v),
                Style::default()
                    .fg(fg)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )
        }
        Cell::UserInput(v) => {
            let fg = match bg {
                Color::Reset => Color::Cyan,
                Color::Red => Color::White,
                _ => Color::Black,
            };
            Span::styled(format!("   {}   ", v), Style::default().fg(fg).bg(bg))
        }
        Cell::Empty => Span::styled("       ", Style::default().bg(bg)),
    }
}

// ── Paused / Won screens ─────────────────────────────────────────────────────

fn draw_paused(f: &mut Frame, game: &Game) {
    let area = center_rect(40, 7, f.area());
    let block = Block::bordered()
        .title(" Paused ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Yellow));
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Time {}", game.format_time()),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Space to resume",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(text, area);
}

fn draw_won(f: &mut Frame, game: &Game) {
    let area = center_rect(44, 9, f.area());
    let block = Block::bordered()
        .title(" Solved ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Green));
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Correct!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} · {} · {}",
                game.variant.label(),
                game.difficulty.label(),
                game.format_time()
            ),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "n new puzzle · Enter menu · q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(text, area);
}

fn draw_quit_confirm(f: &mut Frame) {
    let area = center_rect(34, 5, f.area());
    f.render_widget(Clear, area);
    let block = Block::bordered()
        .title(" Quit? ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Red));
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "y/Enter quit · any other key stay",
            Style::default().fg(Color::White),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(text, area);
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
