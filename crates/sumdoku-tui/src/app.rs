use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::game::{Game, GameState, MenuField};
use crate::ui;
use sumdoku_core::Scope;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut game = Game::new();
    let result = run_loop(&mut terminal, &mut game);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, game))?;

        // Poll with 250ms timeout so the timer keeps ticking
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Only handle Press events (crossterm sends Press+Release on Windows)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_key(game, key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Handle a key event. Returns true if the app should quit.
fn handle_key(game: &mut Game, key: KeyEvent) -> bool {
    match game.state {
        GameState::Menu => handle_menu_key(game, key),
        GameState::Playing => handle_playing_key(game, key),
        GameState::Paused => handle_paused_key(game, key),
        GameState::Won => handle_won_key(game, key),
    }
}

fn handle_menu_key(game: &mut Game, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
            game.menu_field = match game.menu_field {
                MenuField::Variant => MenuField::Difficulty,
                MenuField::Difficulty => MenuField::Variant,
            };
        }
        KeyCode::Left => match game.menu_field {
            MenuField::Variant => game.variant = game.variant.toggle(),
            MenuField::Difficulty => game.difficulty = game.difficulty.prev(),
        },
        KeyCode::Right => match game.menu_field {
            MenuField::Variant => game.variant = game.variant.toggle(),
            MenuField::Difficulty => game.difficulty = game.difficulty.next(),
        },
        KeyCode::Enter => {
            game.start_new_game();
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            return true;
        }
        _ => {}
    }
    false
}

fn handle_playing_key(game: &mut Game, key: KeyEvent) -> bool {
    if game.show_quit_confirm {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
            _ => {
                game.show_quit_confirm = false;
            }
        }
        return false;
    }

    match key.code {
        KeyCode::Up => game.move_cursor(-1, 0),
        KeyCode::Down => game.move_cursor(1, 0),
        KeyCode::Left => game.move_cursor(0, -1),
        KeyCode::Right => game.move_cursor(0, 1),

        KeyCode::Char(c) => return handle_playing_char(game, c),

        KeyCode::Delete | KeyCode::Backspace => game.erase(),

        KeyCode::Esc => {
            game.show_quit_confirm = true;
        }

        _ => {}
    }
    false
}

fn handle_playing_char(game: &mut Game, c: char) -> bool {
    match c {
        // Only digits reach the engine; anything else is handled here or
        // dropped.
        '1'..='9' => game.place_number(c as u8 - b'0'),
        '0' => game.erase(),

        // Solve assists anchored at the cursor
        'r' | 'R' => game.solve(Scope::Row),
        'c' | 'C' => game.solve(Scope::Col),
        'b' | 'B' => game.solve(Scope::Block),

        'k' | 'K' => game.check(),
        'n' | 'N' => game.start_new_game(),

        ' ' => game.toggle_pause(),

        'q' | 'Q' => {
            game.show_quit_confirm = true;
        }

        _ => {}
    }
    false
}

fn handle_paused_key(game: &mut Game, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Esc | KeyCode::Enter => {
            game.toggle_pause();
        }
        _ => {}
    }
    false
}

fn handle_won_key(game: &mut Game, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter | KeyCode::Char('m') => game.state = GameState::Menu,
        KeyCode::Char('n') => game.start_new_game(),
        KeyCode::Char('q') | KeyCode::Esc => {
            return true;
        }
        _ => {}
    }
    false
}
