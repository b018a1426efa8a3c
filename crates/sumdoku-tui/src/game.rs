use std::time::Instant;

use sumdoku_core::catalogue::Catalogue;
use sumdoku_core::{CheckOutcome, Difficulty, EngineError, Scope, Session, Variant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    Won,
}

/// Which selector has focus on the menu screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuField {
    Variant,
    Difficulty,
}

pub struct Game {
    pub catalogue: Catalogue,
    pub session: Option<Session>,
    pub variant: Variant,
    pub difficulty: Difficulty,
    pub state: GameState,
    pub menu_field: MenuField,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub status: Option<String>,
    pub timer_start: Option<Instant>,
    pub elapsed_secs: u64,
    pub paused_elapsed: u64,
    pub show_quit_confirm: bool,
}

impl Game {
    pub fn new() -> Self {
        let catalogue = Catalogue::builtin();
        if cfg!(debug_assertions) {
            // Dev-only sweep; issues are logged inside and never fatal.
            catalogue.validate();
        }

        Self {
            catalogue,
            session: None,
            variant: Variant::Classic,
            difficulty: Difficulty::Easy,
            state: GameState::Menu,
            menu_field: MenuField::Variant,
            cursor_row: 4,
            cursor_col: 4,
            status: None,
            timer_start: None,
            elapsed_secs: 0,
            paused_elapsed: 0,
            show_quit_confirm: false,
        }
    }

    pub fn start_new_game(&mut self) {
        match self.load_session() {
            Ok(()) => {
                self.cursor_row = 4;
                self.cursor_col = 4;
                self.state = GameState::Playing;
                self.status = None;
                self.timer_start = Some(Instant::now());
                self.elapsed_secs = 0;
                self.paused_elapsed = 0;
                self.show_quit_confirm = false;
            }
            Err(e) => {
                self.status = Some(format!("Cannot start: {e}"));
            }
        }
    }

    fn load_session(&mut self) -> Result<(), EngineError> {
        let index = self
            .catalogue
            .random_index_for(self.difficulty)
            .ok_or(EngineError::EmptyCatalogue)?;
        let entry = self.catalogue.entry(index).ok_or(EngineError::EmptyCatalogue)?;

        let mut session = Session::load(self.variant, entry, self.difficulty.clue_count())?;
        session.select(4, 4);
        self.session = Some(session);
        Ok(())
    }

    pub fn move_cursor(&mut self, dr: i32, dc: i32) {
        self.cursor_row = (self.cursor_row as i32 + dr).rem_euclid(9) as usize;
        self.cursor_col = (self.cursor_col as i32 + dc).rem_euclid(9) as usize;
        if let Some(session) = &mut self.session {
            session.select(self.cursor_row, self.cursor_col);
        }
    }

    pub fn place_number(&mut self, num: u8) {
        if self.state != GameState::Playing {
            return;
        }
        if let Some(session) = &mut self.session {
            session.set_cell(self.cursor_row, self.cursor_col, num);
            self.status = None;
        }
    }

    pub fn erase(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        if let Some(session) = &mut self.session {
            session.clear_cell(self.cursor_row, self.cursor_col);
            self.status = None;
        }
    }

    pub fn solve(&mut self, scope: Scope) {
        if self.state != GameState::Playing {
            return;
        }
        if let Some(session) = &mut self.session {
            match session.solve_scope(scope) {
                Ok(()) => self.status = None,
                Err(EngineError::NoSelection) => {
                    self.status = Some("Select a cell first".to_string());
                }
                Err(e) => self.status = Some(e.to_string()),
            }
        }
    }

    pub fn check(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(session) = &self.session else {
            return;
        };
        match session.check() {
            CheckOutcome::Incomplete => {
                self.status = Some("Puzzle incomplete.".to_string());
            }
            CheckOutcome::Errors => {
                self.status = Some("There are errors.".to_string());
            }
            CheckOutcome::Correct => {
                self.status = Some("Correct!".to_string());
                if let Some(start) = self.timer_start {
                    self.elapsed_secs = self.paused_elapsed + start.elapsed().as_secs();
                }
                self.state = GameState::Won;
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Playing => {
                if let Some(start) = self.timer_start {
                    self.paused_elapsed += start.elapsed().as_secs();
                }
                self.state = GameState::Paused;
                self.timer_start = None;
            }
            GameState::Paused => {
                self.timer_start = Some(Instant::now());
                self.state = GameState::Playing;
            }
            _ => {}
        }
    }

    pub fn get_elapsed_secs(&self) -> u64 {
        match self.state {
            GameState::Won => self.elapsed_secs,
            GameState::Paused => self.paused_elapsed,
            GameState::Playing => {
                self.paused_elapsed
                    + self
                        .timer_start
                        .map(|s| s.elapsed().as_secs())
                        .unwrap_or(0)
            }
            GameState::Menu => 0,
        }
    }

    pub fn format_time(&self) -> String {
        let secs = self.get_elapsed_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn selected_value(&self) -> Option<u8> {
        self.session
            .as_ref()
            .and_then(|s| s.board()[self.cursor_row][self.cursor_col].value())
    }
}
