//! Application controller: the two-mode state machine.
//!
//! [`App`] owns the input form, the table sequence, and the active index,
//! and dispatches every key or resize event to whichever mode is current.
//! The submit pipeline runs synchronously inside event handling; results
//! are assembled into a local buffer and swapped in only on total success,
//! so a failed fetch never disturbs the tables already on screen.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::input::{InputError, InputForm};
use crate::table::{TableData, TableView};
use crate::wiki::{FetchError, TableSource};

/// Which surface currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Editing the query fields
    Collecting,
    /// Navigating fetched tables
    Browsing,
}

/// Result of handling an event; tells the main loop what to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
}

/// Why a submit attempt was rejected. One slot in [`App::error`] holds the
/// most recent of these until the next successful submit.
#[derive(Debug)]
pub enum SubmitError {
    Input(InputError),
    Fetch(FetchError),
    /// The service answered but the page has no tables
    NoTables(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Input(err) => err.fmt(f),
            SubmitError::Fetch(err) => err.fmt(f),
            SubmitError::NoTables(page) => write!(f, "no tables on page {page}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<InputError> for SubmitError {
    fn from(err: InputError) -> Self {
        SubmitError::Input(err)
    }
}

impl From<FetchError> for SubmitError {
    fn from(err: FetchError) -> Self {
        SubmitError::Fetch(err)
    }
}

/// Top-level application state.
pub struct App<S> {
    source: S,
    pub mode: Mode,
    pub form: InputForm,
    pub tables: Vec<TableView>,
    /// Index of the table shown while browsing
    pub active: usize,
    /// Most recent submit failure, cleared on success
    pub error: Option<SubmitError>,
    pub width: u16,
    pub height: u16,
}

// Accessors that never touch the fetch source, usable by callers that
// do not carry its bound.
impl<S> App<S> {
    /// The table under the active index, if any.
    pub fn active_table(&self) -> Option<&TableView> {
        self.tables.get(self.active)
    }

    /// Store the new viewport size. Existing tables keep their layout
    /// until an explicit reset.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

impl<S: TableSource> App<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            mode: Mode::Collecting,
            form: InputForm::new(),
            tables: Vec::new(),
            active: 0,
            error: None,
            width: 0,
            height: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        match self.mode {
            Mode::Collecting => self.handle_collecting_key(key),
            Mode::Browsing => self.handle_browsing_key(key),
        }
    }

    fn handle_collecting_key(&mut self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyAction::Quit;
            }
            KeyCode::Enter if self.form.submit_focused() => self.submit(),
            KeyCode::Tab | KeyCode::Enter | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            _ => self.form.handle_key(&key),
        }
        KeyAction::None
    }

    fn handle_browsing_key(&mut self, key: KeyEvent) -> KeyAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Char('c') if ctrl => return KeyAction::Quit,
            KeyCode::Char('n') if ctrl => self.new_query(),
            KeyCode::Tab => self.next_table(),
            KeyCode::BackTab => self.prev_table(),
            KeyCode::Char('k') if ctrl => {
                if let Some(table) = self.tables.get_mut(self.active) {
                    table.switch_cursor_mode();
                }
            }
            KeyCode::Char('d') if ctrl => {
                if let Some(table) = self.tables.get_mut(self.active) {
                    table.remove();
                }
            }
            KeyCode::Char('r') if ctrl => {
                let height = self.table_height();
                if let Some(table) = self.tables.get_mut(self.active) {
                    table.reset(height);
                }
            }
            KeyCode::Char('t') if ctrl => self.close_active_table(),
            KeyCode::Enter | KeyCode::Down | KeyCode::Char('j') if !ctrl => {
                if let Some(table) = self.tables.get_mut(self.active) {
                    table.move_down(1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') if !ctrl => {
                if let Some(table) = self.tables.get_mut(self.active) {
                    table.move_up(1);
                }
            }
            KeyCode::Char('g') if !ctrl => {
                if let Some(table) = self.tables.get_mut(self.active) {
                    table.go_to_top();
                }
            }
            KeyCode::Char('G') if !ctrl => {
                if let Some(table) = self.tables.get_mut(self.active) {
                    table.go_to_bottom();
                }
            }
            _ => {}
        }
        KeyAction::None
    }

    /// Run the validation + fetch pipeline. On success the new tables
    /// replace the old sequence and the app switches to browsing; on
    /// failure only the error slot changes.
    fn submit(&mut self) {
        match self.run_pipeline() {
            Ok(tables) => {
                info!(count = tables.len(), "query loaded");
                self.error = None;
                self.tables = tables;
                self.active = 0;
                self.mode = Mode::Browsing;
            }
            Err(err) => {
                debug!(%err, "submit rejected");
                self.error = Some(err);
            }
        }
    }

    fn run_pipeline(&self) -> Result<Vec<TableView>, SubmitError> {
        let request = self.form.parse()?;
        let height = self.table_height();

        let mut tables = Vec::new();
        for (page, lang) in request.pages.iter().zip(&request.langs) {
            let raw = self.source.tables(page, lang, request.clean_refs)?;
            if raw.is_empty() {
                return Err(SubmitError::NoTables(page.clone()));
            }
            for table in raw {
                tables.push(TableView::new(
                    TableData::from_raw(table),
                    height,
                    request.max_column_width,
                ));
            }
        }
        Ok(tables)
    }

    /// Discard the table sequence and go back to collecting input, with
    /// focus on the first field.
    fn new_query(&mut self) {
        self.tables.clear();
        self.active = 0;
        self.mode = Mode::Collecting;
        self.form.reset_focus();
    }

    fn next_table(&mut self) {
        if !self.tables.is_empty() {
            self.active = (self.active + 1) % self.tables.len();
        }
    }

    fn prev_table(&mut self) {
        if !self.tables.is_empty() {
            if self.active == 0 {
                self.active = self.tables.len() - 1;
            } else {
                self.active -= 1;
            }
        }
    }

    /// Remove the active table. Closing the last element retreats the
    /// active index; closing any other element leaves it in place, now
    /// referencing the table that shifted in. An empty sequence is a
    /// valid browsing state.
    fn close_active_table(&mut self) {
        if self.tables.is_empty() {
            return;
        }
        self.tables.remove(self.active);
        if self.active >= self.tables.len() {
            self.active = self.tables.len().saturating_sub(1);
        }
    }

    /// Viewport height available to a table: everything above the hint
    /// line.
    fn table_height(&self) -> u16 {
        self.height.saturating_sub(1)
    }
}
