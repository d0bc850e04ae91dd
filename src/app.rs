use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::widgets::TableState;
use ratatui::{DefaultTerminal, Frame};

use crate::state::AppState;
use crate::ui::dialogs::{ColumnsDialog, DialogResult, FilterDialog, JumpDialog};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Application – event loop and key dispatch
// ---------------------------------------------------------------------------

/// What the application is currently showing. Dialogs carry their own edit
/// state and render as overlays above the table.
enum Mode {
    Table,
    Filter(FilterDialog),
    Columns(ColumnsDialog),
    Jump(JumpDialog),
    Plot,
}

pub struct App {
    state: AppState,
    path: PathBuf,
    mode: Mode,
    table_state: TableState,
    should_quit: bool,
}

impl App {
    pub fn new(state: AppState, path: PathBuf) -> Self {
        let mut app = App {
            state,
            path,
            mode: Mode::Table,
            table_state: TableState::default(),
            should_quit: false,
        };
        let total = app.state.table().map(|t| t.len()).unwrap_or(0);
        app.state.status = Some(format!(
            "Loaded {total} lines. Press f to choose elements."
        ));
        app
    }

    pub fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.on_key(key);
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        if matches!(self.mode, Mode::Plot) {
            plot::render(frame, frame.area(), &self.state);
            return;
        }
        table::render(
            frame,
            frame.area(),
            &self.state,
            &self.path,
            &mut self.table_state,
        );
        match &self.mode {
            Mode::Filter(dialog) => dialog.render(frame),
            Mode::Columns(dialog) => dialog.render(frame),
            Mode::Jump(dialog) => dialog.render(frame),
            Mode::Table | Mode::Plot => {}
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let mode = std::mem::replace(&mut self.mode, Mode::Table);
        self.mode = match mode {
            Mode::Table => self.on_table_key(key),
            Mode::Plot => Mode::Table,
            Mode::Jump(mut dialog) => match dialog.on_key(key) {
                DialogResult::Open => Mode::Jump(dialog),
                DialogResult::Cancel => Mode::Table,
                DialogResult::Confirm(target) => {
                    self.jump_to(target);
                    Mode::Table
                }
            },
            Mode::Columns(mut dialog) => match dialog.on_key(key) {
                DialogResult::Open => Mode::Columns(dialog),
                DialogResult::Cancel => Mode::Table,
                DialogResult::Confirm(columns) => {
                    self.state.set_columns(columns);
                    Mode::Table
                }
            },
            Mode::Filter(mut dialog) => match dialog.on_key(key) {
                DialogResult::Open => Mode::Filter(dialog),
                DialogResult::Cancel => Mode::Table,
                DialogResult::Confirm(()) => match dialog.apply(&mut self.state.filters) {
                    Ok(()) => {
                        self.apply_filters();
                        Mode::Table
                    }
                    Err(message) => {
                        self.state.status = Some(message);
                        Mode::Filter(dialog)
                    }
                },
            },
        };
    }

    fn on_table_key(&mut self, key: KeyEvent) -> Mode {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') => return Mode::Columns(ColumnsDialog::new(&self.state.columns)),
            KeyCode::Char('f') => {
                if let Some(table) = self.state.table() {
                    return Mode::Filter(FilterDialog::new(&self.state.filters, &table.elements));
                }
                self.state.status = Some("No line list loaded.".to_string());
            }
            KeyCode::Char('v') => {
                if self.state.rows().is_empty() {
                    self.state.status =
                        Some("Nothing to visualize. Press f and pick at least one element.".to_string());
                } else {
                    return Mode::Plot;
                }
            }
            KeyCode::Char('j') => return Mode::Jump(JumpDialog::default()),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-20),
            KeyCode::PageDown => self.move_cursor(20),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(usize::MAX),
            _ => {}
        }
        Mode::Table
    }

    fn select(&mut self, index: usize) {
        let len = self.state.rows().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(index.min(len - 1)));
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let current = self.table_state.selected().unwrap_or(0) as isize;
        self.select(current.saturating_add(delta).max(0) as usize);
    }

    fn jump_to(&mut self, target: f64) {
        match self.state.jump(target) {
            Ok(index) => {
                self.select(index);
                self.state.status = Some(format!("Jumped to {target} nm."));
            }
            Err(e) => self.state.status = Some(e.to_string()),
        }
    }

    fn apply_filters(&mut self) {
        match self.state.refresh() {
            Ok(()) => {
                self.state.status =
                    Some(format!("Showing {} spectral lines.", self.state.rows().len()));
                // Keep the cursor inside the new row set.
                self.select(self.table_state.selected().unwrap_or(0));
            }
            Err(e) => self.state.status = Some(e.to_string()),
        }
    }

    fn reload(&mut self) {
        match self.state.load(&self.path) {
            Ok(()) => {
                let total = self.state.table().map(|t| t.len()).unwrap_or(0);
                self.state.status = Some(format!("Reloaded {total} lines."));
                self.select(0);
            }
            Err(e) => {
                // The previous table stays in place; just report.
                log::error!("reload failed: {e}");
                self.state.status = Some(e.to_string());
            }
        }
    }
}
