use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app_state::App;
use crate::error::WordsweepError;
use crate::panel::{Action, Mode};

impl App {
    /// Wait up to `timeout` for a terminal event and handle it
    pub fn handle_events(&mut self, timeout: Duration) -> Result<(), WordsweepError> {
        if !event::poll(timeout)? {
            return Ok(());
        }

        match event::read()? {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if is_ctrl(key, 'c') {
            self.should_quit = true;
            return;
        }

        self.notice = None;

        match self.panel.mode {
            Mode::Idle | Mode::ShowingResults => self.handle_search_key(key),
            Mode::ReplaceForm => self.handle_replace_key(key),
            Mode::DeleteConfirm => self.handle_delete_confirm_key(key),
            Mode::ReplaceDone { .. } | Mode::DeleteDone { .. } => self.handle_done_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.dispatch(Action::SubmitSearch),
            KeyCode::Esc => self.should_quit = true,
            _ if is_ctrl(key, 'r') => self.dispatch(Action::OpenReplace),
            _ if is_ctrl(key, 'd') => self.dispatch(Action::RequestDelete),
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Home
            | KeyCode::End
                if self.panel.mode == Mode::ShowingResults =>
            {
                self.scroll_results(key.code)
            }
            _ if is_newline_key(key) => {}
            _ => {
                if self.search_input.input(key) {
                    self.dispatch(Action::QueryChanged(self.query().to_string()));
                }
            }
        }
    }

    fn scroll_results(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.results_scroll.scroll_up(1),
            KeyCode::Down => self.results_scroll.scroll_down(1),
            KeyCode::PageUp => self.results_scroll.page_up(),
            KeyCode::PageDown => self.results_scroll.page_down(),
            KeyCode::Home => self.results_scroll.jump_to_top(),
            KeyCode::End => self.results_scroll.jump_to_bottom(),
            _ => {}
        }
    }

    fn handle_replace_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.dispatch(Action::SubmitReplace),
            KeyCode::Esc => self.dispatch(Action::CancelForm),
            _ if is_newline_key(key) => {}
            _ => {
                if self.replace_input.input(key) {
                    self.dispatch(Action::NewWordChanged(self.new_word().to_string()));
                }
            }
        }
    }

    fn handle_delete_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.dispatch(Action::ConfirmDelete)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.dispatch(Action::CancelForm)
            }
            _ => {}
        }
    }

    fn handle_done_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            self.reset();
        }
    }
}

fn is_ctrl(key: KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Keys the text inputs would turn into a line break
fn is_newline_key(key: KeyEvent) -> bool {
    is_ctrl(key, 'm') || is_ctrl(key, 'j')
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
