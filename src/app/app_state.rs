use std::mem;

use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::api::{ApiError, ApiResponse, CommandKind, Dispatcher, Outcome, RequestId};
use crate::panel::{Action, Effect, PanelState, Transition, reduce};
use crate::scroll::ScrollState;
use crate::shuffle::shuffled;

/// Application state
pub struct App {
    pub panel: PanelState,
    pub search_input: TextArea<'static>,
    pub replace_input: TextArea<'static>,
    pub results_scroll: ScrollState,
    /// One-line message for the status bar, cleared on the next key press
    pub notice: Option<String>,
    pub should_quit: bool,
    dispatcher: Dispatcher,
    shuffle: bool,
}

impl App {
    pub fn new(dispatcher: Dispatcher, shuffle: bool) -> Self {
        Self {
            panel: PanelState::new(),
            search_input: new_input(),
            replace_input: new_input(),
            results_scroll: ScrollState::new(),
            notice: None,
            should_quit: false,
            dispatcher,
            shuffle,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current text of the search box
    pub fn query(&self) -> &str {
        first_line(&self.search_input)
    }

    /// Current text of the replace box
    pub fn new_word(&self) -> &str {
        first_line(&self.replace_input)
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Fill the search box with `query` and submit it
    pub fn search_for(&mut self, query: &str) {
        self.search_input = new_input();
        self.search_input.insert_str(query);
        self.dispatch(Action::QueryChanged(self.query().to_string()));
        self.dispatch(Action::SubmitSearch);
    }

    /// Run `action` through the reducer and carry out its effect
    pub fn dispatch(&mut self, action: Action) {
        let Transition { state, effect } = reduce(mem::take(&mut self.panel), action);
        self.panel = state;

        match effect {
            Some(Effect::Send { id, command }) => {
                let kind = command.kind();
                if let Err(error) = self.dispatcher.send(id, command) {
                    log::error!("Failed to send request {}: {}", id, error);
                    self.dispatch(failed_completion(kind, id, error));
                }
            }
            Some(Effect::CancelInFlight) => {
                self.dispatcher.cancel_in_flight();
            }
            None => {}
        }
    }

    /// Back to a fresh, empty panel
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
        self.search_input = new_input();
        self.replace_input = new_input();
        self.results_scroll.reset();
    }

    /// Apply every response the worker has produced so far
    pub fn tick(&mut self) {
        while let Some(response) = self.dispatcher.poll() {
            self.handle_api_response(response);
        }
    }

    fn handle_api_response(&mut self, response: ApiResponse) {
        let ApiResponse { id, kind, result } = response;
        let current = self.panel.is_current(id);

        let action = match (kind, result) {
            (CommandKind::Search, Ok(Outcome::Sentences(sentences))) => Action::SearchCompleted {
                id,
                result: Ok(self.order_results(sentences)),
            },
            (CommandKind::Search, Ok(other)) => Action::SearchCompleted {
                id,
                result: Err(ApiError::Decode(format!("unexpected outcome {:?}", other))),
            },
            (CommandKind::Search, Err(error)) => Action::SearchCompleted {
                id,
                result: Err(error),
            },
            (CommandKind::Replace, result) => Action::ReplaceCompleted {
                id,
                result: result.map(|_| ()),
            },
            (CommandKind::Delete, result) => Action::DeleteCompleted {
                id,
                result: result.map(|_| ()),
            },
        };

        if current && kind == CommandKind::Search {
            self.results_scroll.reset();
        }
        self.dispatch(action);
    }

    fn order_results(&self, sentences: Vec<String>) -> Vec<String> {
        if self.shuffle {
            shuffled(&sentences, &mut rand::thread_rng())
        } else {
            sentences
        }
    }
}

fn failed_completion(kind: CommandKind, id: RequestId, error: ApiError) -> Action {
    match kind {
        CommandKind::Search => Action::SearchCompleted {
            id,
            result: Err(error),
        },
        CommandKind::Replace => Action::ReplaceCompleted {
            id,
            result: Err(error),
        },
        CommandKind::Delete => Action::DeleteCompleted {
            id,
            result: Err(error),
        },
    }
}

fn new_input() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    // Remove default underline from cursor line
    textarea.set_cursor_line_style(Style::default());
    textarea
}

fn first_line<'a>(textarea: &'a TextArea<'static>) -> &'a str {
    textarea.lines().first().map(String::as_str).unwrap_or("")
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
