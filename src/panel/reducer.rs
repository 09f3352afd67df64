//! Panel state transitions
//!
//! `reduce` is the only place panel state changes. It never performs I/O:
//! requests and cancellations come back as an `Effect` for the caller.

use super::action::Action;
use super::panel_state::{DELETE_ERROR, Mode, PanelState, REPLACE_ERROR, SEARCH_ERROR};
use crate::api::{Command, CommandKind, RequestId};

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a request; supersedes anything in flight
    Send { id: RequestId, command: Command },
    CancelInFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: PanelState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn stay(state: PanelState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    fn with(state: PanelState, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

pub fn reduce(mut state: PanelState, action: Action) -> Transition {
    match action {
        Action::QueryChanged(query) => {
            if state.mode.accepts_query_input() {
                state.query = query;
            }
            Transition::stay(state)
        }

        Action::NewWordChanged(new_word) => {
            if state.mode == Mode::ReplaceForm {
                state.new_word = new_word;
            }
            Transition::stay(state)
        }

        Action::SubmitSearch => {
            if !state.mode.accepts_query_input() || state.query.trim().is_empty() {
                return Transition::stay(state);
            }
            let id = state.issue(CommandKind::Search);
            let command = Command::Search {
                query: state.query.clone(),
            };
            Transition::with(state, Effect::Send { id, command })
        }

        Action::OpenReplace => {
            if state.mode != Mode::ShowingResults {
                return Transition::stay(state);
            }
            state.mode = Mode::ReplaceForm;
            state.error = None;
            leave_results(state)
        }

        Action::RequestDelete => {
            if state.mode != Mode::ShowingResults {
                return Transition::stay(state);
            }
            state.mode = Mode::DeleteConfirm;
            state.error = None;
            leave_results(state)
        }

        Action::SubmitReplace => {
            if state.mode != Mode::ReplaceForm || state.is_busy() {
                return Transition::stay(state);
            }
            let id = state.issue(CommandKind::Replace);
            let command = Command::Replace {
                old_word: state.query.clone(),
                new_word: state.new_word.clone(),
            };
            Transition::with(state, Effect::Send { id, command })
        }

        Action::ConfirmDelete => {
            if state.mode != Mode::DeleteConfirm || state.is_busy() {
                return Transition::stay(state);
            }
            let id = state.issue(CommandKind::Delete);
            let command = Command::Delete {
                word: state.query.clone(),
            };
            Transition::with(state, Effect::Send { id, command })
        }

        Action::CancelForm => {
            if matches!(state.mode, Mode::ReplaceForm | Mode::DeleteConfirm) && !state.is_busy() {
                state.mode = Mode::ShowingResults;
                // Form errors belong to the form
                state.error = None;
            }
            Transition::stay(state)
        }

        Action::Reset => {
            let had_request = state.is_busy();
            let fresh = PanelState {
                last_request_id: state.last_request_id,
                ..PanelState::default()
            };
            if had_request {
                Transition::with(fresh, Effect::CancelInFlight)
            } else {
                Transition::stay(fresh)
            }
        }

        Action::SearchCompleted { id, result } => {
            if !state.is_current(id) {
                log::debug!("Ignoring stale search response {}", id);
                return Transition::stay(state);
            }
            state.in_flight = None;
            state.has_searched = true;
            state.mode = Mode::ShowingResults;

            match result {
                Ok(sentences) => {
                    state.result_count = sentences.len();
                    state.results = sentences;
                    state.error = None;
                }
                Err(e) => {
                    log::warn!("Search for {:?} failed: {}", state.query, e);
                    state.results.clear();
                    state.result_count = 0;
                    state.error = Some(SEARCH_ERROR.to_string());
                }
            }
            Transition::stay(state)
        }

        Action::ReplaceCompleted { id, result } => {
            if !state.is_current(id) {
                log::debug!("Ignoring stale replace response {}", id);
                return Transition::stay(state);
            }
            state.in_flight = None;

            match result {
                Ok(()) => {
                    state.results.clear();
                    state.error = None;
                    state.mode = Mode::ReplaceDone {
                        old_word: state.query.clone(),
                        new_word: state.new_word.clone(),
                    };
                }
                Err(e) => {
                    log::warn!("Replacing {:?} failed: {}", state.query, e);
                    state.error = Some(REPLACE_ERROR.to_string());
                }
            }
            Transition::stay(state)
        }

        Action::DeleteCompleted { id, result } => {
            if !state.is_current(id) {
                log::debug!("Ignoring stale delete response {}", id);
                return Transition::stay(state);
            }
            state.in_flight = None;

            match result {
                Ok(()) => {
                    state.results.clear();
                    state.error = None;
                    state.mode = Mode::DeleteDone {
                        word: state.query.clone(),
                    };
                }
                Err(e) => {
                    log::warn!("Deleting {:?} failed: {}", state.query, e);
                    state.error = Some(DELETE_ERROR.to_string());
                }
            }
            Transition::stay(state)
        }
    }
}

/// A search still running when the results view is left is dropped
fn leave_results(mut state: PanelState) -> Transition {
    if state.abandon_search() {
        Transition::with(state, Effect::CancelInFlight)
    } else {
        Transition::stay(state)
    }
}

#[cfg(test)]
#[path = "reducer_tests.rs"]
mod reducer_tests;
