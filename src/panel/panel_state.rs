use crate::api::{CommandKind, RequestId};

pub const SEARCH_ERROR: &str = "An error occurred while fetching results.";
pub const REPLACE_ERROR: &str = "An error occurred while replacing the word.";
pub const DELETE_ERROR: &str = "An error occurred while deleting results.";

/// Which view of the panel is visible
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Nothing searched yet
    #[default]
    Idle,
    ShowingResults,
    ReplaceForm,
    DeleteConfirm,
    ReplaceDone {
        old_word: String,
        new_word: String,
    },
    DeleteDone {
        word: String,
    },
}

impl Mode {
    /// Whether the search box accepts edits and Enter
    pub fn accepts_query_input(&self) -> bool {
        matches!(self, Mode::Idle | Mode::ShowingResults)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Mode::ReplaceDone { .. } | Mode::DeleteDone { .. })
    }
}

/// The request the panel is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub id: RequestId,
    pub kind: CommandKind,
}

/// View state of the search panel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelState {
    pub query: String,
    pub new_word: String,
    pub results: Vec<String>,
    /// Size of the last search, kept after replace/delete for their messages
    pub result_count: usize,
    pub has_searched: bool,
    pub error: Option<String>,
    pub mode: Mode,
    pub in_flight: Option<InFlight>,
    /// Last issued request id
    pub last_request_id: RequestId,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn busy_with(&self) -> Option<CommandKind> {
        self.in_flight.map(|f| f.kind)
    }

    /// Whether `id` is the response the panel is waiting for
    pub fn is_current(&self, id: RequestId) -> bool {
        self.in_flight.is_some_and(|f| f.id == id)
    }

    /// "No results found" shows only after a search that matched nothing
    pub fn shows_no_results_notice(&self) -> bool {
        self.mode == Mode::ShowingResults
            && self.has_searched
            && self.results.is_empty()
            && self.error.is_none()
            && !self.is_busy()
    }

    /// Allocate the next request id and mark it in flight
    pub(super) fn issue(&mut self, kind: CommandKind) -> RequestId {
        let id = self.last_request_id.wrapping_add(1);
        self.last_request_id = id;
        self.in_flight = Some(InFlight { id, kind });
        id
    }

    /// Drop an in-flight search; returns true if there was one
    pub(super) fn abandon_search(&mut self) -> bool {
        if self.busy_with() == Some(CommandKind::Search) {
            self.in_flight = None;
            return true;
        }
        false
    }
}
