use crate::api::{ApiError, RequestId};

/// Everything that can happen to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    QueryChanged(String),
    NewWordChanged(String),
    SubmitSearch,
    OpenReplace,
    SubmitReplace,
    RequestDelete,
    ConfirmDelete,
    /// Leave the replace form or delete confirmation
    CancelForm,
    /// Close and reopen the panel
    Reset,
    SearchCompleted {
        id: RequestId,
        result: Result<Vec<String>, ApiError>,
    },
    ReplaceCompleted {
        id: RequestId,
        result: Result<(), ApiError>,
    },
    DeleteCompleted {
        id: RequestId,
        result: Result<(), ApiError>,
    },
}
