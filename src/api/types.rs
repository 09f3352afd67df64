//! Request, response and error types shared by the dispatcher and worker

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Generation number tying a response to the request that caused it
pub type RequestId = u64;

/// Errors that can occur while talking to the corpus backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("Backend error ({code}): {message}")]
    Status { code: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request was superseded before it finished
    #[error("Request cancelled")]
    Cancelled,

    /// Worker thread is gone
    #[error("Worker unavailable")]
    WorkerUnavailable,
}

/// A call against the corpus backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { query: String },
    Replace { old_word: String, new_word: String },
    Delete { word: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Search,
    Replace,
    Delete,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Search { .. } => CommandKind::Search,
            Command::Replace { .. } => CommandKind::Replace,
            Command::Delete { .. } => CommandKind::Delete,
        }
    }
}

/// Request sent from the main thread to the worker
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub id: RequestId,
    pub command: Command,
    pub cancel: CancellationToken,
}

/// Successful result of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sentences(Vec<String>),
    Replaced,
    Deleted,
}

/// Response sent from the worker back to the main thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub id: RequestId,
    pub kind: CommandKind,
    pub result: Result<Outcome, ApiError>,
}

/// Body of `GET /find_matching_sentences`
#[derive(Debug, Deserialize)]
pub struct MatchingSentences {
    pub matching_sentences: Vec<String>,
}

/// Body of `PUT /replace_word`
#[derive(Debug, Serialize)]
pub struct ReplaceWordBody<'a> {
    pub old_word: &'a str,
    pub new_word: &'a str,
}
