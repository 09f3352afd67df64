//! API Worker Thread
//!
//! Handles backend requests in a background thread to avoid blocking the UI.
//! Receives requests via channel, runs them on a current-thread tokio runtime,
//! and sends each result back tagged with its request id.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;

use super::client::WordsBackend;
use super::types::{ApiError, ApiRequest, ApiResponse, Command, Outcome};

/// Spawn the API worker thread
///
/// The worker owns the backend and processes one request at a time. It exits
/// when the request channel closes or the main thread stops listening.
pub fn spawn_worker<B>(
    backend: B,
    request_rx: Receiver<ApiRequest>,
    response_tx: Sender<ApiResponse>,
) -> JoinHandle<()>
where
    B: WordsBackend + Send + 'static,
{
    std::thread::spawn(move || {
        worker_loop(backend, request_rx, response_tx);
    })
}

/// Main worker loop - processes requests until the channel is closed
fn worker_loop<B: WordsBackend>(
    backend: B,
    request_rx: Receiver<ApiRequest>,
    response_tx: Sender<ApiResponse>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            // Dropping the receiver makes every later send fail, which the
            // dispatcher reports as WorkerUnavailable.
            log::error!("Failed to start API worker runtime: {}", e);
            return;
        }
    };

    while let Ok(request) = request_rx.recv() {
        let kind = request.command.kind();
        let result = runtime.block_on(execute(&backend, &request));

        if matches!(result, Err(ApiError::Cancelled)) {
            log::debug!("Cancelled request {}", request.id);
        }

        let response = ApiResponse {
            id: request.id,
            kind,
            result,
        };
        if response_tx.send(response).is_err() {
            // Main thread disconnected
            break;
        }
    }

    log::debug!("API worker thread shutting down");
}

/// Run one request, racing it against its cancellation token
async fn execute<B: WordsBackend>(backend: &B, request: &ApiRequest) -> Result<Outcome, ApiError> {
    if request.cancel.is_cancelled() {
        return Err(ApiError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = request.cancel.cancelled() => Err(ApiError::Cancelled),
        result = run_command(backend, &request.command) => result,
    }
}

async fn run_command<B: WordsBackend>(backend: &B, command: &Command) -> Result<Outcome, ApiError> {
    match command {
        Command::Search { query } => backend
            .find_matching_sentences(query)
            .await
            .map(Outcome::Sentences),
        Command::Replace { old_word, new_word } => backend
            .replace_word(old_word, new_word)
            .await
            .map(|_| Outcome::Replaced),
        Command::Delete { word } => backend
            .remove_similar_word(word)
            .await
            .map(|_| Outcome::Deleted),
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
