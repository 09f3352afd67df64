use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tokio_util::sync::CancellationToken;

use super::client::WordsBackend;
use super::types::{ApiError, ApiRequest, ApiResponse, Command, CommandKind, RequestId};
use super::worker::spawn_worker;

/// Main-thread handle on the API worker
///
/// Keeps at most one request in flight. Sending a new request cancels the
/// previous one; its late response still arrives and is fenced off by id.
pub struct Dispatcher {
    request_tx: Sender<ApiRequest>,
    response_rx: Receiver<ApiResponse>,
    in_flight: Option<InFlightRequest>,
}

struct InFlightRequest {
    id: RequestId,
    kind: CommandKind,
    cancel: CancellationToken,
}

impl Dispatcher {
    pub fn new(request_tx: Sender<ApiRequest>, response_rx: Receiver<ApiResponse>) -> Self {
        Self {
            request_tx,
            response_rx,
            in_flight: None,
        }
    }

    /// Spawn a worker for `backend` and return a dispatcher wired to it
    pub fn spawn<B>(backend: B) -> Self
    where
        B: WordsBackend + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        spawn_worker(backend, request_rx, response_tx);
        Self::new(request_tx, response_rx)
    }

    /// Hand a command to the worker
    pub fn send(&mut self, id: RequestId, command: Command) -> Result<(), ApiError> {
        self.cancel_in_flight();

        let kind = command.kind();
        let cancel = CancellationToken::new();
        let request = ApiRequest {
            id,
            command,
            cancel: cancel.clone(),
        };

        self.request_tx
            .send(request)
            .map_err(|_| ApiError::WorkerUnavailable)?;

        self.in_flight = Some(InFlightRequest { id, kind, cancel });
        Ok(())
    }

    /// Cancel the in-flight request, if any
    ///
    /// Returns true if a request was cancelled.
    pub fn cancel_in_flight(&mut self) -> bool {
        if let Some(request) = self.in_flight.take() {
            request.cancel.cancel();
            log::debug!("Cancelled in-flight request {}", request.id);
            return true;
        }
        false
    }

    pub fn in_flight_id(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|request| request.id)
    }

    /// Take the next response from the worker without blocking
    pub fn poll(&mut self) -> Option<ApiResponse> {
        match self.response_rx.try_recv() {
            Ok(response) => {
                if self.in_flight_id() == Some(response.id) {
                    self.in_flight = None;
                }
                Some(response)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Worker gone: surface the in-flight request as failed once
                self.in_flight.take().map(|request| {
                    log::warn!(
                        "API worker disconnected with request {} in flight",
                        request.id
                    );
                    ApiResponse {
                        id: request.id,
                        kind: request.kind,
                        result: Err(ApiError::WorkerUnavailable),
                    }
                })
            }
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod dispatcher_tests;
