//! Corpus backend access
//!
//! The main thread talks to a worker thread through the `Dispatcher`; the
//! worker owns a `WordsBackend` (reqwest in production) and answers every
//! request with an `ApiResponse` carrying the request's id.

pub mod client;
pub mod dispatcher;
pub mod types;
mod worker;

pub use client::{HttpBackend, WordsBackend, parse_base_url};
pub use dispatcher::Dispatcher;
pub use types::{ApiError, ApiRequest, ApiResponse, Command, CommandKind, Outcome, RequestId};
pub use worker::spawn_worker;
