//! HTTP client for the corpus backend
//!
//! Three endpoints: find matching sentences, replace a word, remove a word.
//! Query values go through reqwest's query builder, so they are URL-encoded.

use reqwest::{Client, Response, Url};

use super::types::{ApiError, MatchingSentences, ReplaceWordBody};
use crate::error::WordsweepError;

const FIND_PATH: &str = "find_matching_sentences";
const REPLACE_PATH: &str = "replace_word";
const REMOVE_PATH: &str = "remove_similar_word";

/// Operations the corpus backend offers
///
/// The worker drives these on its own runtime; tests swap in a mock.
pub trait WordsBackend {
    fn find_matching_sentences(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<String>, ApiError>>;

    fn replace_word(
        &self,
        old_word: &str,
        new_word: &str,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn remove_similar_word(&self, word: &str) -> impl Future<Output = Result<(), ApiError>>;
}

/// Parse and normalize the backend base URL
///
/// Only http and https are accepted. A trailing slash is added so endpoint
/// paths are joined under any path prefix instead of replacing it.
pub fn parse_base_url(raw: &str) -> Result<Url, WordsweepError> {
    let invalid = |reason: String| WordsweepError::InvalidServerUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    }

    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// reqwest-backed client
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: Url) -> Result<Self, WordsweepError> {
        let client = Client::builder()
            .build()
            .map_err(|e| WordsweepError::HttpClient(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

impl WordsBackend for HttpBackend {
    async fn find_matching_sentences(&self, query: &str) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(FIND_PATH)?;
        log::debug!("GET {} input={:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(&[("input", query)])
            .send()
            .await
            .map_err(network_error)?;

        let body: MatchingSentences = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(body.matching_sentences)
    }

    async fn replace_word(&self, old_word: &str, new_word: &str) -> Result<(), ApiError> {
        let url = self.endpoint(REPLACE_PATH)?;
        log::debug!("PUT {} {:?} -> {:?}", url, old_word, new_word);

        let response = self
            .client
            .put(url)
            .json(&ReplaceWordBody { old_word, new_word })
            .send()
            .await
            .map_err(network_error)?;

        check_status(response).await.map(|_| ())
    }

    async fn remove_similar_word(&self, word: &str) -> Result<(), ApiError> {
        let url = self.endpoint(REMOVE_PATH)?;
        log::debug!("DELETE {} word={:?}", url, word);

        let response = self
            .client
            .delete(url)
            .query(&[("word", word)])
            .send()
            .await
            .map_err(network_error)?;

        check_status(response).await.map(|_| ())
    }
}

fn network_error(e: reqwest::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

/// Turn a non-success status into an error carrying the body text
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(ApiError::Status {
        code: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
