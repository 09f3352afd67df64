use thiserror::Error;

/// Custom error types for wordsweep
#[derive(Debug, Error)]
pub enum WordsweepError {
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("Failed to read config file {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    #[error("Invalid config file {path}: {reason}")]
    ConfigParse { path: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),

    /// Reading terminal events failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
