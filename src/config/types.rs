// Configuration type definitions

use serde::Deserialize;

/// Address of the corpus backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_shuffle() -> bool {
    true
}

/// Backend connection section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: default_base_url(),
        }
    }
}

/// Result display section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ResultsConfig {
    /// Randomize the order of matching sentences before display
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        ResultsConfig {
            shuffle: default_shuffle(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub results: ResultsConfig,
}
