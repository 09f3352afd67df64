//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;

use crate::api::parse_base_url;
use crate::config::Config;
use crate::error::WordsweepError;

/// Command-line arguments accepted by the `wordsweep` binary
#[derive(Parser, Debug)]
#[command(
    name = "wordsweep",
    version,
    about = "Find, replace and delete words across a sentence corpus"
)]
pub struct Args {
    #[arg(
        short,
        long,
        value_name = "URL",
        env = "WORDSWEEP_SERVER",
        help = "Base URL of the corpus backend (default: from config, else http://localhost:5000)"
    )]
    pub server: Option<String>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Config file to use instead of ~/.config/wordsweep/config.toml"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "QUERY",
        help = "Search for this word on startup"
    )]
    pub query: Option<String>,

    #[arg(long, help = "Show results in backend order instead of shuffling them")]
    pub no_shuffle: bool,
}

/// Settings after merging the command line over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: Url,
    pub shuffle: bool,
}

impl Args {
    pub fn resolve(&self, config: &Config) -> Result<Settings, WordsweepError> {
        let raw_url = self
            .server
            .as_deref()
            .unwrap_or(config.server.base_url.as_str());

        Ok(Settings {
            base_url: parse_base_url(raw_url)?,
            shuffle: config.results.shuffle && !self.no_shuffle,
        })
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
