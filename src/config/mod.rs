//! Configuration loading
//!
//! Reads `~/.config/wordsweep/config.toml`. A missing default file is not an
//! error; a broken one is reported as a warning and defaults are used.
//! A file named explicitly on the command line must exist and parse.

mod types;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use types::{Config, DEFAULT_BASE_URL, ResultsConfig, ServerConfig};

use crate::error::WordsweepError;

const CONFIG_DIR: &str = "wordsweep";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "wordsweep.log";

/// Loaded configuration plus a warning to surface in the UI
#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

pub fn log_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(LOG_FILE))
}

/// Load the default config file, falling back to defaults
pub fn load_config() -> ConfigResult {
    let Some(path) = config_path() else {
        return ConfigResult::default();
    };

    load_config_from_path(&path)
}

pub fn load_config_from_path(path: &Path) -> ConfigResult {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return ConfigResult::default(),
        Err(e) => {
            return with_defaults(WordsweepError::ConfigRead {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
        }
    };

    match parse_config(&contents, path) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => with_defaults(e),
    }
}

fn with_defaults(error: WordsweepError) -> ConfigResult {
    log::warn!("{}", error);
    ConfigResult {
        config: Config::default(),
        warning: Some(format!("{} (using defaults)", error)),
    }
}

/// Load a config file the user asked for by name
pub fn load_explicit_config(path: &Path) -> Result<Config, WordsweepError> {
    let contents = fs::read_to_string(path).map_err(|e| WordsweepError::ConfigRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse_config(&contents, path)
}

pub fn parse_config(contents: &str, path: &Path) -> Result<Config, WordsweepError> {
    toml::from_str(contents).map_err(|e| WordsweepError::ConfigParse {
        path: path.display().to_string(),
        reason: e.message().to_string(),
    })
}
