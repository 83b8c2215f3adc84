//! The dedicated JSON config file (`import-sorter.json` by default).
//!
//! Unlike the other sources, problems here are fatal: the file was either
//! requested explicitly on the command line or found under a name the
//! configuration asked for, so a malformed file must surface instead of
//! silently degrading.

use std::fmt;
use std::fs;
use std::io;

use serde_json::Value;

use super::merge::merge_config;
use super::path::find_file_from_path_and_parents;
use super::types::Configuration;

/// File name searched for when the base config does not override it.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "import-sorter.json";

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading the file
    Io { path: String, source: io::Error },
    /// JSON parsing or shape error
    Parse {
        path: String,
        source: serde_json::Error,
    },
    /// The file parsed but does not hold a JSON object
    NotAnObject { path: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config file \"{path}\": {source}")
            }
            ConfigError::Parse { path, source } => {
                write!(f, "bad config in \"{path}\": {source}")
            }
            ConfigError::NotAnObject { path } => {
                write!(f, "bad config in \"{path}\": expected a JSON object")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::NotAnObject { .. } => None,
        }
    }
}

/// Load config from a JSON file, e.g. `path/to/import-sorter.json`.
///
/// Fails if the file is unreadable or its content is not a valid JSON
/// object. An empty `path` yields an empty configuration.
pub fn load_config_from_json_file(path: &str) -> Result<Configuration, ConfigError> {
    if path.is_empty() {
        return Ok(Configuration::default());
    }
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_string(),
        source: e,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_string(),
        source: e,
    })?;
    if !value.is_object() {
        return Err(ConfigError::NotAnObject {
            path: path.to_string(),
        });
    }
    serde_json::from_value(value).map_err(|e| ConfigError::Parse {
        path: path.to_string(),
        source: e,
    })
}

/// Merge every `file_name` found from `path` upward.
///
/// Files merge nearest-first: each farther file joins as the
/// lower-precedence operand. The walk stops at the first layer where the
/// merged result sets `root: true`; files beyond it are not read at all.
pub fn file_config(file_name: &str, path: &str) -> Result<Configuration, ConfigError> {
    let files = find_file_from_path_and_parents(file_name, Some(path));
    fold_til_root(files.iter().map(|file| load_config_from_json_file(file)))
}

/// Fold layered per-directory configs, nearest layer first, honoring the
/// root flag. Shared by the dedicated-file and manifest loaders.
pub(crate) fn fold_til_root<E>(
    layers: impl IntoIterator<Item = Result<Configuration, E>>,
) -> Result<Configuration, E> {
    let mut config = Configuration::default();
    for layer in layers {
        config = merge_config([layer?, config]);
        if config.root == Some(true) {
            break;
        }
    }
    Ok(config)
}
