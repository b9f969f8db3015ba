//! Error types for instance config resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while resolving the instance config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither an existing config file nor inline content was supplied.
    #[error("no config file or inline config content provided")]
    MissingSource,
    /// The config file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not a valid YAML config document.
    #[error("failed to decode config file {}: {source}", path.display())]
    FileDecode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    /// The inline content is not a valid JSON config document.
    #[error("failed to decode inline config content: {0}")]
    ContentDecode(#[source] DecodeError),
    /// The command line could not be parsed.
    #[error("invalid arguments: {0}")]
    Arguments(#[from] clap::Error),
}

/// Reasons a single config document failed to decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// YAML syntax error.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON syntax error.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level document is not a mapping.
    #[error("expected {expected} at the top level, found {found}")]
    NotAMapping {
        expected: &'static str,
        found: &'static str,
    },
    /// Field values do not fit the record (wrong type, out of range).
    #[error("document does not fit the config record: {0}")]
    Schema(#[source] serde_json::Error),
}
