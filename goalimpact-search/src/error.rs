//! Structured error types for goalimpact-search.
//!
//! The widget collapses every search failure into a closed dropdown, so these
//! errors mostly surface through logs and the one-shot CLI commands.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for search operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// Request never produced a response (connect, TLS, timeout)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Endpoint answered with a non-success status
    #[error("search endpoint returned {status} for {url}")]
    Status { url: String, status: u16 },

    /// Response body was not the expected `{ results: [...] }` shape
    #[error("failed to decode search response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// A configured base URL did not parse
    #[error("invalid URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file exists but is not valid TOML for our schema
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Create a status error
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(value: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            value: value.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Short label used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::Client { .. } => "client",
            Self::InvalidUrl { .. } => "invalid_url",
            Self::Io { .. } => "io",
            Self::ConfigParse { .. } => "config_parse",
            Self::Config { .. } => "config",
        }
    }
}
