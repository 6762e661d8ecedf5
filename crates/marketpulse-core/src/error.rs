use thiserror::Error;

use crate::http_client::HttpError;

/// Validation errors for configuration values and decoded payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("forex pair must look like EUR/USD or EURUSD: '{value}'")]
    InvalidForexPair { value: String },

    #[error("refresh interval {value}s is outside [{min}, {max}]")]
    RefreshIntervalOutOfRange { value: u64, min: u64, max: u64 },

    #[error("api base must be an http(s) URL: '{value}'")]
    InvalidApiBase { value: String },
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("invalid theme '{value}', expected dark or light")]
    InvalidTheme { value: String },
    #[error("invalid series kind '{value}'")]
    InvalidSeriesKind { value: String },

    #[error("timestamp must be ISO-8601: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("series '{field}' must contain at least one point")]
    EmptySeries { field: &'static str },
}

/// Failure while fetching one series from the backend.
///
/// Inside a refresh cycle these are recovered by mock substitution and only
/// surface as the fallback reason. The backend probes return them directly.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("backend returned status {status}")]
    Status { status: u16 },

    #[error("response body is not valid JSON for this series: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response payload rejected: {0}")]
    Invalid(#[from] ValidationError),
}

impl FetchError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "fetch.transport",
            Self::Status { .. } => "fetch.status",
            Self::Decode(_) => "fetch.decode",
            Self::Invalid(_) => "fetch.invalid",
        }
    }
}

/// Errors raised while loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors from a [`RefreshHandle`](crate::RefreshHandle) whose loop is gone.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("refresh loop has stopped")]
    Stopped,

    #[error("refresh loop task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
