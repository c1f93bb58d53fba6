//! Error types

use crate::connection::ServerListError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Server list could not be parsed
    #[error("invalid server list: {0}")]
    Servers(#[from] ServerListError),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// No server could be reached
    #[error("connection failed: {0}")]
    Connection(String),

    /// Credentials were rejected by the server
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Error reported by the server for a query or insert
    #[error("{0}")]
    Query(String),

    /// Input line could not be turned into a request
    #[error("invalid request: {0}")]
    Request(String),

    /// HTTP transport error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal input failed
    #[error("input error: {0}")]
    Input(String),

    /// The user pressed CTRL+C outside of a running request
    #[error("interrupted")]
    Interrupted,

    /// Operation attempted in the wrong state
    #[error("invalid state: expected {expected}, got {actual}")]
    InvalidState {
        /// What the caller expected
        expected: String,
        /// What was found instead
        actual: String,
    },
}

impl Error {
    /// Short label for metrics
    pub fn category(&self) -> &'static str {
        match self {
            Error::Servers(_) | Error::Config(_) => "config",
            Error::Connection(_) | Error::Http(_) => "connection",
            Error::Auth(_) => "auth",
            Error::Query(_) => "query",
            Error::Request(_) => "request",
            Error::Json(_) => "json",
            Error::Io(_) | Error::Input(_) => "io",
            Error::Interrupted => "interrupted",
            Error::InvalidState { .. } => "state",
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_displays_server_message_only() {
        let err = Error::Query("Cannot find series: 'cpu'".into());
        assert_eq!(err.to_string(), "Cannot find series: 'cpu'");
        assert_eq!(err.category(), "query");
    }

    #[test]
    fn test_invalid_state_display() {
        let err = Error::InvalidState {
            expected: "open client".into(),
            actual: "closed".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid state: expected open client, got closed"
        );
    }

    #[test]
    fn test_server_list_error_converts() {
        let err: Error = ServerListError::Empty.into();
        assert_eq!(err.category(), "config");
        assert!(err.to_string().starts_with("invalid server list"));
    }
}
