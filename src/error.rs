//! Error handling for handle-scout

use thiserror::Error;

/// Main error type for handle-scout
#[derive(Error, Debug, Clone)]
pub enum HandleScoutError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Profile source error ({platform}): {message}")]
    Source {
        platform: crate::types::Platform,
        message: String,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Store error: {message}")]
    Store {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl HandleScoutError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a profile source error
    pub fn source(platform: crate::types::Platform, message: impl Into<String>) -> Self {
        Self::Source {
            platform,
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Store {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Message safe to show to a bot user.
    ///
    /// Transport details stay in the log; the user only ever sees a short,
    /// friendly description.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("Configuration problem: {}. Check your environment settings.", message)
            }
            Self::Source { platform, .. } => {
                format!("Could not fetch data from {}. Please try again later.", platform)
            }
            Self::Network { .. } => {
                "A network problem occurred. Please try again later.".to_string()
            }
            Self::Timeout { .. } => {
                "The request took too long and was cancelled. Please try again.".to_string()
            }
            Self::Parse { .. } => {
                "The service returned an unexpected response. Please try again later.".to_string()
            }
            Self::Store { .. } => {
                "Your data could not be saved. Please try again.".to_string()
            }
            Self::Internal { .. } => {
                "Something went wrong on our side. Please try again.".to_string()
            }
        }
    }
}

/// Convert from common error types
impl From<reqwest::Error> for HandleScoutError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::timeout("HTTP request", 30)
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else if err.is_request() {
            Self::network("Request failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for HandleScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for HandleScoutError {
    fn from(err: std::io::Error) -> Self {
        Self::store(err.to_string(), None)
    }
}

impl From<tokio::time::error::Elapsed> for HandleScoutError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::timeout("Operation", 30)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HandleScoutError>;
