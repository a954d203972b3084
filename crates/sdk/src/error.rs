//! SDK Error Types

use serde::Deserialize;
use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-2xx response from the server
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        error_key: Option<String>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl SdkError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn error_key(&self) -> Option<&str> {
        match self {
            SdkError::Api { error_key, .. } => error_key.as_deref(),
            _ => None,
        }
    }

    /// Build an [`SdkError::Api`] from a status and response body. Problem
    /// JSON bodies contribute their detail and error key; anything else is
    /// kept as plain text.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Problem {
            title: Option<String>,
            detail: Option<String>,
            error_key: Option<String>,
        }

        match serde_json::from_str::<Problem>(body) {
            Ok(problem) => SdkError::Api {
                status,
                message: problem
                    .detail
                    .or(problem.title)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
                error_key: problem.error_key,
            },
            Err(_) => SdkError::Api {
                status,
                message: if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.trim().to_string()
                },
                error_key: None,
            },
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::Connection(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::Api {
                status: status.as_u16(),
                message: e.to_string(),
                error_key: None,
            }
        } else {
            SdkError::Transport(e.to_string())
        }
    }
}
