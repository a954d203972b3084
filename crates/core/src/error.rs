// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Request rejected for a reason the client can act on, tagged with the
    /// entity and a stable error key (`idexists`, `idnull`, ...)
    #[error("{message}")]
    BadRequestAlert {
        message: String,
        entity_name: &'static str,
        error_key: &'static str,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(
        message: impl Into<String>,
        entity_name: &'static str,
        error_key: &'static str,
    ) -> Self {
        AppError::BadRequestAlert {
            message: message.into(),
            entity_name,
            error_key,
        }
    }

    /// Error key of a bad-request alert, if this is one
    pub fn error_key(&self) -> Option<&'static str> {
        match self {
            AppError::BadRequestAlert { error_key, .. } => Some(error_key),
            _ => None,
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by converting to AppError::Database(String)
