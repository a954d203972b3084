// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid area: {0} (expected one of HUMANAS, NATUREZA, LINGUAGENS, MATEMATICA)")]
    InvalidArea(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Unsupported filter operator: {0}")]
    UnsupportedOperator(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
