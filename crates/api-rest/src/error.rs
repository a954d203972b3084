//! HTTP error type and problem-style JSON bodies.
//!
//! Application errors map to status codes here. Bad-request alerts also
//! attach an [`ErrorAlert`] extension that the router turns into the
//! `X-<app>-error` / `X-<app>-params` headers.

use alunometa_core::domain::DomainError;
use alunometa_core::error::AppError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

#[derive(Debug, Error)]
pub enum HttpError {
    /// Rejected request tagged with entity and error key
    #[error("Bad request: {message}")]
    BadRequestAlert {
        message: String,
        entity_name: &'static str,
        error_key: &'static str,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Marker left on error responses for the alert-header middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorAlert {
    pub entity_name: &'static str,
    pub error_key: &'static str,
}

/// Problem-details body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Problem {
    #[serde(rename = "type")]
    problem_type: &'static str,
    title: String,
    status: u16,
    detail: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_key: Option<&'static str>,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequestAlert { .. } | HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Conflict(_) => StatusCode::CONFLICT,
            HttpError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let (detail, alert) = match self {
            HttpError::BadRequestAlert {
                message,
                entity_name,
                error_key,
            } => (
                message,
                Some(ErrorAlert {
                    entity_name,
                    error_key,
                }),
            ),
            HttpError::BadRequest(msg)
            | HttpError::NotFound(msg)
            | HttpError::Conflict(msg)
            | HttpError::UnsupportedMediaType(msg)
            | HttpError::Internal(msg) => (msg, None),
        };

        let title = status.canonical_reason().unwrap_or("Error").to_string();
        let body = Problem {
            problem_type: "about:blank",
            title: match alert {
                Some(_) => detail.clone(),
                None => title,
            },
            status: status.as_u16(),
            message: match alert {
                Some(alert) => format!("error.{}", alert.error_key),
                None => format!("error.http.{}", status.as_u16()),
            },
            detail,
            entity_name: alert.map(|a| a.entity_name),
            error_key: alert.map(|a| a.error_key),
        };

        let mut response = (status, axum::Json(body)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        if let Some(alert) = alert {
            response.extensions_mut().insert(alert);
        }
        response
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequestAlert {
                message,
                entity_name,
                error_key,
            } => HttpError::BadRequestAlert {
                message,
                entity_name,
                error_key,
            },
            AppError::Validation(msg) => HttpError::BadRequest(msg),
            AppError::Domain(e) => HttpError::BadRequest(e.to_string()),
            AppError::NotFound(msg) => HttpError::NotFound(msg),
            AppError::Conflict(msg) => HttpError::Conflict(msg),
            AppError::Database(msg) => HttpError::Internal(format!("Database: {}", msg)),
            AppError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        HttpError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                HttpError::UnsupportedMediaType(rejection.body_text())
            }
            _ => HttpError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}
