//! Extractors whose rejections become [`HttpError`]s.

use crate::error::HttpError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body. Accepts `application/json` and `+json` types such as
/// `application/merge-patch+json`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(HttpError))]
pub struct ApiJson<T>(pub T);

/// Raw query parameters in request order, repeated keys included
#[derive(Debug, FromRequestParts, serde::Deserialize)]
#[serde(transparent)]
#[from_request(via(axum::extract::Query), rejection(HttpError))]
pub struct QueryPairs(pub Vec<(String, String)>);
