//! `/api/metas` handlers. Responses embed the owning aluno as `{id, nome}`.

use crate::error::HttpError;
use crate::extract::{ApiJson, QueryPairs};
use crate::headers::pagination;
use crate::state::AppState;
use alunometa_core::application::meta_service::ENTITY_NAME;
use alunometa_core::domain::{Meta, MetaId, MetaPatch, NewMeta};
use alunometa_core::query::{Criteria, MetaCriteria, PageRequest};
use axum::extract::{OriginalUri, Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewMeta>,
) -> Result<impl IntoResponse, HttpError> {
    let meta = state.metas.create(body).await?;
    let id = meta.id.to_string();
    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/metas/{}", id))],
        state.alerts.entity_created(ENTITY_NAME, &id),
        Json(meta),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<MetaId>,
    ApiJson(body): ApiJson<NewMeta>,
) -> Result<impl IntoResponse, HttpError> {
    let meta = state.metas.update(id, body).await?;
    Ok((
        state.alerts.entity_updated(ENTITY_NAME, &id.to_string()),
        Json(meta),
    ))
}

/// Merge-patch: absent and null fields keep their stored value
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<MetaId>,
    ApiJson(patch): ApiJson<MetaPatch>,
) -> Result<impl IntoResponse, HttpError> {
    let meta = state.metas.partial_update(id, patch).await?;
    Ok((
        state.alerts.entity_updated(ENTITY_NAME, &id.to_string()),
        Json(meta),
    ))
}

/// Filtered, paged listing with `X-Total-Count` and `Link` headers
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    QueryPairs(query): QueryPairs,
) -> Result<impl IntoResponse, HttpError> {
    let criteria = MetaCriteria::from_query_pairs(&query)?;
    let request = PageRequest::from_query_pairs(&query);
    let page = state.metas.find_by_criteria(&criteria, &request).await?;

    let headers = pagination(uri.path(), &query, &page);
    Ok((headers, Json(page.content)))
}

pub async fn count(
    State(state): State<AppState>,
    QueryPairs(query): QueryPairs,
) -> Result<Json<u64>, HttpError> {
    let criteria = MetaCriteria::from_query_pairs(&query)?;
    Ok(Json(state.metas.count_by_criteria(&criteria).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<MetaId>,
) -> Result<Json<Meta>, HttpError> {
    state
        .metas
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound(format!("meta {}", id)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<MetaId>,
) -> Result<impl IntoResponse, HttpError> {
    state.metas.delete(id).await?;
    Ok((
        StatusCode::NO_CONTENT,
        state.alerts.entity_deleted(ENTITY_NAME, &id.to_string()),
    ))
}
