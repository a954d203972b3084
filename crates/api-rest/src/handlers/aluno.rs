//! `/api/alunos` handlers.

use crate::error::HttpError;
use crate::extract::{ApiJson, QueryPairs};
use crate::headers::pagination;
use crate::state::AppState;
use alunometa_core::application::aluno_service::ENTITY_NAME;
use alunometa_core::domain::{Aluno, AlunoId, AlunoPatch, NewAluno};
use alunometa_core::query::{AlunoCriteria, Criteria, PageRequest};
use axum::extract::{OriginalUri, Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewAluno>,
) -> Result<impl IntoResponse, HttpError> {
    let aluno = state.alunos.create(body).await?;
    let id = aluno.id.to_string();
    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/alunos/{}", id))],
        state.alerts.entity_created(ENTITY_NAME, &id),
        Json(aluno),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<AlunoId>,
    ApiJson(body): ApiJson<NewAluno>,
) -> Result<impl IntoResponse, HttpError> {
    let aluno = state.alunos.update(id, body).await?;
    Ok((
        state.alerts.entity_updated(ENTITY_NAME, &id.to_string()),
        Json(aluno),
    ))
}

/// Merge-patch: absent and null fields keep their stored value
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<AlunoId>,
    ApiJson(patch): ApiJson<AlunoPatch>,
) -> Result<impl IntoResponse, HttpError> {
    let aluno = state.alunos.partial_update(id, patch).await?;
    Ok((
        state.alerts.entity_updated(ENTITY_NAME, &id.to_string()),
        Json(aluno),
    ))
}

/// Filtered, paged listing with `X-Total-Count` and `Link` headers
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    QueryPairs(query): QueryPairs,
) -> Result<impl IntoResponse, HttpError> {
    let criteria = AlunoCriteria::from_query_pairs(&query)?;
    let request = PageRequest::from_query_pairs(&query);
    let page = state.alunos.find_by_criteria(&criteria, &request).await?;

    let headers = pagination(uri.path(), &query, &page);
    Ok((headers, Json(page.content)))
}

pub async fn count(
    State(state): State<AppState>,
    QueryPairs(query): QueryPairs,
) -> Result<Json<u64>, HttpError> {
    let criteria = AlunoCriteria::from_query_pairs(&query)?;
    Ok(Json(state.alunos.count_by_criteria(&criteria).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<AlunoId>,
) -> Result<Json<Aluno>, HttpError> {
    state
        .alunos
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound(format!("aluno {}", id)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<AlunoId>,
) -> Result<impl IntoResponse, HttpError> {
    state.alunos.delete(id).await?;
    Ok((
        StatusCode::NO_CONTENT,
        state.alerts.entity_deleted(ENTITY_NAME, &id.to_string()),
    ))
}
