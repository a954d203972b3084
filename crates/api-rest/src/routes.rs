//! Route definitions and router construction.

use crate::error::ErrorAlert;
use crate::handlers::{self, aluno, meta};
use crate::headers::TOTAL_COUNT_HEADER;
use crate::state::AppState;
use axum::extract::State;
use axum::http::header::LINK;
use axum::http::HeaderName;
use axum::middleware;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Permissive CORS that lets browsers read the paging and alert headers
fn cors_layer(state: &AppState) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(TOTAL_COUNT_HEADER),
            LINK,
            state.alerts.alert_header().clone(),
            state.alerts.error_header().clone(),
            state.alerts.params_header().clone(),
        ])
}

/// Turn the [`ErrorAlert`] left by a failed handler into alert headers
async fn error_alert_headers(State(state): State<AppState>, mut response: Response) -> Response {
    if let Some(alert) = response.extensions_mut().remove::<ErrorAlert>() {
        let headers = state.alerts.failure(alert.entity_name, alert.error_key);
        response.headers_mut().extend(headers);
    }
    response
}

/// API routes without the `/api` prefix
fn api_routes() -> Router<AppState> {
    Router::new()
        // Alunos
        .route("/alunos", get(aluno::list).post(aluno::create))
        .route("/alunos/count", get(aluno::count))
        .route(
            "/alunos/{id}",
            get(aluno::get)
                .put(aluno::update)
                .patch(aluno::partial_update)
                .delete(aluno::delete),
        )
        // Metas
        .route("/metas", get(meta::list).post(meta::create))
        .route("/metas/count", get(meta::count))
        .route(
            "/metas/{id}",
            get(meta::get)
                .put(meta::update)
                .patch(meta::partial_update)
                .delete(meta::delete),
        )
}

/// Full application router
pub fn router(state: AppState) -> Router {
    let api = api_routes().layer(middleware::map_response_with_state(
        state.clone(),
        error_alert_headers,
    ));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::Alerts;
    use crate::state::ApiContext;
    use alunometa_core::application::{AlunoService, MetaService};
    use alunometa_infra_sqlite::{memory_pool, SqliteAlunoRepository, SqliteMetaRepository};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn app() -> Router {
        let pool = memory_pool().await.unwrap();
        let alunos = Arc::new(SqliteAlunoRepository::new(pool.clone()));
        let metas = Arc::new(SqliteMetaRepository::new(pool));
        let state = Arc::new(ApiContext {
            alunos: AlunoService::new(alunos.clone()),
            metas: MetaService::new(metas, alunos),
            alerts: Alerts::new("alunometaApp").unwrap(),
        });
        router(state)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_create_sets_location_and_alert() {
        let response = app()
            .await
            .oneshot(json_request(
                Method::POST,
                "/api/alunos",
                json!({"nome": "AAAAAAAAAA", "email": "AAAAAAAAAA", "dataNascimento": "1970-01-01"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get("location").unwrap(), "/api/alunos/1");
        assert_eq!(
            response.headers().get("x-alunometaapp-alert").unwrap(),
            "alunometaApp.aluno.created"
        );
        assert_eq!(body_json(response).await["id"], 1);
    }

    #[tokio::test]
    async fn test_error_alert_headers() {
        let response = app()
            .await
            .oneshot(json_request(
                Method::POST,
                "/api/metas",
                json!({"id": 1, "valor": 0, "area": "LINGUAGENS"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("x-alunometaapp-error").unwrap(),
            "error.idexists"
        );
        assert_eq!(response.headers().get("x-alunometaapp-params").unwrap(), "meta");
        assert_eq!(body_json(response).await["errorKey"], "idexists");
    }

    #[tokio::test]
    async fn test_put_without_id_is_not_allowed() {
        let response = app()
            .await
            .oneshot(json_request(Method::PUT, "/api/alunos", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_list_sets_paging_headers() {
        let response = app()
            .await
            .oneshot(Request::get("/api/metas?size=5").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("x-total-count").unwrap(), "0");
        let link = response.headers().get("link").unwrap().to_str().unwrap();
        assert!(link.contains("</api/metas?page=0&size=5>; rel=\"first\""));
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_unsupported() {
        let response = app()
            .await
            .oneshot(
                Request::post("/api/alunos")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
