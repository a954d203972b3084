//! Shared harness: a router over a fresh in-memory database per test.

#![allow(dead_code)]

use std::sync::Arc;

use alunometa_api_rest::{router, Alerts, ApiContext};
use alunometa_core::application::{AlunoService, MetaService};
use alunometa_infra_sqlite::{memory_pool, SqliteAlunoRepository, SqliteMetaRepository};
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const APP_NAME: &str = "alunometaApp";

pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn build_router() -> Router {
    let pool = memory_pool().await.unwrap();
    let alunos = Arc::new(SqliteAlunoRepository::new(pool.clone()));
    let metas = Arc::new(SqliteMetaRepository::new(pool));

    router(Arc::new(ApiContext {
        alunos: AlunoService::new(alunos.clone()),
        metas: MetaService::new(metas, alunos),
        alerts: Alerts::new(APP_NAME).unwrap(),
    }))
}

impl TestApp {
    pub async fn new() -> Self {
        Self {
            router: build_router().await,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, headers, body }
    }

    pub async fn json(&self, method: Method, uri: &str, body: &Value) -> TestResponse {
        self.json_as(method, uri, "application/json", body).await
    }

    pub async fn json_as(&self, method: Method, uri: &str, content_type: &str, body: &Value) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Request::delete(uri).body(Body::empty()).unwrap()).await
    }

    /// POST and return the created entity
    pub async fn create(&self, uri: &str, body: &Value) -> Value {
        let response = self.json(Method::POST, uri, body).await;
        assert_eq!(response.status, StatusCode::CREATED, "create failed: {}", response.body);
        response.body
    }

    /// Ids returned by a listing
    pub async fn ids(&self, uri: &str) -> Vec<i64> {
        let response = self.get(uri).await;
        assert_eq!(response.status, StatusCode::OK, "{} -> {}", uri, response.body);
        response
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_i64().unwrap())
            .collect()
    }

    pub async fn count(&self, uri: &str) -> u64 {
        let response = self.get(uri).await;
        assert_eq!(response.status, StatusCode::OK, "{} -> {}", uri, response.body);
        response.body.as_u64().unwrap()
    }
}
