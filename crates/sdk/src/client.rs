//! Alunometa Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    Aluno, AlunoId, AlunoPatch, ListQuery, Listing, Meta, MetaId, MetaPatch, NewAluno, NewMeta,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const TOTAL_COUNT_HEADER: &str = "x-total-count";
const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

const ALUNOS: &str = "alunos";
const METAS: &str = "metas";

/// Alunometa REST API Client
///
/// # Example
///
/// ```no_run
/// use alunometa_sdk::{AlunometaClient, ListQuery};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AlunometaClient::connect("http://127.0.0.1:8080")?;
/// let page = client.list_alunos(&ListQuery::new().filter("nome.contains", "ana")).await?;
/// println!("{} of {}", page.items.len(), page.total_count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AlunometaClient {
    http: Client,
    base_url: Url,
}

impl AlunometaClient {
    /// Create a client for the server at `url` (e.g. `http://127.0.0.1:8080`)
    ///
    /// A path in `url` is kept as the prefix of every request.
    pub fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        let mut base_url = Url::parse(url).map_err(|e| SdkError::InvalidUrl(format!("{}: {}", url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SdkError::InvalidUrl(format!("{}: not a base URL", url)));
        }
        // join() replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `path` is relative to the base URL and must not start with '/'
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SdkError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SdkError::from_response(status.as_u16(), &body))
    }

    async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let bytes = Self::send(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// `true` when `/health` answers
    pub async fn health(&self) -> Result<bool> {
        let response = self.http.get(self.url("health")?).send().await?;
        Ok(response.status().is_success())
    }

    async fn list<T: DeserializeOwned>(&self, resource: &str, query: &ListQuery) -> Result<Listing<T>> {
        let request = self
            .http
            .get(self.url(&format!("api/{}", resource))?)
            .query(&query.to_pairs());
        let response = Self::send(request).await?;

        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let bytes = response.bytes().await?;
        let items: Vec<T> = serde_json::from_slice(&bytes)?;

        Ok(Listing { items, total_count })
    }

    async fn count(&self, resource: &str, filters: &[(String, String)]) -> Result<u64> {
        let request = self
            .http
            .get(self.url(&format!("api/{}/count", resource))?)
            .query(filters);
        Self::json(request).await
    }

    async fn get<T: DeserializeOwned>(&self, resource: &str, id: i64) -> Result<T> {
        Self::json(self.http.get(self.url(&format!("api/{}/{}", resource, id))?)).await
    }

    async fn create<B: Serialize, T: DeserializeOwned>(&self, resource: &str, body: &B) -> Result<T> {
        let request = self
            .http
            .post(self.url(&format!("api/{}", resource))?)
            .json(body);
        Self::json(request).await
    }

    async fn update<B: Serialize, T: DeserializeOwned>(&self, resource: &str, id: i64, body: &B) -> Result<T> {
        let request = self
            .http
            .put(self.url(&format!("api/{}/{}", resource, id))?)
            .json(body);
        Self::json(request).await
    }

    async fn patch<B: Serialize, T: DeserializeOwned>(&self, resource: &str, id: i64, body: &B) -> Result<T> {
        let request = self
            .http
            .patch(self.url(&format!("api/{}/{}", resource, id))?)
            .header(CONTENT_TYPE, MERGE_PATCH_JSON)
            .body(serde_json::to_vec(body)?);
        Self::json(request).await
    }

    async fn delete(&self, resource: &str, id: i64) -> Result<()> {
        Self::send(self.http.delete(self.url(&format!("api/{}/{}", resource, id))?)).await?;
        Ok(())
    }

    // Alunos

    pub async fn list_alunos(&self, query: &ListQuery) -> Result<Listing<Aluno>> {
        self.list(ALUNOS, query).await
    }

    pub async fn count_alunos(&self, filters: &[(String, String)]) -> Result<u64> {
        self.count(ALUNOS, filters).await
    }

    pub async fn get_aluno(&self, id: AlunoId) -> Result<Aluno> {
        self.get(ALUNOS, id).await
    }

    pub async fn create_aluno(&self, aluno: &NewAluno) -> Result<Aluno> {
        self.create(ALUNOS, aluno).await
    }

    /// Full update; `aluno.id` must equal `id`
    pub async fn update_aluno(&self, id: AlunoId, aluno: &NewAluno) -> Result<Aluno> {
        self.update(ALUNOS, id, aluno).await
    }

    pub async fn patch_aluno(&self, id: AlunoId, patch: &AlunoPatch) -> Result<Aluno> {
        self.patch(ALUNOS, id, patch).await
    }

    pub async fn delete_aluno(&self, id: AlunoId) -> Result<()> {
        self.delete(ALUNOS, id).await
    }

    // Metas

    pub async fn list_metas(&self, query: &ListQuery) -> Result<Listing<Meta>> {
        self.list(METAS, query).await
    }

    pub async fn count_metas(&self, filters: &[(String, String)]) -> Result<u64> {
        self.count(METAS, filters).await
    }

    pub async fn get_meta(&self, id: MetaId) -> Result<Meta> {
        self.get(METAS, id).await
    }

    pub async fn create_meta(&self, meta: &NewMeta) -> Result<Meta> {
        self.create(METAS, meta).await
    }

    pub async fn update_meta(&self, id: MetaId, meta: &NewMeta) -> Result<Meta> {
        self.update(METAS, id, meta).await
    }

    pub async fn patch_meta(&self, id: MetaId, patch: &MetaPatch) -> Result<Meta> {
        self.patch(METAS, id, patch).await
    }

    pub async fn delete_meta(&self, id: MetaId) -> Result<()> {
        self.delete(METAS, id).await
    }
}
