// Meta Repository Port (Interface)

use crate::domain::{Meta, MetaId, NewMeta};
use crate::error::Result;
use crate::query::{MetaCriteria, Page, PageRequest};
use async_trait::async_trait;

/// Repository interface for Meta persistence.
///
/// Loaded metas always carry their aluno reference with `nome` filled in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetaRepository: Send + Sync {
    /// Insert a new meta, ignoring any id it carries
    async fn insert(&self, meta: &NewMeta) -> Result<Meta>;

    async fn update(&self, meta: &Meta) -> Result<()>;

    async fn find_by_id(&self, id: MetaId) -> Result<Option<Meta>>;

    async fn exists_by_id(&self, id: MetaId) -> Result<bool>;

    async fn delete_by_id(&self, id: MetaId) -> Result<bool>;

    async fn find_by_criteria(&self, criteria: &MetaCriteria, page: &PageRequest) -> Result<Page<Meta>>;

    async fn count_by_criteria(&self, criteria: &MetaCriteria) -> Result<u64>;
}
