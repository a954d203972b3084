// Aluno Repository Port (Interface)

use crate::domain::{Aluno, AlunoId, NewAluno};
use crate::error::Result;
use crate::query::{AlunoCriteria, Page, PageRequest};
use async_trait::async_trait;

/// Repository interface for Aluno persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlunoRepository: Send + Sync {
    /// Insert a new aluno, ignoring any id it carries
    async fn insert(&self, aluno: &NewAluno) -> Result<Aluno>;

    /// Overwrite every column of an existing row
    async fn update(&self, aluno: &Aluno) -> Result<()>;

    async fn find_by_id(&self, id: AlunoId) -> Result<Option<Aluno>>;

    async fn exists_by_id(&self, id: AlunoId) -> Result<bool>;

    /// Delete by id. Metas owned by the aluno are detached, not removed.
    /// Returns whether a row was deleted.
    async fn delete_by_id(&self, id: AlunoId) -> Result<bool>;

    async fn find_by_criteria(&self, criteria: &AlunoCriteria, page: &PageRequest) -> Result<Page<Aluno>>;

    async fn count_by_criteria(&self, criteria: &AlunoCriteria) -> Result<u64>;
}
