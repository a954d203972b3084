// Aluno Service - CRUD and search use cases

use super::{check_update_id, not_found_alert};
use crate::domain::{Aluno, AlunoId, AlunoPatch, NewAluno};
use crate::error::{AppError, Result};
use crate::port::AlunoRepository;
use crate::query::{AlunoCriteria, Page, PageRequest};
use std::sync::Arc;
use tracing::debug;

pub const ENTITY_NAME: &str = "aluno";

pub struct AlunoService {
    repo: Arc<dyn AlunoRepository>,
}

impl AlunoService {
    pub fn new(repo: Arc<dyn AlunoRepository>) -> Self {
        Self { repo }
    }

    /// Persist a new aluno. The request must not carry an id.
    pub async fn create(&self, aluno: NewAluno) -> Result<Aluno> {
        debug!(?aluno, "Request to save Aluno");
        if aluno.id.is_some() {
            return Err(AppError::bad_request(
                "A new aluno cannot already have an ID",
                ENTITY_NAME,
                "idexists",
            ));
        }
        self.repo.insert(&aluno).await
    }

    /// Replace every field of an existing aluno
    pub async fn update(&self, id: AlunoId, aluno: NewAluno) -> Result<Aluno> {
        debug!(id, ?aluno, "Request to update Aluno");
        check_update_id(id, aluno.id, ENTITY_NAME)?;
        if !self.repo.exists_by_id(id).await? {
            return Err(not_found_alert(ENTITY_NAME));
        }

        let aluno = aluno.into_aluno(id);
        self.repo.update(&aluno).await?;
        Ok(aluno)
    }

    /// Apply the non-null fields of `patch`
    pub async fn partial_update(&self, id: AlunoId, patch: AlunoPatch) -> Result<Aluno> {
        debug!(id, ?patch, "Request to partially update Aluno");
        check_update_id(id, patch.id, ENTITY_NAME)?;
        if !self.repo.exists_by_id(id).await? {
            return Err(not_found_alert(ENTITY_NAME));
        }

        let mut aluno = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("aluno {}", id)))?;
        aluno.apply_patch(patch);
        self.repo.update(&aluno).await?;
        Ok(aluno)
    }

    pub async fn find_one(&self, id: AlunoId) -> Result<Option<Aluno>> {
        debug!(id, "Request to get Aluno");
        self.repo.find_by_id(id).await
    }

    /// Delete an aluno. Unknown ids are not an error.
    pub async fn delete(&self, id: AlunoId) -> Result<()> {
        debug!(id, "Request to delete Aluno");
        self.repo.delete_by_id(id).await?;
        Ok(())
    }

    pub async fn find_by_criteria(&self, criteria: &AlunoCriteria, page: &PageRequest) -> Result<Page<Aluno>> {
        debug!(%criteria, page = page.page, size = page.size, "Request to get Alunos by criteria");
        self.repo.find_by_criteria(criteria, page).await
    }

    pub async fn count_by_criteria(&self, criteria: &AlunoCriteria) -> Result<u64> {
        debug!(%criteria, "Request to count Alunos by criteria");
        self.repo.count_by_criteria(criteria).await
    }
}
