// Meta Service - CRUD and search use cases

use super::{check_update_id, not_found_alert};
use crate::domain::{AlunoRef, Meta, MetaId, MetaPatch, NewMeta};
use crate::error::{AppError, Result};
use crate::port::{AlunoRepository, MetaRepository};
use crate::query::{MetaCriteria, Page, PageRequest};
use std::sync::Arc;
use tracing::debug;

pub const ENTITY_NAME: &str = "meta";

pub struct MetaService {
    repo: Arc<dyn MetaRepository>,
    alunos: Arc<dyn AlunoRepository>,
}

impl MetaService {
    pub fn new(repo: Arc<dyn MetaRepository>, alunos: Arc<dyn AlunoRepository>) -> Self {
        Self { repo, alunos }
    }

    async fn ensure_aluno_exists(&self, aluno: Option<&AlunoRef>) -> Result<()> {
        if let Some(aluno) = aluno {
            if !self.alunos.exists_by_id(aluno.id).await? {
                return Err(AppError::Validation(format!("aluno {} does not exist", aluno.id)));
            }
        }
        Ok(())
    }

    async fn reload(&self, id: MetaId) -> Result<Meta> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("meta {}", id)))
    }

    pub async fn create(&self, meta: NewMeta) -> Result<Meta> {
        debug!(?meta, "Request to save Meta");
        if meta.id.is_some() {
            return Err(AppError::bad_request(
                "A new meta cannot already have an ID",
                ENTITY_NAME,
                "idexists",
            ));
        }
        self.ensure_aluno_exists(meta.aluno.as_ref()).await?;
        self.repo.insert(&meta).await
    }

    pub async fn update(&self, id: MetaId, meta: NewMeta) -> Result<Meta> {
        debug!(id, ?meta, "Request to update Meta");
        check_update_id(id, meta.id, ENTITY_NAME)?;
        if !self.repo.exists_by_id(id).await? {
            return Err(not_found_alert(ENTITY_NAME));
        }
        self.ensure_aluno_exists(meta.aluno.as_ref()).await?;

        self.repo.update(&meta.into_meta(id)).await?;
        self.reload(id).await
    }

    pub async fn partial_update(&self, id: MetaId, patch: MetaPatch) -> Result<Meta> {
        debug!(id, ?patch, "Request to partially update Meta");
        check_update_id(id, patch.id, ENTITY_NAME)?;
        if !self.repo.exists_by_id(id).await? {
            return Err(not_found_alert(ENTITY_NAME));
        }
        self.ensure_aluno_exists(patch.aluno.as_ref()).await?;

        let mut meta = self.reload(id).await?;
        meta.apply_patch(patch);
        self.repo.update(&meta).await?;
        self.reload(id).await
    }

    pub async fn find_one(&self, id: MetaId) -> Result<Option<Meta>> {
        debug!(id, "Request to get Meta");
        self.repo.find_by_id(id).await
    }

    pub async fn delete(&self, id: MetaId) -> Result<()> {
        debug!(id, "Request to delete Meta");
        self.repo.delete_by_id(id).await?;
        Ok(())
    }

    pub async fn find_by_criteria(&self, criteria: &MetaCriteria, page: &PageRequest) -> Result<Page<Meta>> {
        debug!(%criteria, page = page.page, size = page.size, "Request to get Metas by criteria");
        self.repo.find_by_criteria(criteria, page).await
    }

    pub async fn count_by_criteria(&self, criteria: &MetaCriteria) -> Result<u64> {
        debug!(%criteria, "Request to count Metas by criteria");
        self.repo.count_by_criteria(criteria).await
    }
}
