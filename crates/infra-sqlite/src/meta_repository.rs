// SQLite MetaRepository Implementation

use crate::criteria_sql::{fold_case, push_page, Conditions};
use crate::error::map_sqlx_error;
use alunometa_core::domain::{AlunoRef, Area, Meta, MetaId, NewMeta};
use alunometa_core::error::{AppError, Result};
use alunometa_core::port::MetaRepository;
use alunometa_core::query::{MetaCriteria, Page, PageRequest};
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

// The owning aluno's name comes along with every loaded meta
const SELECT_META: &str = "SELECT m.id, m.valor, m.area, m.descricao, m.aluno_id, a.nome AS aluno_nome \
     FROM meta m LEFT JOIN aluno a ON a.id = m.aluno_id";

const SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "m.id"),
    ("valor", "m.valor"),
    ("area", "m.area"),
    ("descricao", "m.descricao"),
    ("aluno.id", "m.aluno_id"),
    ("alunoId", "m.aluno_id"),
];

pub struct SqliteMetaRepository {
    pool: SqlitePool,
}

impl SqliteMetaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn push_criteria(qb: &mut QueryBuilder<'_, Sqlite>, criteria: &MetaCriteria) {
    let mut conditions = Conditions::new(qb);
    if let Some(f) = &criteria.id {
        conditions.column("m.id", f.predicates());
    }
    if let Some(f) = &criteria.valor {
        conditions.column("m.valor", f.predicates());
    }
    if let Some(f) = &criteria.area {
        conditions.column("m.area", f.predicates());
    }
    if let Some(f) = &criteria.descricao {
        conditions.text("m.descricao", "m.descricao_folded", f.predicates());
    }
    if let Some(f) = &criteria.aluno_id {
        conditions.column("m.aluno_id", f.predicates());
    }
}

#[async_trait]
impl MetaRepository for SqliteMetaRepository {
    async fn insert(&self, meta: &NewMeta) -> Result<Meta> {
        let result = sqlx::query(
            "INSERT INTO meta (valor, area, descricao, aluno_id, descricao_folded) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(meta.valor)
        .bind(meta.area.as_str())
        .bind(&meta.descricao)
        .bind(meta.aluno.as_ref().map(|a| a.id))
        .bind(meta.descricao.as_deref().map(fold_case))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("meta {} missing after insert", id)))
    }

    async fn update(&self, meta: &Meta) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE meta
            SET valor = ?, area = ?, descricao = ?, aluno_id = ?, descricao_folded = ?
            WHERE id = ?
            "#,
        )
        .bind(meta.valor)
        .bind(meta.area.as_str())
        .bind(&meta.descricao)
        .bind(meta.aluno_id())
        .bind(meta.descricao.as_deref().map(fold_case))
        .bind(meta.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("meta {}", meta.id)));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: MetaId) -> Result<Option<Meta>> {
        let row = sqlx::query_as::<_, MetaRow>(&format!("{} WHERE m.id = ?", SELECT_META))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(MetaRow::into_meta).transpose()
    }

    async fn exists_by_id(&self, id: MetaId) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meta WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: MetaId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM meta WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_criteria(&self, criteria: &MetaCriteria, page: &PageRequest) -> Result<Page<Meta>> {
        let total = self.count_by_criteria(criteria).await?;

        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_META);
        push_criteria(&mut qb, criteria);
        push_page(&mut qb, page, SORT_COLUMNS, "m.id")?;

        let rows = qb
            .build_query_as::<MetaRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let content = rows
            .into_iter()
            .map(MetaRow::into_meta)
            .collect::<Result<Vec<_>>>()?;
        Ok(Page::new(content, total, page))
    }

    async fn count_by_criteria(&self, criteria: &MetaCriteria) -> Result<u64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM meta m");
        push_criteria(&mut qb, criteria);

        let count: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(count.max(0) as u64)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MetaRow {
    id: i64,
    valor: i32,
    area: String,
    descricao: Option<String>,
    aluno_id: Option<i64>,
    aluno_nome: Option<String>,
}

impl MetaRow {
    fn into_meta(self) -> Result<Meta> {
        let area: Area = self.area.parse()?;
        Ok(Meta {
            id: self.id,
            valor: self.valor,
            area,
            descricao: self.descricao,
            aluno: self.aluno_id.map(|id| AlunoRef {
                id,
                nome: self.aluno_nome,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{memory_pool, SqliteAlunoRepository};
    use alunometa_core::domain::{samples, NewAluno};
    use alunometa_core::port::AlunoRepository;
    use alunometa_core::query::{Criteria, Direction};

    struct Fixture {
        metas: SqliteMetaRepository,
        alunos: SqliteAlunoRepository,
    }

    async fn fixture() -> Fixture {
        let pool = memory_pool().await.unwrap();
        Fixture {
            metas: SqliteMetaRepository::new(pool.clone()),
            alunos: SqliteAlunoRepository::new(pool),
        }
    }

    fn criteria(pairs: &[(&str, &str)]) -> MetaCriteria {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MetaCriteria::from_query_pairs(&pairs).unwrap()
    }

    #[tokio::test]
    async fn test_insert_loads_aluno_name() {
        let f = fixture().await;
        let aluno = f
            .alunos
            .insert(&NewAluno::from(samples::aluno::SAMPLE_WITH_FULL_DATA.clone()))
            .await
            .unwrap();

        let meta = f
            .metas
            .insert(&NewMeta::from(samples::meta::SAMPLE_WITH_FULL_DATA.clone()).with_aluno(aluno.id))
            .await
            .unwrap();

        assert_eq!(meta.valor, 176);
        assert_eq!(meta.area, Area::Linguagens);
        assert_eq!(
            meta.aluno,
            Some(AlunoRef { id: aluno.id, nome: Some("oof near likewise".into()) })
        );
    }

    #[tokio::test]
    async fn test_deleting_aluno_detaches_metas() {
        let f = fixture().await;
        let aluno = f
            .alunos
            .insert(&samples::aluno::SAMPLE_WITH_NEW_DATA)
            .await
            .unwrap();
        let meta = f
            .metas
            .insert(&samples::meta::SAMPLE_WITH_NEW_DATA.clone().with_aluno(aluno.id))
            .await
            .unwrap();

        assert!(f.alunos.delete_by_id(aluno.id).await.unwrap());

        let reloaded = f.metas.find_by_id(meta.id).await.unwrap().unwrap();
        assert!(reloaded.aluno.is_none());
    }

    #[tokio::test]
    async fn test_unknown_aluno_violates_foreign_key() {
        let f = fixture().await;
        let result = f
            .metas
            .insert(&NewMeta::new(1, Area::Humanas).with_aluno(404))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_filters_and_sorting() {
        let f = fixture().await;
        let aluno = f
            .alunos
            .insert(&samples::aluno::SAMPLE_WITH_NEW_DATA)
            .await
            .unwrap();
        for sample in samples::meta::persisted() {
            let mut new = NewMeta::from(sample.clone());
            if sample.area == Area::Humanas {
                new = new.with_aluno(aluno.id);
            }
            f.metas.insert(&new).await.unwrap();
        }

        let c = criteria(&[("area.in", "HUMANAS,NATUREZA")]);
        assert_eq!(f.metas.count_by_criteria(&c).await.unwrap(), 2);

        let c = criteria(&[("area.notEquals", "HUMANAS")]);
        assert_eq!(f.metas.count_by_criteria(&c).await.unwrap(), 2);

        let c = criteria(&[("alunoId.equals", aluno.id.to_string().as_str())]);
        assert_eq!(f.metas.count_by_criteria(&c).await.unwrap(), 1);

        let c = criteria(&[("alunoId.specified", "false")]);
        assert_eq!(f.metas.count_by_criteria(&c).await.unwrap(), 2);

        let c = criteria(&[("valor.greaterThan", "200"), ("descricao.specified", "true")]);
        assert_eq!(f.metas.count_by_criteria(&c).await.unwrap(), 1);

        let page = PageRequest::default().with_sort("valor", Direction::Asc);
        let sorted = f.metas.find_by_criteria(&MetaCriteria::default(), &page).await.unwrap();
        assert_eq!(
            sorted.content.iter().map(|m| m.valor).collect::<Vec<_>>(),
            vec![176, 350, 443]
        );
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let f = fixture().await;
        let mut meta = f
            .metas
            .insert(&NewMeta::new(0, Area::Linguagens).with_descricao("AAAAAAAAAA"))
            .await
            .unwrap();

        meta.valor = 1;
        meta.area = Area::Humanas;
        meta.descricao = None;
        f.metas.update(&meta).await.unwrap();

        assert_eq!(f.metas.find_by_id(meta.id).await.unwrap(), Some(meta));
    }

    #[tokio::test]
    async fn test_descricao_contains_folds_accents() {
        let f = fixture().await;
        let mut meta = f
            .metas
            .insert(&NewMeta::new(600, Area::Linguagens).with_descricao("REDAÇÃO NOTA MÁXIMA"))
            .await
            .unwrap();
        f.metas.insert(&NewMeta::new(500, Area::Humanas).with_descricao("história")).await.unwrap();
        f.metas.insert(&NewMeta::new(400, Area::Natureza)).await.unwrap();

        let c = criteria(&[("descricao.contains", "redação nota máxima")]);
        assert_eq!(f.metas.count_by_criteria(&c).await.unwrap(), 1);
        let c = criteria(&[("descricao.contains", "Máx")]);
        assert_eq!(f.metas.count_by_criteria(&c).await.unwrap(), 1);
        let c = criteria(&[("descricao.doesNotContain", "ÇÃO")]);
        assert_eq!(f.metas.count_by_criteria(&c).await.unwrap(), 1);

        meta.descricao = Some("Física Óptica".into());
        f.metas.update(&meta).await.unwrap();
        let c = criteria(&[("descricao.contains", "física ó")]);
        assert_eq!(f.metas.count_by_criteria(&c).await.unwrap(), 1);
        let c = criteria(&[("descricao.contains", "redação")]);
        assert_eq!(f.metas.count_by_criteria(&c).await.unwrap(), 0);
    }
}
