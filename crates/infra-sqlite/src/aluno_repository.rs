// SQLite AlunoRepository Implementation

use crate::criteria_sql::{fold_case, push_page, Conditions};
use crate::error::map_sqlx_error;
use alunometa_core::domain::{Aluno, AlunoId, NewAluno};
use alunometa_core::error::{AppError, Result};
use alunometa_core::port::AlunoRepository;
use alunometa_core::query::{AlunoCriteria, Page, PageRequest};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const SELECT_ALUNO: &str = "SELECT a.id, a.nome, a.email, a.data_nascimento, a.telefone FROM aluno a";

/// Sortable JSON properties and their columns
const SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "a.id"),
    ("nome", "a.nome"),
    ("email", "a.email"),
    ("dataNascimento", "a.data_nascimento"),
    ("telefone", "a.telefone"),
];

pub struct SqliteAlunoRepository {
    pool: SqlitePool,
}

impl SqliteAlunoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn push_criteria(qb: &mut QueryBuilder<'_, Sqlite>, criteria: &AlunoCriteria) {
    let mut conditions = Conditions::new(qb);
    if let Some(f) = &criteria.id {
        conditions.column("a.id", f.predicates());
    }
    if let Some(f) = &criteria.nome {
        conditions.text("a.nome", "a.nome_folded", f.predicates());
    }
    if let Some(f) = &criteria.email {
        conditions.text("a.email", "a.email_folded", f.predicates());
    }
    if let Some(f) = &criteria.data_nascimento {
        conditions.column("a.data_nascimento", f.predicates());
    }
    if let Some(f) = &criteria.telefone {
        conditions.text("a.telefone", "a.telefone_folded", f.predicates());
    }
    if let Some(f) = &criteria.metas_id {
        conditions.related("meta c", "c.aluno_id = a.id", "c.id", f.predicates());
    }
}

#[async_trait]
impl AlunoRepository for SqliteAlunoRepository {
    async fn insert(&self, aluno: &NewAluno) -> Result<Aluno> {
        let result = sqlx::query(
            r#"
            INSERT INTO aluno (nome, email, data_nascimento, telefone, nome_folded, email_folded, telefone_folded)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&aluno.nome)
        .bind(&aluno.email)
        .bind(aluno.data_nascimento)
        .bind(&aluno.telefone)
        .bind(fold_case(&aluno.nome))
        .bind(fold_case(&aluno.email))
        .bind(aluno.telefone.as_deref().map(fold_case))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(aluno.clone().into_aluno(result.last_insert_rowid()))
    }

    async fn update(&self, aluno: &Aluno) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE aluno
            SET nome = ?, email = ?, data_nascimento = ?, telefone = ?,
                nome_folded = ?, email_folded = ?, telefone_folded = ?
            WHERE id = ?
            "#,
        )
        .bind(&aluno.nome)
        .bind(&aluno.email)
        .bind(aluno.data_nascimento)
        .bind(&aluno.telefone)
        .bind(fold_case(&aluno.nome))
        .bind(fold_case(&aluno.email))
        .bind(aluno.telefone.as_deref().map(fold_case))
        .bind(aluno.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("aluno {}", aluno.id)));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: AlunoId) -> Result<Option<Aluno>> {
        let row = sqlx::query_as::<_, AlunoRow>(&format!("{} WHERE a.id = ?", SELECT_ALUNO))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(AlunoRow::into_aluno))
    }

    async fn exists_by_id(&self, id: AlunoId) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM aluno WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: AlunoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM aluno WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_criteria(&self, criteria: &AlunoCriteria, page: &PageRequest) -> Result<Page<Aluno>> {
        let total = self.count_by_criteria(criteria).await?;

        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_ALUNO);
        push_criteria(&mut qb, criteria);
        push_page(&mut qb, page, SORT_COLUMNS, "a.id")?;

        let rows = qb
            .build_query_as::<AlunoRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Page::new(
            rows.into_iter().map(AlunoRow::into_aluno).collect(),
            total,
            page,
        ))
    }

    async fn count_by_criteria(&self, criteria: &AlunoCriteria) -> Result<u64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM aluno a");
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
struct AlunoRow {
    id: i64,
    nome: String,
    email: String,
    data_nascimento: NaiveDate,
    telefone: Option<String>,
}

impl AlunoRow {
    fn into_aluno(self) -> Aluno {
        Aluno {
            id: self.id,
            nome: self.nome,
            email: self.email,
            data_nascimento: self.data_nascimento,
            telefone: self.telefone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_pool;
    use alunometa_core::domain::samples;
    use alunometa_core::query::{Criteria, Direction};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded_repo() -> (SqliteAlunoRepository, Vec<Aluno>) {
        let repo = SqliteAlunoRepository::new(memory_pool().await.unwrap());
        let mut saved = Vec::new();
        for sample in samples::aluno::persisted() {
            saved.push(repo.insert(&NewAluno::from(sample.clone())).await.unwrap());
        }
        (repo, saved)
    }

    fn criteria(pairs: &[(&str, &str)]) -> AlunoCriteria {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AlunoCriteria::from_query_pairs(&pairs).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_new_id() {
        let repo = SqliteAlunoRepository::new(memory_pool().await.unwrap());
        let saved = repo
            .insert(&samples::aluno::SAMPLE_WITH_NEW_DATA)
            .await
            .unwrap();

        assert!(saved.id > 0);
        let loaded = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.data_nascimento, date(2025, 3, 16));
    }

    #[tokio::test]
    async fn test_insert_ignores_claimed_id() {
        let (_, saved) = seeded_repo().await;
        assert_eq!(saved.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (repo, saved) = seeded_repo().await;
        let mut aluno = saved[0].clone();
        aluno.telefone = Some("BBBBBBBBBB".into());
        repo.update(&aluno).await.unwrap();
        assert_eq!(repo.find_by_id(aluno.id).await.unwrap(), Some(aluno.clone()));

        assert!(repo.delete_by_id(aluno.id).await.unwrap());
        assert!(!repo.delete_by_id(aluno.id).await.unwrap());
        assert!(!repo.exists_by_id(aluno.id).await.unwrap());

        aluno.id = 999;
        assert!(matches!(repo.update(&aluno).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_string_filters() {
        let (repo, _) = seeded_repo().await;

        assert_eq!(repo.count_by_criteria(&criteria(&[("nome.contains", "OOF")])).await.unwrap(), 1);
        assert_eq!(repo.count_by_criteria(&criteria(&[("email.doesNotContain", "hotmail")])).await.unwrap(), 2);
        assert_eq!(repo.count_by_criteria(&criteria(&[("telefone.specified", "false")])).await.unwrap(), 1);
        assert_eq!(repo.count_by_criteria(&criteria(&[("nome.in", "wetly,boo tomorrow")])).await.unwrap(), 2);
        assert_eq!(repo.count_by_criteria(&criteria(&[("nome.equals", "%")])).await.unwrap(), 0);
        assert_eq!(repo.count_by_criteria(&criteria(&[("nome.contains", "%")])).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_contains_ignores_case_of_accented_letters() {
        let (repo, _) = seeded_repo().await;
        let aluno = repo
            .insert(&NewAluno::new("ÁLVARO JOÃO", "Álvaro@Escola.br", date(2004, 6, 1)).with_telefone("Ramal Ção"))
            .await
            .unwrap();

        for (key, value) in [
            ("nome.contains", "álvaro joão"),
            ("nome.contains", "Álvaro"),
            ("nome.contains", "joÃo"),
            ("email.contains", "ÁLVARO@"),
            ("telefone.contains", "ção"),
        ] {
            let found = repo
                .find_by_criteria(&criteria(&[(key, value)]), &PageRequest::default())
                .await
                .unwrap();
            assert_eq!(found.content, vec![aluno.clone()], "{}={}", key, value);
        }

        assert_eq!(repo.count_by_criteria(&criteria(&[("nome.doesNotContain", "joão")])).await.unwrap(), 3);
        assert_eq!(repo.count_by_criteria(&criteria(&[("nome.doesNotContain", "JOAO")])).await.unwrap(), 4);
        // equals stays exact
        assert_eq!(repo.count_by_criteria(&criteria(&[("nome.equals", "álvaro joão")])).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_refreshes_folded_text() {
        let (repo, saved) = seeded_repo().await;
        let mut aluno = saved[0].clone();
        aluno.nome = "Ênio Índio".into();
        aluno.telefone = None;
        repo.update(&aluno).await.unwrap();

        assert_eq!(repo.count_by_criteria(&criteria(&[("nome.contains", "ênio í")])).await.unwrap(), 1);
        assert_eq!(repo.count_by_criteria(&criteria(&[("nome.contains", "tomorrow")])).await.unwrap(), 0);
        assert_eq!(repo.count_by_criteria(&criteria(&[("telefone.doesNotContain", "x")])).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_range_filters() {
        let (repo, _) = seeded_repo().await;

        let c = criteria(&[("id.greaterThan", "1"), ("id.lessThanOrEqual", "3")]);
        assert_eq!(repo.count_by_criteria(&c).await.unwrap(), 2);

        let c = criteria(&[("dataNascimento.lessThan", "2025-03-16")]);
        assert_eq!(repo.count_by_criteria(&c).await.unwrap(), 0);

        let c = criteria(&[("dataNascimento.greaterThanOrEqual", "2025-03-16")]);
        assert_eq!(repo.count_by_criteria(&c).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_metas_id_filter() {
        let (repo, saved) = seeded_repo().await;
        sqlx::query("INSERT INTO meta (valor, area, aluno_id) VALUES (1, 'HUMANAS', ?)")
            .bind(saved[1].id)
            .execute(&repo.pool)
            .await
            .unwrap();

        let with_meta = repo
            .find_by_criteria(&criteria(&[("metasId.equals", "1")]), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(with_meta.content, vec![saved[1].clone()]);

        let c = criteria(&[("metasId.specified", "false")]);
        assert_eq!(repo.count_by_criteria(&c).await.unwrap(), 2);

        let c = criteria(&[("metasId.equals", "2")]);
        assert_eq!(repo.count_by_criteria(&c).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_paging_and_sorting() {
        let (repo, saved) = seeded_repo().await;

        let page = PageRequest::new(0, 2).with_sort("nome", Direction::Desc);
        let result = repo.find_by_criteria(&AlunoCriteria::default(), &page).await.unwrap();
        assert_eq!(result.total_elements, 3);
        assert_eq!(result.total_pages(), 2);
        assert_eq!(
            result.content.iter().map(|a| a.nome.as_str()).collect::<Vec<_>>(),
            vec!["wetly", "oof near likewise"]
        );

        let second = repo
            .find_by_criteria(&AlunoCriteria::default(), &PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(second.content, vec![saved[2].clone()]);
        assert!(!second.has_next());

        let bad = PageRequest::default().with_sort("senha", Direction::Asc);
        assert!(repo.find_by_criteria(&AlunoCriteria::default(), &bad).await.is_err());
    }
}
