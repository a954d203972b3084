//! Table and JSON rendering

use alunometa_sdk::{Aluno, Listing, Meta};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[derive(Tabled)]
pub struct AlunoRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Nome")]
    nome: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Nascimento")]
    data_nascimento: String,
    #[tabled(rename = "Telefone")]
    telefone: String,
}

impl From<&Aluno> for AlunoRow {
    fn from(aluno: &Aluno) -> Self {
        Self {
            id: aluno.id,
            nome: aluno.nome.clone(),
            email: aluno.email.clone(),
            data_nascimento: aluno.data_nascimento.to_string(),
            telefone: or_dash(aluno.telefone.as_deref()),
        }
    }
}

#[derive(Tabled)]
pub struct MetaRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Valor")]
    valor: i32,
    #[tabled(rename = "Area")]
    area: String,
    #[tabled(rename = "Descricao")]
    descricao: String,
    #[tabled(rename = "Aluno")]
    aluno: String,
}

impl From<&Meta> for MetaRow {
    fn from(meta: &Meta) -> Self {
        let aluno = match &meta.aluno {
            Some(aluno) => match &aluno.nome {
                Some(nome) => format!("{} ({})", aluno.id, nome),
                None => aluno.id.to_string(),
            },
            None => "-".to_string(),
        };
        Self {
            id: meta.id,
            valor: meta.valor,
            area: meta.area.to_string(),
            descricao: or_dash(meta.descricao.as_deref()),
            aluno,
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn alunos_table(alunos: &[Aluno]) -> String {
    Table::new(alunos.iter().map(AlunoRow::from)).to_string()
}

pub fn metas_table(metas: &[Meta]) -> String {
    Table::new(metas.iter().map(MetaRow::from)).to_string()
}

/// Table plus a "shown of total" footer
pub fn print_listing<T>(listing: &Listing<T>, table: impl Fn(&[T]) -> String) {
    if listing.items.is_empty() {
        println!("{}", "No results".yellow());
    } else {
        println!("{}", table(&listing.items));
    }
    println!(
        "{}",
        format!("{} shown, {} total", listing.items.len(), listing.total_count).dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use alunometa_sdk::{AlunoRef, Area};
    use chrono::NaiveDate;

    #[test]
    fn test_meta_row_shows_aluno_name() {
        let meta = Meta {
            id: 3,
            valor: 650,
            area: Area::Matematica,
            descricao: None,
            aluno: Some(AlunoRef { id: 1, nome: Some("Ana".into()) }),
        };
        let table = metas_table(&[meta]);
        assert!(table.contains("MATEMATICA"));
        assert!(table.contains("1 (Ana)"));
    }

    #[test]
    fn test_aluno_row_dashes_missing_phone() {
        let aluno = Aluno {
            id: 1,
            nome: "Ana".into(),
            email: "ana@example.com".into(),
            data_nascimento: NaiveDate::from_ymd_opt(2000, 1, 2).unwrap(),
            telefone: None,
        };
        let table = alunos_table(&[aluno]);
        assert!(table.contains("2000-01-02"));
        assert!(table.contains(" - "));
    }
}
