// Aluno (student) Domain Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aluno identifier (assigned by the database)
pub type AlunoId = i64;

/// Persisted student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aluno {
    pub id: AlunoId,
    pub nome: String,
    pub email: String,
    pub data_nascimento: NaiveDate,
    pub telefone: Option<String>,
}

/// Student as submitted by a client.
///
/// Before creation `id` is `None` and serializes as an explicit `null`; the
/// same shape carries the claimed id on a full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAluno {
    #[serde(default)]
    pub id: Option<AlunoId>,
    pub nome: String,
    pub email: String,
    pub data_nascimento: NaiveDate,
    #[serde(default)]
    pub telefone: Option<String>,
}

/// Partial update: `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlunoPatch {
    #[serde(default)]
    pub id: Option<AlunoId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_nascimento: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
}

impl NewAluno {
    pub fn new(nome: impl Into<String>, email: impl Into<String>, data_nascimento: NaiveDate) -> Self {
        Self {
            id: None,
            nome: nome.into(),
            email: email.into(),
            data_nascimento,
            telefone: None,
        }
    }

    pub fn with_telefone(mut self, telefone: impl Into<String>) -> Self {
        self.telefone = Some(telefone.into());
        self
    }

    /// Attach the identifier assigned on persistence
    pub fn into_aluno(self, id: AlunoId) -> Aluno {
        Aluno {
            id,
            nome: self.nome,
            email: self.email,
            data_nascimento: self.data_nascimento,
            telefone: self.telefone,
        }
    }
}

impl From<Aluno> for NewAluno {
    fn from(aluno: Aluno) -> Self {
        Self {
            id: Some(aluno.id),
            nome: aluno.nome,
            email: aluno.email,
            data_nascimento: aluno.data_nascimento,
            telefone: aluno.telefone,
        }
    }
}

impl Aluno {
    /// Merge the non-null fields of `patch` into this aluno
    pub fn apply_patch(&mut self, patch: AlunoPatch) {
        if let Some(nome) = patch.nome {
            self.nome = nome;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(data_nascimento) = patch.data_nascimento {
            self.data_nascimento = data_nascimento;
        }
        if let Some(telefone) = patch.telefone {
            self.telefone = Some(telefone);
        }
    }
}
