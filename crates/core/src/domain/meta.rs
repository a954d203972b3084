// Meta (goal) Domain Model

use super::aluno::AlunoId;
use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meta identifier (assigned by the database)
pub type MetaId = i64;

/// ENEM subject area a goal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Area {
    Humanas,
    Natureza,
    Linguagens,
    Matematica,
}

impl Area {
    pub const ALL: [Area; 4] = [
        Area::Humanas,
        Area::Natureza,
        Area::Linguagens,
        Area::Matematica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Humanas => "HUMANAS",
            Area::Natureza => "NATUREZA",
            Area::Linguagens => "LINGUAGENS",
            Area::Matematica => "MATEMATICA",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Area {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Area::ALL
            .into_iter()
            .find(|area| area.as_str() == s)
            .ok_or_else(|| DomainError::InvalidArea(s.to_string()))
    }
}

/// Owning aluno of a meta. Clients send only the `id`; `nome` is filled
/// when the meta is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlunoRef {
    pub id: AlunoId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
}

impl AlunoRef {
    pub fn new(id: AlunoId) -> Self {
        Self { id, nome: None }
    }
}

/// Persisted goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub id: MetaId,
    pub valor: i32,
    pub area: Area,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub aluno: Option<AlunoRef>,
}

/// Goal as submitted by a client (`id` is `null` before creation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeta {
    #[serde(default)]
    pub id: Option<MetaId>,
    pub valor: i32,
    pub area: Area,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub aluno: Option<AlunoRef>,
}

/// Partial update: `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPatch {
    #[serde(default)]
    pub id: Option<MetaId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Area>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aluno: Option<AlunoRef>,
}

impl NewMeta {
    pub fn new(valor: i32, area: Area) -> Self {
        Self {
            id: None,
            valor,
            area,
            descricao: None,
            aluno: None,
        }
    }

    pub fn with_descricao(mut self, descricao: impl Into<String>) -> Self {
        self.descricao = Some(descricao.into());
        self
    }

    pub fn with_aluno(mut self, aluno_id: AlunoId) -> Self {
        self.aluno = Some(AlunoRef::new(aluno_id));
        self
    }

    pub fn into_meta(self, id: MetaId) -> Meta {
        Meta {
            id,
            valor: self.valor,
            area: self.area,
            descricao: self.descricao,
            aluno: self.aluno,
        }
    }
}

impl From<Meta> for NewMeta {
    fn from(meta: Meta) -> Self {
        Self {
            id: Some(meta.id),
            valor: meta.valor,
            area: meta.area,
            descricao: meta.descricao,
            aluno: meta.aluno,
        }
    }
}

impl Meta {
    pub fn aluno_id(&self) -> Option<AlunoId> {
        self.aluno.as_ref().map(|a| a.id)
    }

    /// Merge the non-null fields of `patch` into this meta
    pub fn apply_patch(&mut self, patch: MetaPatch) {
        if let Some(valor) = patch.valor {
            self.valor = valor;
        }
        if let Some(area) = patch.area {
            self.area = area;
        }
        if let Some(descricao) = patch.descricao {
            self.descricao = Some(descricao);
        }
        if let Some(aluno) = patch.aluno {
            self.aluno = Some(aluno);
        }
    }
}
