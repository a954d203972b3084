//! Per-entity search criteria.
//!
//! Criteria are built from request query pairs of the form
//! `field.operator=value`. Unknown fields are ignored; a known field with an
//! unknown operator or an unparsable value is an error.

use super::filter::{parse_bool, AreaFilter, IntegerFilter, LocalDateFilter, LongFilter, StringFilter};
use crate::domain::error::Result;
use std::fmt;

/// Common behaviour of entity criteria
pub trait Criteria: Default + fmt::Display {
    /// Apply one `field.op=raw` parameter. Unknown fields are ignored.
    fn set_filter(&mut self, field: &str, op: &str, raw: &str) -> Result<()>;

    fn set_distinct(&mut self, distinct: bool);

    fn from_query_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            if key == "distinct" {
                criteria.set_distinct(parse_bool(key, value)?);
                continue;
            }
            if let Some((field, op)) = key.split_once('.') {
                criteria.set_filter(field, op, value)?;
            }
        }
        Ok(criteria)
    }
}

fn write_field<F: fmt::Display>(f: &mut fmt::Formatter<'_>, name: &str, filter: &Option<F>) -> fmt::Result {
    match filter {
        Some(filter) => write!(f, "{}={}, ", name, filter),
        None => Ok(()),
    }
}

/// Filters over `aluno` rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlunoCriteria {
    pub id: Option<LongFilter>,
    pub nome: Option<StringFilter>,
    pub email: Option<StringFilter>,
    pub data_nascimento: Option<LocalDateFilter>,
    pub telefone: Option<StringFilter>,
    /// Matches alunos owning at least one meta satisfying the filter
    pub metas_id: Option<LongFilter>,
    pub distinct: Option<bool>,
}

impl AlunoCriteria {
    pub fn id(&mut self) -> &mut LongFilter {
        self.id.get_or_insert_with(Default::default)
    }

    pub fn nome(&mut self) -> &mut StringFilter {
        self.nome.get_or_insert_with(Default::default)
    }

    pub fn email(&mut self) -> &mut StringFilter {
        self.email.get_or_insert_with(Default::default)
    }

    pub fn data_nascimento(&mut self) -> &mut LocalDateFilter {
        self.data_nascimento.get_or_insert_with(Default::default)
    }

    pub fn telefone(&mut self) -> &mut StringFilter {
        self.telefone.get_or_insert_with(Default::default)
    }

    pub fn metas_id(&mut self) -> &mut LongFilter {
        self.metas_id.get_or_insert_with(Default::default)
    }
}

impl Criteria for AlunoCriteria {
    fn set_filter(&mut self, field: &str, op: &str, raw: &str) -> Result<()> {
        match field {
            "id" => self.id().set(field, op, raw),
            "nome" => self.nome().set(field, op, raw),
            "email" => self.email().set(field, op, raw),
            "dataNascimento" => self.data_nascimento().set(field, op, raw),
            "telefone" => self.telefone().set(field, op, raw),
            "metasId" => self.metas_id().set(field, op, raw),
            _ => Ok(()),
        }
    }

    fn set_distinct(&mut self, distinct: bool) {
        self.distinct = Some(distinct);
    }
}

impl fmt::Display for AlunoCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AlunoCriteria{")?;
        write_field(f, "id", &self.id)?;
        write_field(f, "nome", &self.nome)?;
        write_field(f, "email", &self.email)?;
        write_field(f, "dataNascimento", &self.data_nascimento)?;
        write_field(f, "telefone", &self.telefone)?;
        write_field(f, "metasId", &self.metas_id)?;
        write_field(f, "distinct", &self.distinct)?;
        f.write_str("}")
    }
}

/// Filters over `meta` rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaCriteria {
    pub id: Option<LongFilter>,
    pub valor: Option<IntegerFilter>,
    pub area: Option<AreaFilter>,
    pub descricao: Option<StringFilter>,
    pub aluno_id: Option<LongFilter>,
    pub distinct: Option<bool>,
}

impl MetaCriteria {
    pub fn id(&mut self) -> &mut LongFilter {
        self.id.get_or_insert_with(Default::default)
    }

    pub fn valor(&mut self) -> &mut IntegerFilter {
        self.valor.get_or_insert_with(Default::default)
    }

    pub fn area(&mut self) -> &mut AreaFilter {
        self.area.get_or_insert_with(Default::default)
    }

    pub fn descricao(&mut self) -> &mut StringFilter {
        self.descricao.get_or_insert_with(Default::default)
    }

    pub fn aluno_id(&mut self) -> &mut LongFilter {
        self.aluno_id.get_or_insert_with(Default::default)
    }
}

impl Criteria for MetaCriteria {
    fn set_filter(&mut self, field: &str, op: &str, raw: &str) -> Result<()> {
        match field {
            "id" => self.id().set(field, op, raw),
            "valor" => self.valor().set(field, op, raw),
            "area" => self.area().set(field, op, raw),
            "descricao" => self.descricao().set(field, op, raw),
            "alunoId" => self.aluno_id().set(field, op, raw),
            _ => Ok(()),
        }
    }

    fn set_distinct(&mut self, distinct: bool) {
        self.distinct = Some(distinct);
    }
}

impl fmt::Display for MetaCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MetaCriteria{")?;
        write_field(f, "id", &self.id)?;
        write_field(f, "valor", &self.valor)?;
        write_field(f, "area", &self.area)?;
        write_field(f, "descricao", &self.descricao)?;
        write_field(f, "alunoId", &self.aluno_id)?;
        write_field(f, "distinct", &self.distinct)?;
        f.write_str("}")
    }
}
