//! SDK Request/Response Types

pub use alunometa_core::domain::{
    Aluno, AlunoId, AlunoPatch, AlunoRef, Area, Meta, MetaId, MetaPatch, NewAluno, NewMeta,
};

/// Filters, paging and sorting for a list request.
///
/// Filters use the server's `field.operator=value` form, e.g.
/// `("nome.contains", "silva")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: Vec<(String, String)>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// `property` or `property,asc|desc`
    pub sort: Vec<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort.push(sort.into());
        self
    }

    /// Query string pairs in the order the server expects
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        pairs.extend(self.sort.iter().map(|s| ("sort".to_string(), s.clone())));
        pairs
    }
}

/// One page of a list response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    /// Value of `X-Total-Count`: matches across all pages
    pub total_count: u64,
}
