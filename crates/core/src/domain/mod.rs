// Domain Layer - Entities and value types

pub mod aluno;
pub mod error;
pub mod meta;
#[cfg(any(test, feature = "test-fixtures"))]
pub mod samples;

// Re-exports
pub use aluno::{Aluno, AlunoId, AlunoPatch, NewAluno};
pub use error::DomainError;
pub use meta::{AlunoRef, Area, Meta, MetaId, MetaPatch, NewMeta};
