// Port Layer - Interfaces for external dependencies

pub mod aluno_repository;
pub mod meta_repository;

// Re-exports
pub use aluno_repository::AlunoRepository;
pub use meta_repository::MetaRepository;

#[cfg(test)]
pub use aluno_repository::MockAlunoRepository;
#[cfg(test)]
pub use meta_repository::MockMetaRepository;
