// Alunometa Infrastructure - SQLite Adapter
// Implements: AlunoRepository, MetaRepository

mod aluno_repository;
mod connection;
mod criteria_sql;
mod error;
mod meta_repository;
mod migration;

pub use aluno_repository::SqliteAlunoRepository;
pub use connection::{create_pool, memory_pool, DEFAULT_MAX_CONNECTIONS};
pub use meta_repository::SqliteMetaRepository;
pub use migration::run_migrations;

// Note: sqlx::Error conversion is handled by map_sqlx_error
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
