//! Request handlers, one module per resource.

pub mod aluno;
pub mod meta;

/// Liveness probe
pub async fn health() -> &'static str {
    "OK"
}
