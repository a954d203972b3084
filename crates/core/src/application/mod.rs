// Application Layer - Use Cases and Business Logic

pub mod aluno_service;
pub mod meta_service;

// Re-exports
pub use aluno_service::AlunoService;
pub use meta_service::MetaService;

use crate::error::{AppError, Result};

/// Identifier rules shared by full and partial updates: the body must carry
/// an id and it must match the one in the path.
pub(crate) fn check_update_id(path_id: i64, body_id: Option<i64>, entity_name: &'static str) -> Result<()> {
    match body_id {
        None => Err(AppError::bad_request("Invalid id", entity_name, "idnull")),
        Some(id) if id != path_id => Err(AppError::bad_request("Invalid ID", entity_name, "idinvalid")),
        Some(_) => Ok(()),
    }
}

pub(crate) fn not_found_alert(entity_name: &'static str) -> AppError {
    AppError::bad_request("Entity not found", entity_name, "idnotfound")
}
