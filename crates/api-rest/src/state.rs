//! Shared application state type.

use crate::headers::Alerts;
use alunometa_core::application::{AlunoService, MetaService};
use std::sync::Arc;

/// Services and header configuration needed by the handlers
pub struct ApiContext {
    pub alunos: AlunoService,
    pub metas: MetaService,
    pub alerts: Alerts,
}

pub type AppState = Arc<ApiContext>;
