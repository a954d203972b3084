//! REST API for alunos and metas.
//!
//! Routes live under `/api`; see [`routes::router`]. Responses carry the
//! `X-<app>-alert` / `X-<app>-error` headers UIs use to show notifications.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod headers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::HttpError;
pub use headers::Alerts;
pub use routes::router;
pub use server::{bind, serve, ServerConfig};
pub use state::{ApiContext, AppState};
