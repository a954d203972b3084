//! Alunometa - REST server entry point

mod config;
mod logging;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

use alunometa_api_rest::{bind, router, serve, Alerts, ApiContext};
use alunometa_core::application::{AlunoService, MetaService};
use alunometa_infra_sqlite::{create_pool, run_migrations, SqliteAlunoRepository, SqliteMetaRepository};
use config::Config;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Configuration and logging
    let config = Config::from_env()?;
    let _log_guard = logging::init(config.log_format, config.log_dir.as_deref())?;

    info!("Alunometa v{} starting...", VERSION);

    // 2. Database
    if let Some(dir) = config.db_dir() {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("cannot create database directory {}", dir.display()))?;
    }
    info!(db_path = %config.db_path, "Initializing database...");
    let pool = create_pool(&config.database_url(), config.db_max_connections)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 3. Wiring
    let alunos = Arc::new(SqliteAlunoRepository::new(pool.clone()));
    let metas = Arc::new(SqliteMetaRepository::new(pool.clone()));
    let state = Arc::new(ApiContext {
        alunos: AlunoService::new(alunos.clone()),
        metas: MetaService::new(metas, alunos),
        alerts: Alerts::new(config.app_name.as_str())
            .with_context(|| format!("invalid ALUNOMETA_APP_NAME '{}'", config.app_name))?,
    });

    // 4. HTTP server
    let listener = bind(&config.server)
        .await
        .with_context(|| format!("cannot listen on {}", config.server.addr()))?;
    info!("Press Ctrl+C to shutdown");
    serve(listener, router(state), shutdown_signal()).await?;

    // 5. Graceful shutdown
    pool.close().await;
    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = ?e, "Cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received. Draining in-flight requests...");
}
