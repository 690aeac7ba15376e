use std::sync::Arc;

use anyhow::Context;

use duenos_api::config::ApiConfig;
use duenos_infra::{OwnerStore, PostgresOwnerStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    duenos_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    let pool = duenos_infra::db::connect_lazy(&config.database);
    let store = PostgresOwnerStore::new(pool);

    // Startup does not wait for the database; report reachability once.
    let db_check = store.clone();
    let (db_host, db_name) = (config.database.host.clone(), config.database.name.clone());
    tokio::spawn(async move {
        match db_check.ping().await {
            Ok(()) => tracing::info!(host = %db_host, database = %db_name, "connected to database"),
            Err(e) => tracing::error!(host = %db_host, database = %db_name, error = %e, "database unreachable"),
        }
    });

    let app = duenos_api::app::build_app(&config, Arc::new(store));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
