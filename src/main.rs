use task_api::config::Config;
use task_api::http::routing;
use task_api::http::routes::tasks;
use task_api::infrastructure::{in_memory_repo::InMemoryTaskRepository, json_snapshot::JsonSnapshot};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let repo = match &config.tasks_file {
        Some(path) => InMemoryTaskRepository::with_snapshot(JsonSnapshot::new(path)).await?,
        None => InMemoryTaskRepository::new(),
    };
    match &config.tasks_file {
        Some(path) => tracing::info!(path = %path.display(), "task store ready, snapshotting to file"),
        None => tracing::info!("task store ready, in memory only"),
    }

    let router = routing::app(tasks::router(tasks::AppState { repo }));

    let addr = config.bind_addr;
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
