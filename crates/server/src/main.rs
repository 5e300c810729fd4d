mod api;
mod router;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use vitals_core::Config;
use vitals_llm::QueryExtractor;
use vitals_retrieval::{QueryPipeline, Session};
use vitals_series::DatasetCache;

fn load_config() -> Config {
    vitals_core::config::load_dotenv();
    Config::from_env()
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let extractor = QueryExtractor::from_config(&config.llm, &config.ollama)
        .context("failed to set up LLM provider")?;

    // The dataset must index cleanly before anything is served.
    let session = Session::open(
        DatasetCache::new(),
        &config.dataset.path,
        QueryPipeline::new(extractor),
    )
    .with_context(|| format!("failed to load dataset {}", config.dataset.path.display()))?;

    let state = Arc::new(state::AppState::new(
        session,
        config.dataset.export_path.clone(),
    ));
    let app = router::build_router(state, &config.server.cors_origin);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    config.log_summary();
    serve(&config).await
}
