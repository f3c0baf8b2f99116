use std::sync::Arc;

use anyhow::Context;

use ntt_api::config::ApiConfig;
use ntt_infra::InMemoryLedgerSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ntt_observability::init();

    let config = ApiConfig::from_env()?;

    let source = InMemoryLedgerSource::load_snapshot(&config.snapshot_path)
        .with_context(|| format!("loading {}", config.snapshot_path.display()))?;

    let app = ntt_api::app::build_app(Arc::new(source), config.csv);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
