use anyhow::Context;
use dotenvy::dotenv;
use researchdesk::router::init_router;
use researchdesk::state::init_app_state;
use researchdesk_config::{ServerConfig, StoreConfig};
use researchdesk_observability::{init_metrics, init_tracing};
use tracing::info;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let metrics = init_metrics();
    let server_config = ServerConfig::from_env();
    let store_config = StoreConfig::from_env();

    let state = init_app_state(&store_config, metrics).await?;
    info!(
        backend = state.session.backend(),
        origin = ?state.session.origin(),
        "Navigation permissions ready"
    );

    let app = init_router(state.clone());

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("🚀 Server running on http://{}", address);
    info!("📚 Swagger UI available at http://{}/swagger-ui", address);
    info!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    state.session.flush().await;
    info!("Server stopped");
    Ok(())
}
