//! Web server command handler

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::info;

use crate::api;
use crate::config::Config;

pub async fn cmd_web(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = api::create_app_state_from_config(config, prometheus_handle)?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
