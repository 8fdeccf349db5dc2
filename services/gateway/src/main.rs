//! Relay gateway entry point.
//!
//! Wires configuration, storage and the HTTP router, runs the periodic store
//! syncer, and closes the store on shutdown.
use gateway::app::build_router;
use gateway::config::GatewayConfig;
use gateway::{build_state, observability, store};
use std::future::Future;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env_or_yaml()?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: GatewayConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability("relay-gateway");
    let state = build_state(&config).await?;
    let store = state.handler.store().clone();
    tracing::info!(
        backend = store.backend_name(),
        durable = store.is_durable(),
        "topic store ready"
    );
    let metrics_task = tokio::spawn(observability::serve_metrics(
        metrics_handle,
        config.metrics_bind,
    ));
    let sync_task = store::spawn_syncer(store.clone(), config.sync_interval);

    let app = build_router(state);
    let addr = config.bind_addr;
    tracing::info!(%addr, "gateway listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::pin!(shutdown);
    let served = tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => result,
        _ = &mut shutdown => Ok(()),
    };

    sync_task.abort();
    metrics_task.abort();
    let _ = sync_task.await;
    let _ = metrics_task.await;
    if let Err(err) = store.close().await {
        tracing::error!(error = %err, "failed to close topic store");
    }
    tracing::info!("gateway stopped");
    served?;
    Ok(())
}
