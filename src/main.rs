use std::sync::Arc;

use order_intake::api;
use order_intake::config::{Config, LogFormat};
use order_intake::engine::queue::OrderDispatcher;
use order_intake::engine::sqs::SqsProducer;
use order_intake::error::AppError;
use order_intake::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false);
    match config.log_format {
        LogFormat::Compact => subscriber.compact().init(),
        LogFormat::Json => subscriber.json().init(),
    }

    let producer = SqsProducer::connect(&config.queue).await;
    let dispatcher = OrderDispatcher::new(
        Arc::new(producer),
        config.queue.url.clone(),
        config.queue.send_timeout,
    );
    let shared_state = Arc::new(AppState::new(
        dispatcher,
        config.theme.clone(),
        config.public_dir.clone(),
    ));

    let app = api::rest::router(shared_state);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        queue_url = %config.queue.url,
        "ready to take your order"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("closing the shop, draining in-flight orders"),
        Err(err) => tracing::error!(error = %err, "failed to listen for shutdown signal"),
    }
}
