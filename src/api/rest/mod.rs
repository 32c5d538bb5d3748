pub mod orders;
pub mod pages;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

use crate::models::health::HealthStatus;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.public_dir);

    Router::new()
        .merge(orders::router())
        .route("/", get(pages::index))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
        .fallback_service(assets)
        .layer(
            ServiceBuilder::new().layer(
                // 5xx responses are already logged by whoever produced them.
                TraceLayer::new_for_http().on_failure(DefaultOnFailure::new().level(Level::DEBUG)),
            ),
        )
}

async fn healthz() -> Json<HealthStatus> {
    Json(HealthStatus::capture())
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
