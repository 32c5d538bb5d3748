use std::sync::Arc;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use tracing::{debug, warn};

use crate::engine::intake::intake_order;
use crate::error::AppError;
use crate::models::order::OrderBody;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/order", post(create_order))
}

/// Transport-level parsing. Syntactically broken JSON is refused here, before
/// the handler runs; an empty but well-formed body is left for validation.
/// Bodies not declared as JSON are not parsed and count as absent.
#[async_trait]
impl<S> FromRequest<S> for OrderBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if !declared_json {
            debug!(raw_len = bytes.len(), "order body is not json, ignoring it");
            return Ok(OrderBody {
                content: None,
                raw_len: bytes.len(),
            });
        }

        OrderBody::from_bytes(&bytes).map_err(|err| {
            warn!(error = %err, raw_len = bytes.len(), "unparsable order body");
            err.into_response()
        })
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    body: OrderBody,
) -> Result<StatusCode, AppError> {
    intake_order(&state, body).await?;

    Ok(StatusCode::CREATED)
}
