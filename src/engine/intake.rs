use std::time::Instant;

use tracing::{error, info, warn};

use crate::engine::queue::EnqueueOutcome;
use crate::engine::validator::validate;
use crate::error::AppError;
use crate::models::order::OrderBody;
use crate::state::AppState;

/// Validate, dispatch once, and map the outcome.
///
/// `Ok(())` means the queue accepted the order. A rejected body never reaches
/// the dispatcher; a failed dispatch is logged here and surfaces only as
/// `AppError::DispatchFailed`.
pub async fn intake_order(state: &AppState, body: OrderBody) -> Result<(), AppError> {
    let raw_len = body.raw_len;

    let order = match validate(body) {
        Ok(order) => order,
        Err(err) => {
            state
                .metrics
                .orders_total
                .with_label_values(&["rejected"])
                .inc();
            warn!(reason = err.reason(), raw_len, "order rejected");
            return Err(AppError::BadRequest(err.reason().to_string()));
        }
    };

    let start = Instant::now();
    let outcome = state.dispatcher.enqueue(&order).await;
    state
        .metrics
        .enqueue_latency_seconds
        .with_label_values(&[outcome.label()])
        .observe(start.elapsed().as_secs_f64());

    match outcome {
        EnqueueOutcome::Accepted { message_id } => {
            state
                .metrics
                .orders_total
                .with_label_values(&["created"])
                .inc();
            info!(
                message_id = message_id.as_deref().unwrap_or("-"),
                raw_len,
                "order sent to the kitchen"
            );
            Ok(())
        }
        EnqueueOutcome::Failed(err) => {
            state
                .metrics
                .orders_total
                .with_label_values(&["failed"])
                .inc();
            error!(
                error = %err,
                queue_url = state.dispatcher.queue_url(),
                provider = state.dispatcher.provider_name(),
                "failed to send order to the kitchen"
            );
            Err(AppError::DispatchFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::intake_order;
    use crate::config::Theme;
    use crate::engine::queue::{OrderDispatcher, QueueError, QueueProducer};
    use crate::error::AppError;
    use crate::models::order::OrderBody;
    use crate::state::AppState;

    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl QueueProducer for Counting {
        async fn send_message(&self, _: &str, _: String) -> Result<Option<String>, QueueError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(QueueError::Rejected("queue does not exist".to_string()))
            } else {
                Ok(None)
            }
        }

        fn provider_name(&self) -> &'static str {
            "counting"
        }
    }

    fn state(fail: bool) -> (AppState, Arc<Counting>) {
        let producer = Arc::new(Counting {
            calls: AtomicUsize::new(0),
            fail,
        });
        let dispatcher = OrderDispatcher::new(producer.clone(), "q", Duration::from_secs(1));
        (AppState::new(dispatcher, Theme::default(), "public"), producer)
    }

    fn body(raw: &str) -> OrderBody {
        OrderBody::from_bytes(raw.as_bytes()).unwrap()
    }

    fn counter(state: &AppState, outcome: &str) -> u64 {
        state.metrics.orders_total.with_label_values(&[outcome]).get()
    }

    #[tokio::test]
    async fn accepted_order_completes() {
        let (state, producer) = state(false);

        intake_order(&state, body(r#"{"items":["Taco"]}"#))
            .await
            .unwrap();

        assert_eq!(producer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(counter(&state, "created"), 1);
    }

    #[tokio::test]
    async fn empty_order_is_rejected_before_dispatch() {
        let (state, producer) = state(false);

        let err = intake_order(&state, body("{}")).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(ref reason) if reason == "empty_body"));
        assert_eq!(producer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(counter(&state, "rejected"), 1);
    }

    #[tokio::test]
    async fn failed_dispatch_errors_after_one_attempt() {
        let (state, producer) = state(true);

        let err = intake_order(&state, body(r#"{"items":["Taco"]}"#))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DispatchFailed));
        assert_eq!(producer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(counter(&state, "failed"), 1);
    }
}
