use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::timeout;

use crate::models::order::OrderPayload;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue backend rejected the message: {0}")]
    Rejected(String),

    #[error("queue backend did not answer within {0:?}")]
    Timeout(Duration),

    #[error("order could not be serialized: {0}")]
    Serialization(String),
}

/// A message-queue backend that accepts one text message per call.
///
/// Implementations make exactly one network round trip per `send_message`
/// and must not retry internally.
#[async_trait]
pub trait QueueProducer: Send + Sync + 'static {
    /// Returns the backend's message id when it hands one back.
    async fn send_message(&self, queue_url: &str, body: String)
        -> Result<Option<String>, QueueError>;

    fn provider_name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Accepted { message_id: Option<String> },
    Failed(QueueError),
}

impl EnqueueOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            EnqueueOutcome::Accepted { .. } => "accepted",
            EnqueueOutcome::Failed(_) => "failed",
        }
    }
}

/// Hands validated orders to the configured queue. Built once at startup and
/// shared by every request.
#[derive(Clone)]
pub struct OrderDispatcher {
    producer: Arc<dyn QueueProducer>,
    queue_url: String,
    send_timeout: Duration,
}

impl fmt::Debug for OrderDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderDispatcher")
            .field("provider", &self.producer.provider_name())
            .field("queue_url", &self.queue_url)
            .field("send_timeout", &self.send_timeout)
            .finish()
    }
}

impl OrderDispatcher {
    pub fn new(
        producer: Arc<dyn QueueProducer>,
        queue_url: impl Into<String>,
        send_timeout: Duration,
    ) -> Self {
        Self {
            producer,
            queue_url: queue_url.into(),
            send_timeout,
        }
    }

    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    pub fn provider_name(&self) -> &'static str {
        self.producer.provider_name()
    }

    /// One attempt, no retry. A send still pending after `send_timeout` is
    /// dropped and reported as a timeout.
    pub async fn enqueue(&self, order: &OrderPayload) -> EnqueueOutcome {
        let body = match order.message_body() {
            Ok(body) => body,
            Err(err) => return EnqueueOutcome::Failed(QueueError::Serialization(err.to_string())),
        };

        match timeout(
            self.send_timeout,
            self.producer.send_message(&self.queue_url, body),
        )
        .await
        {
            Ok(Ok(message_id)) => EnqueueOutcome::Accepted { message_id },
            Ok(Err(err)) => EnqueueOutcome::Failed(err),
            Err(_) => EnqueueOutcome::Failed(QueueError::Timeout(self.send_timeout)),
        }
    }
}
