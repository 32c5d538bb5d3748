use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, ConfigLoader, Region};
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::Client;
use tracing::debug;

use crate::config::QueueConfig;
use crate::engine::queue::{QueueError, QueueProducer};

/// Amazon SQS (or anything speaking its API, such as LocalStack).
#[derive(Debug, Clone)]
pub struct SqsProducer {
    client: Client,
}

impl SqsProducer {
    pub async fn connect(config: &QueueConfig) -> Self {
        Self::from_loader(sdk_loader(config), config).await
    }

    async fn from_loader(loader: ConfigLoader, config: &QueueConfig) -> Self {
        let sdk_config = loader.load().await;
        debug!(
            region = ?sdk_config.region(),
            endpoint = ?config.endpoint,
            "sqs client configured"
        );

        Self::from_client(Client::new(&sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// SDK retries are switched off: one `send_message` is one request on the
/// wire, and resubmitting is left to the caller.
fn sdk_loader(config: &QueueConfig) -> ConfigLoader {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint.clone());
    }

    loader
}

#[async_trait]
impl QueueProducer for SqsProducer {
    async fn send_message(
        &self,
        queue_url: &str,
        body: String,
    ) -> Result<Option<String>, QueueError> {
        let output = self
            .client
            .send_message()
            .queue_url(queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|err| QueueError::Rejected(DisplayErrorContext(&err).to_string()))?;

        Ok(output.message_id().map(str::to_owned))
    }

    fn provider_name(&self) -> &'static str {
        "sqs"
    }
}
