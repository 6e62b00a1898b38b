use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::{error::DisplayErrorContext, Client};
use tracing::{debug, info};

use super::QueueClient;
use crate::core::types::ReceivedMessage;
use crate::error::{Result, WorkerError};

pub struct SqsQueueClient {
    client: Client,
}

impl SqsQueueClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the default credential and region chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        info!(
            "Created SQS client for region {:?}",
            config.region().map(|r| r.as_ref().to_string())
        );
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl QueueClient for SqsQueueClient {
    async fn resolve_queue_url(&self, queue_name: &str) -> Result<String> {
        let output = self
            .client
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await
            .map_err(|e| WorkerError::Resolve {
                queue: queue_name.to_string(),
                message: DisplayErrorContext(e).to_string(),
            })?;

        output
            .queue_url()
            .map(str::to_string)
            .ok_or_else(|| WorkerError::Resolve {
                queue: queue_name.to_string(),
                message: "no queue URL returned".to_string(),
            })
    }

    async fn receive_one(
        &self,
        queue_url: &str,
        visibility_timeout_secs: i32,
    ) -> Result<Option<ReceivedMessage>> {
        let output = self
            .client
            .receive_message()
            .queue_url(queue_url)
            .max_number_of_messages(1)
            .visibility_timeout(visibility_timeout_secs)
            .send()
            .await
            .map_err(|e| WorkerError::Receive {
                queue: queue_url.to_string(),
                message: DisplayErrorContext(e).to_string(),
            })?;

        let message = output.messages().first().map(|m| ReceivedMessage {
            body: m.body().map(str::to_string),
            receipt_handle: m.receipt_handle().map(str::to_string),
        });
        debug!(
            "Polled {}: {}",
            queue_url,
            if message.is_some() { "1 message" } else { "empty" }
        );
        Ok(message)
    }

    async fn delete(&self, queue_url: &str, receipt_handle: &str) -> Result<()> {
        self.client
            .delete_message()
            .queue_url(queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| WorkerError::Delete {
                queue: queue_url.to_string(),
                message: DisplayErrorContext(e).to_string(),
            })?;

        Ok(())
    }
}
