pub mod sqs_client;
pub mod worker;

use async_trait::async_trait;
use tracing::info;

use crate::core::types::ReceivedMessage;
use crate::error::Result;

pub use sqs_client::SqsQueueClient;
pub use worker::ConsumerWorker;

/// Queue operations the consumer needs from the messaging backend.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Maps a human-readable queue name to the address used by every other call.
    async fn resolve_queue_url(&self, queue_name: &str) -> Result<String>;

    /// Receives at most one message, hiding it from other pollers for
    /// `visibility_timeout_secs`.
    async fn receive_one(
        &self,
        queue_url: &str,
        visibility_timeout_secs: i32,
    ) -> Result<Option<ReceivedMessage>>;

    async fn delete(&self, queue_url: &str, receipt_handle: &str) -> Result<()>;
}

/// Resolves every queue name up front. The first failure aborts, so no worker
/// starts against a partially resolved set.
pub async fn resolve_queue_urls(
    client: &dyn QueueClient,
    queue_names: &[String],
) -> Result<Vec<String>> {
    let mut urls = Vec::with_capacity(queue_names.len());
    for name in queue_names {
        let url = client.resolve_queue_url(name).await?;
        info!("Resolved queue '{}' to {}", name, url);
        urls.push(url);
    }
    Ok(urls)
}
