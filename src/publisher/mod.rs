pub mod sns_publisher;
pub mod worker;

use async_trait::async_trait;

use crate::core::types::MessageEnvelope;
use crate::error::Result;

pub use sns_publisher::SnsTopicPublisher;
pub use worker::PublisherWorker;

/// Sends envelopes to a topic on the messaging backend.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publishes one envelope and returns the backend message id, if any.
    async fn publish(&self, topic: &str, envelope: &MessageEnvelope) -> Result<Option<String>>;
}
