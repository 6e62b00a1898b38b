use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sns::{error::DisplayErrorContext, types::MessageAttributeValue, Client};
use tracing::{debug, info};

use super::TopicPublisher;
use crate::core::types::MessageEnvelope;
use crate::error::{Result, WorkerError};

/// SNS-backed topic publisher
pub struct SnsTopicPublisher {
    client: Client,
}

impl SnsTopicPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the default credential and region chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        info!(
            "Created SNS client for region {:?}",
            config.region().map(|r| r.as_ref().to_string())
        );
        Self::new(Client::new(&config))
    }
}

fn publish_error(topic: &str, err: impl std::error::Error) -> WorkerError {
    WorkerError::Publish {
        topic: topic.to_string(),
        message: DisplayErrorContext(err).to_string(),
    }
}

#[async_trait]
impl TopicPublisher for SnsTopicPublisher {
    async fn publish(&self, topic: &str, envelope: &MessageEnvelope) -> Result<Option<String>> {
        let attribute = MessageAttributeValue::builder()
            .data_type(envelope.attribute.data_type.as_str())
            .string_value(envelope.attribute.string_value.as_str())
            .build()
            .map_err(|e| publish_error(topic, e))?;

        let output = self
            .client
            .publish()
            .topic_arn(topic)
            .message(envelope.body.as_str())
            .message_attributes(envelope.attribute.name.as_str(), attribute)
            .send()
            .await
            .map_err(|e| publish_error(topic, e))?;

        let message_id = output.message_id().map(str::to_string);
        debug!("Published to topic '{}': message_id={:?}", topic, message_id);
        Ok(message_id)
    }
}
